#![cfg_attr(not(test), no_std)]

//! deckconf_firmware - Firmware glue for the deckconf configuration core
//!
//! This crate binds the platform-agnostic logic in `deckconf_core` to a
//! concrete board: the build-time board definition, EEPROM storage, logging
//! and locking.
//!
//! # Design Principles
//!
//! - **Build-time capabilities**: cargo features select LEDs, display, DIN MIDI
//! - **Platform traits**: EEPROM access through [`platform::EepromInterface`]
//! - **Host testable**: mock EEPROM and peripherals under `test` / `mock`
//!
//! # Boot
//!
//! ```ignore
//! let config = boot::init_config(eeprom, peripherals, info)?;
//! static CONFIG: EmbassyState<Handler> = ...;
//! let mut gateway = gateway::SharedConfig::new(&CONFIG);
//! ```

pub mod board;
pub mod boot;
pub mod core;
pub mod gateway;
pub mod platform;
pub mod preset;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging
