//! Configuration handler
//!
//! Business logic behind the remote configuration protocol:
//!
//! - [`translate`]: protocol to storage section tables
//! - [`peripherals`]: runtime module traits and build-time capabilities
//! - [`handler`]: [`SysConfig`], dispatch and the [`DataHandler`](crate::protocol::DataHandler) impl
//! - [`custom`]: custom request catalog
//!
//! Per-block get/set logic lives in `global`, `components`, `leds` and
//! `display`.

mod components;
pub mod custom;
mod display;
mod global;
pub mod handler;
mod leds;
pub mod peripherals;
pub mod translate;

pub use custom::CustomRequest;
pub use handler::{DeviceInfo, FirmwareVersion, SysConfig, SystemAction};
pub use peripherals::{
    rgb_address, rgb_id, AnalogControl, ButtonControl, Capabilities, DisplayControl,
    EncoderControl, EventDirection, LedControl, MidiTransport, NoteOffMode, Peripherals,
};
