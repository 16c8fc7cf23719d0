//! Persistent parameter store
//!
//! - [`medium`]: byte-addressable storage trait and a RAM implementation
//! - [`layout`]: static schema of blocks, sections and widths
//! - [`signature`]: schema fingerprint used to detect incompatible upgrades
//! - [`store`]: preset-aware store with the system region and factory reset

mod engine;
pub mod error;
pub mod layout;
pub mod medium;
pub mod signature;
pub mod store;

pub use error::StoreError;
pub use layout::{
    AnalogDb, BoardConfig, ButtonDb, DbBlock, DbSection, DefaultValue, DisplayDb, EncoderDb,
    GlobalDb, Layout, LedDb, ParamWidth, SectionDescriptor,
};
pub use medium::{MediumError, RamMedium, StorageMedium};
pub use signature::{compute_signature, SIGNATURE_BASE};
pub use store::{InitOutcome, ParameterStore, PresetChangeHandler, ResetKind, SystemRegion};
