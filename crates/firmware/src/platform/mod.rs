//! Platform abstraction layer
//!
//! Hardware services the configuration glue depends on. Board support crates
//! implement the traits in [`traits`]; [`mock`] provides host doubles.

pub mod error;
pub mod medium;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{EepromError, PlatformError, Result};
pub use medium::EepromMedium;
pub use traits::EepromInterface;
