//! Platform-agnostic traits used by the firmware glue

pub mod sync;

#[cfg(feature = "embassy")]
pub use sync::EmbassyState;
pub use sync::{MockState, SharedState};
