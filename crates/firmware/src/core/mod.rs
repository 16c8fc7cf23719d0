//! Firmware infrastructure shared by the platform and configuration glue

pub mod logging;
pub mod traits;
