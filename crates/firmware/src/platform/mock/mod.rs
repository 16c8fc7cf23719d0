//! Mock platform implementation for testing
//!
//! Available during test builds and with the `mock` feature.

#![cfg(any(test, feature = "mock"))]

mod eeprom;
mod peripherals;

pub use eeprom::MockEeprom;
pub use peripherals::{MockMidi, MockPeripherals, MockResets, MAX_FRAME};
