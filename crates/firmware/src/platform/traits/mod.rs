//! Platform interface traits

pub mod eeprom;

pub use eeprom::EepromInterface;
