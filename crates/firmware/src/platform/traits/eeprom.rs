//! EEPROM interface trait
//!
//! Byte-addressable non-volatile memory holding the configuration database:
//! an external I2C/SPI EEPROM, the MCU's data EEPROM, or an emulation layer
//! on top of Flash pages.

use crate::platform::Result;

/// EEPROM interface trait
///
/// # EEPROM Characteristics
///
/// - Bytes are individually writable; no erase is needed before a write
/// - Cells wear out after a finite number of write cycles (typically 100k),
///   so callers avoid rewriting unchanged values
/// - Erased cells read back as `0xFF`
///
/// # Safety Invariants
///
/// - The device must be initialized before use
/// - Only one owner per instance (no concurrent access)
pub trait EepromInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// range leaves the device.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    ///
    /// Returns once the write cycle has completed.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// range leaves the device, `WriteFailed` or `VerifyFailed` otherwise.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Reset every byte to the erased value
    fn erase_all(&mut self) -> Result<()>;

    /// Device capacity in bytes
    fn capacity(&self) -> u32;
}
