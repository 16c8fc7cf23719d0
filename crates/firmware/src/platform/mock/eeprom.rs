//! Mock EEPROM implementation for testing
//!
//! Provides in-memory EEPROM simulation for unit tests.

use crate::platform::{error::EepromError, traits::EepromInterface, Result};

/// Value of an erased cell
const ERASED: u8 = 0xFF;

/// Mock EEPROM implementation
///
/// Simulates an `N`-byte EEPROM in memory. Supports:
/// - Read/write/erase operations
/// - Per-byte write counters for wear validation
/// - Corruption injection for testing schema recovery
/// - Write-failure and power-loss injection for error paths
///
/// # Example
///
/// ```ignore
/// use deckconf_firmware::platform::mock::MockEeprom;
/// use deckconf_firmware::platform::traits::EepromInterface;
///
/// let mut eeprom = MockEeprom::<64>::new();
/// eeprom.write(4, &[0x17, 0x01]).unwrap();
///
/// let mut buf = [0u8; 2];
/// eeprom.read(4, &mut buf).unwrap();
/// assert_eq!(buf, [0x17, 0x01]);
/// assert_eq!(eeprom.write_count(4), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEeprom<const N: usize> {
    storage: [u8; N],
    write_counts: [u32; N],
    /// Writes left before every write fails
    fail_after: Option<usize>,
    /// Next write stores only its first half
    power_loss: bool,
}

impl<const N: usize> MockEeprom<N> {
    /// Create an erased device
    pub const fn new() -> Self {
        Self {
            storage: [ERASED; N],
            write_counts: [0; N],
            fail_after: None,
            power_loss: false,
        }
    }

    /// Raw contents (for test verification)
    pub fn contents(&self) -> &[u8] {
        &self.storage
    }

    /// Overwrite a range with a corrupt pattern
    pub fn inject_corruption(&mut self, address: usize, len: usize) {
        let end = (address + len).min(N);
        for byte in &mut self.storage[address.min(end)..end] {
            *byte = 0xAA;
        }
    }

    /// Number of times a byte has been written
    pub fn write_count(&self, address: usize) -> u32 {
        self.write_counts.get(address).copied().unwrap_or(0)
    }

    /// Total byte writes across the device
    pub fn total_write_count(&self) -> u32 {
        self.write_counts.iter().sum()
    }

    /// Let `writes` more writes succeed, then fail every write
    pub fn fail_after_writes(&mut self, writes: usize) {
        self.fail_after = Some(writes);
    }

    /// Stop injecting write failures
    pub fn clear_failure(&mut self) {
        self.fail_after = None;
    }

    /// Complete only half of the next write
    pub fn simulate_power_loss(&mut self) {
        self.power_loss = true;
    }

    fn check_range(address: u32, len: usize) -> Result<core::ops::Range<usize>> {
        let start = address as usize;
        start
            .checked_add(len)
            .filter(|&end| end <= N)
            .map(|end| start..end)
            .ok_or_else(|| EepromError::InvalidAddress.into())
    }
}

impl<const N: usize> Default for MockEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EepromInterface for MockEeprom<N> {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        let range = Self::check_range(address, buf.len())?;
        buf.copy_from_slice(&self.storage[range]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        let range = Self::check_range(address, data.len())?;

        match self.fail_after {
            Some(0) => return Err(EepromError::WriteFailed.into()),
            Some(ref mut left) => *left -= 1,
            None => {}
        }

        let len = if self.power_loss {
            self.power_loss = false;
            data.len() / 2
        } else {
            data.len()
        };

        let start = range.start;
        self.storage[start..start + len].copy_from_slice(&data[..len]);
        for count in &mut self.write_counts[start..start + len] {
            *count += 1;
        }

        Ok(())
    }

    fn erase_all(&mut self) -> Result<()> {
        self.storage = [ERASED; N];
        Ok(())
    }

    fn capacity(&self) -> u32 {
        N as u32
    }
}
