//! Byte-addressable storage medium
//!
//! The parameter store lays its data out on anything that can read and write
//! bytes at an address: internal EEPROM, an emulated EEPROM page in Flash, or
//! plain RAM. Platform crates implement [`StorageMedium`] for their hardware.

/// Errors from the storage medium
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumError {
    /// Access outside the medium
    InvalidAddress,
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Clear/erase operation failed
    EraseFailed,
}

impl core::fmt::Display for MediumError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MediumError::InvalidAddress => write!(f, "address outside storage medium"),
            MediumError::ReadFailed => write!(f, "storage read failed"),
            MediumError::WriteFailed => write!(f, "storage write failed"),
            MediumError::EraseFailed => write!(f, "storage erase failed"),
        }
    }
}

/// Byte-addressable persistent storage
///
/// # Invariants
///
/// - Addresses are zero-based and `address + len <= size()`
/// - A successful `write` is durable: a following `read` returns the data
/// - `clear` resets every byte to the same erased value
pub trait StorageMedium {
    /// Total usable size in bytes
    fn size(&self) -> usize;

    /// Read `buf.len()` bytes starting at `address`
    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), MediumError>;

    /// Write `data` starting at `address`
    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), MediumError>;

    /// Erase the whole medium
    fn clear(&mut self) -> Result<(), MediumError>;
}

/// Value of an erased [`RamMedium`] byte
pub const ERASED_BYTE: u8 = 0xFF;

/// RAM-backed medium
///
/// Contents do not survive a power cycle. Used on hosts and as a scratch
/// medium; it can be told to fail after a number of writes to exercise error
/// paths.
#[derive(Debug, Clone)]
pub struct RamMedium<const N: usize> {
    data: [u8; N],
    writes: usize,
    fail_after: Option<usize>,
}

impl<const N: usize> RamMedium<N> {
    /// Create an erased medium
    pub const fn new() -> Self {
        Self {
            data: [ERASED_BYTE; N],
            writes: 0,
            fail_after: None,
        }
    }

    /// Raw contents
    pub fn contents(&self) -> &[u8] {
        &self.data
    }

    /// Number of successful write calls
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Let `writes` more writes succeed, then fail every write
    pub fn fail_after_writes(&mut self, writes: usize) {
        self.fail_after = Some(self.writes + writes);
    }

    /// Stop injecting write failures
    pub fn clear_failure(&mut self) {
        self.fail_after = None;
    }
}

impl<const N: usize> Default for RamMedium<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StorageMedium for RamMedium<N> {
    fn size(&self) -> usize {
        N
    }

    fn read(&mut self, address: usize, buf: &mut [u8]) -> Result<(), MediumError> {
        let end = address
            .checked_add(buf.len())
            .filter(|&end| end <= N)
            .ok_or(MediumError::InvalidAddress)?;
        buf.copy_from_slice(&self.data[address..end]);
        Ok(())
    }

    fn write(&mut self, address: usize, data: &[u8]) -> Result<(), MediumError> {
        let end = address
            .checked_add(data.len())
            .filter(|&end| end <= N)
            .ok_or(MediumError::InvalidAddress)?;

        if matches!(self.fail_after, Some(limit) if self.writes >= limit) {
            return Err(MediumError::WriteFailed);
        }

        self.data[address..end].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MediumError> {
        self.data = [ERASED_BYTE; N];
        Ok(())
    }
}
