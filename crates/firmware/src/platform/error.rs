//! Platform error types

use core::fmt;
use deckconf_core::database::MediumError;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// EEPROM operation failed
    Eeprom(EepromError),
    /// Boot-time initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// EEPROM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EepromError {
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Erase operation failed
    EraseFailed,
    /// Address outside the device
    InvalidAddress,
    /// Read-back after write did not match
    VerifyFailed,
    /// Device still busy with a previous write cycle
    Busy,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Eeprom(e) => write!(f, "EEPROM error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<EepromError> for PlatformError {
    fn from(error: EepromError) -> Self {
        PlatformError::Eeprom(error)
    }
}

impl From<EepromError> for MediumError {
    fn from(error: EepromError) -> Self {
        match error {
            EepromError::InvalidAddress => MediumError::InvalidAddress,
            EepromError::ReadFailed => MediumError::ReadFailed,
            EepromError::EraseFailed => MediumError::EraseFailed,
            EepromError::WriteFailed | EepromError::VerifyFailed | EepromError::Busy => {
                MediumError::WriteFailed
            }
        }
    }
}

impl From<PlatformError> for MediumError {
    fn from(error: PlatformError) -> Self {
        match error {
            PlatformError::Eeprom(e) => e.into(),
            PlatformError::InitializationFailed | PlatformError::InvalidConfig => {
                MediumError::ReadFailed
            }
        }
    }
}
