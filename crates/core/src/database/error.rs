//! Parameter store error types

use super::medium::MediumError;
use crate::protocol::ConfigError;

/// Errors from parameter store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The storage medium failed
    Medium(MediumError),
    /// `initialize` has not completed
    NotInitialized,
    /// Section is not part of the layout
    UnknownSection,
    /// Parameter index beyond the section's parameter count
    IndexOutOfRange,
    /// Value does not fit the section's parameter width
    ValueOutOfRange,
    /// Preset number not supported by the medium
    PresetOutOfRange,
    /// Layout does not fit into the medium even once
    LayoutTooLarge,
    /// Layout descriptor exceeds the static section capacity
    InvalidLayout,
}

impl From<MediumError> for StoreError {
    fn from(err: MediumError) -> Self {
        StoreError::Medium(err)
    }
}

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Medium(_) | StoreError::NotInitialized => ConfigError::Error,
            _ => ConfigError::NotSupported,
        }
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::Medium(e) => write!(f, "medium error: {}", e),
            StoreError::NotInitialized => write!(f, "parameter store not initialized"),
            StoreError::UnknownSection => write!(f, "unknown section"),
            StoreError::IndexOutOfRange => write!(f, "parameter index out of range"),
            StoreError::ValueOutOfRange => write!(f, "value does not fit parameter width"),
            StoreError::PresetOutOfRange => write!(f, "preset not supported"),
            StoreError::LayoutTooLarge => write!(f, "layout larger than storage medium"),
            StoreError::InvalidLayout => write!(f, "invalid layout descriptor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_to_config_error() {
        assert_eq!(
            ConfigError::from(StoreError::Medium(MediumError::WriteFailed)),
            ConfigError::Error
        );
        assert_eq!(
            ConfigError::from(StoreError::IndexOutOfRange),
            ConfigError::NotSupported
        );
        assert_eq!(
            ConfigError::from(StoreError::ValueOutOfRange),
            ConfigError::NotSupported
        );
    }
}
