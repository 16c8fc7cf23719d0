//! Request result taxonomy

/// Errors returned by configuration requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The storage primitive failed while serving the request
    Error,
    /// The request is semantically invalid: unknown address, disabled
    /// feature, out-of-range value, or a disallowed combination
    NotSupported,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::Error => write!(f, "storage access failed"),
            ConfigError::NotSupported => write!(f, "request not supported"),
        }
    }
}

/// Result type for configuration requests
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result status as reported back to the remote side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 1,
    Error = 2,
    NotSupported = 3,
}

impl Status {
    /// Wire code of this status
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl<T> From<&ConfigResult<T>> for Status {
    fn from(result: &ConfigResult<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(ConfigError::Error) => Status::Error,
            Err(ConfigError::NotSupported) => Status::NotSupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_result() {
        let ok: ConfigResult<i32> = Ok(5);
        let failed: ConfigResult<i32> = Err(ConfigError::Error);
        let rejected: ConfigResult<()> = Err(ConfigError::NotSupported);

        assert_eq!(Status::from(&ok), Status::Ok);
        assert_eq!(Status::from(&failed), Status::Error);
        assert_eq!(Status::from(&rejected).code(), 3);
    }
}
