//! Error types for the pickpool service.
//!
//! Contest rule violations are recoverable client errors and live in
//! [`crate::contest::ContestError`]; everything here is a system fault.

use crate::contest::ContestError;
use std::fmt;

/// Root error type for all pickpool operations
#[derive(Debug)]
pub enum PoolError {
    /// Configuration related errors
    Configuration(ConfigurationError),

    /// Flat-file storage errors
    Storage(StorageError),

    /// Contest rule violations
    Contest(ContestError),
}

/// Configuration and validation errors
#[derive(Debug)]
pub enum ConfigurationError {
    MissingRequired(String),
    InvalidValue { field: String, value: String, reason: String },
    LoadFailed(String),
    SaveFailed(String),
}

/// Flat-file storage errors
#[derive(Debug)]
pub enum StorageError {
    ReadFailed(String),
    WriteFailed(String),
    CorruptedData(String),
    PermissionDenied(String),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Configuration(e) => write!(f, "Configuration error: {}", e),
            PoolError::Storage(e) => write!(f, "Storage error: {}", e),
            PoolError::Contest(e) => write!(f, "Contest error: {}", e),
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingRequired(field) => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigurationError::InvalidValue { field, value, reason } => {
                write!(f, "Invalid value for {}: '{}' ({})", field, value, reason)
            }
            ConfigurationError::LoadFailed(msg) => {
                write!(f, "Failed to load configuration: {}", msg)
            }
            ConfigurationError::SaveFailed(msg) => {
                write!(f, "Failed to save configuration: {}", msg)
            }
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Read failed: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
            StorageError::CorruptedData(msg) => write!(f, "Corrupted data: {}", msg),
            StorageError::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
        }
    }
}

impl std::error::Error for PoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PoolError::Configuration(e) => Some(e),
            PoolError::Storage(e) => Some(e),
            PoolError::Contest(e) => Some(e),
        }
    }
}

impl std::error::Error for ConfigurationError {}
impl std::error::Error for StorageError {}

impl From<ConfigurationError> for PoolError {
    fn from(e: ConfigurationError) -> Self {
        PoolError::Configuration(e)
    }
}

impl From<StorageError> for PoolError {
    fn from(e: StorageError) -> Self {
        PoolError::Storage(e)
    }
}

impl From<ContestError> for PoolError {
    fn from(e: ContestError) -> Self {
        PoolError::Contest(e)
    }
}

impl From<std::io::Error> for PoolError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                PoolError::Storage(StorageError::PermissionDenied(e.to_string()))
            }
            _ => PoolError::Storage(StorageError::ReadFailed(e.to_string())),
        }
    }
}

/// Convenience type alias for Results
pub type PoolResult<T> = Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let storage_error = StorageError::CorruptedData("players.json".to_string());
        let pool_error = PoolError::Storage(storage_error);

        assert!(pool_error.to_string().contains("Storage error"));
        assert!(pool_error.to_string().contains("players.json"));
    }

    #[test]
    fn test_contest_error_conversion() {
        let contest_error = ContestError::BuybackLimitReached;
        let pool_error: PoolError = contest_error.into();

        match pool_error {
            PoolError::Contest(_) => {}
            _ => panic!("Expected contest error"),
        }
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;
        let config_error = ConfigurationError::MissingRequired("admin_token".to_string());
        let pool_error = PoolError::Configuration(config_error);

        assert!(pool_error.source().is_some());
    }
}
