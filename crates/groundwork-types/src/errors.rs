//! Error types for Groundwork operations.

use thiserror::Error;

/// The main error type for Groundwork operations.
///
/// This enum covers all major error categories that can occur while
/// provisioning an environment, from bad arguments to failures in the
/// external tools the provisioner drives.
#[derive(Error, Debug)]
pub enum GroundworkError {
    /// A caller supplied an invalid argument (e.g. a zero secret length)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested service is not present in the catalog
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// Catalog construction or lookup error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A vault document could not be decrypted (wrong passphrase or corrupt)
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Vault document handling error
    #[error("Vault error: {0}")]
    Vault(String),

    /// Environment repository error
    #[error("Environment error: {0}")]
    Environment(String),

    /// Hosted version-control service error
    #[error("Service error: {0}")]
    Service(String),

    /// An external tool exited non-zero or produced unusable output
    #[error("External tool failure: {0}")]
    ExternalTool(String),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for Groundwork operations.
pub type Result<T> = std::result::Result<T, GroundworkError>;

/// Helper macro to bail out with a GroundworkError
///
/// This is used for expected error conditions.
///
/// # Example
///
/// ```ignore
/// if !valid {
///     bail!(Validation, "Invalid domain: {}", reason);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::GroundworkError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::GroundworkError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::GroundworkError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::GroundworkError::Other(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_failing_piece() {
        let err = GroundworkError::UnknownService("doesnotexist".to_string());
        assert_eq!(err.to_string(), "Unknown service: doesnotexist");

        let err = GroundworkError::DecryptionFailed("bad passphrase".to_string());
        assert!(err.to_string().starts_with("Decryption failed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GroundworkError = io.into();
        assert!(matches!(err, GroundworkError::Io(_)));
    }
}
