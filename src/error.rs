//! Error handling for the ordmap library
//!
//! The core map and cursor operations report absence and conflicts through
//! `Option`/`bool`. This error type backs the `try_*` variants and the
//! configuration layer.

use thiserror::Error;

/// Main error type for the ordmap library
#[derive(Error, Debug)]
pub enum OrderedMapError {
    /// I/O related errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A key required by the operation is not present
    #[error("Key not found: {key}")]
    KeyNotFound {
        /// Debug rendering of the missing key
        key: String,
    },

    /// A key that must be new is already present
    #[error("Key already exists: {key}")]
    KeyExists {
        /// Debug rendering of the conflicting key
        key: String,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// Configuration (de)serialization failures
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message from the serializer
        message: String,
    },
}

impl OrderedMapError {
    /// Create a key not found error from any debuggable key
    pub fn key_not_found<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Self::KeyNotFound { key: format!("{:?}", key) }
    }

    /// Create a key exists error from any debuggable key
    pub fn key_exists<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Self::KeyExists { key: format!("{:?}", key) }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization { message: message.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Key errors leave the map untouched, so the caller can retry with
    /// different keys.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::KeyNotFound { .. } => true,
            Self::KeyExists { .. } => true,
            Self::OutOfBounds { .. } => false,
            Self::Configuration { .. } => false,
            Self::Serialization { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::KeyNotFound { .. } => "absence",
            Self::KeyExists { .. } => "conflict",
            Self::OutOfBounds { .. } => "bounds",
            Self::Configuration { .. } => "config",
            Self::Serialization { .. } => "serialization",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, OrderedMapError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(OrderedMapError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = OrderedMapError::key_not_found("alpha");
        assert_eq!(err.category(), "absence");
        assert!(err.is_recoverable());

        let err = OrderedMapError::key_exists(&42);
        assert_eq!(err.category(), "conflict");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_bounds_checking() {
        assert!(check_bounds(5, 10).is_ok());
        assert!(check_bounds(10, 10).is_err());
        assert!(check_bounds(0, 0).is_err());
        assert!(check_bounds(usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = OrderedMapError::key_not_found("missing");
        let display = format!("{}", err);
        assert!(display.contains("Key not found"));
        assert!(display.contains("\"missing\""));

        let err = OrderedMapError::key_exists(&7u32);
        assert_eq!(format!("{}", err), "Key already exists: 7");

        let bounds_err = OrderedMapError::out_of_bounds(10, 5);
        let bounds_display = format!("{}", bounds_err);
        assert!(bounds_display.contains("Out of bounds"));
        assert!(bounds_display.contains("10"));
        assert!(bounds_display.contains("5"));
    }

    #[test]
    fn test_non_recoverable_errors() {
        assert!(!OrderedMapError::out_of_bounds(1, 0).is_recoverable());
        assert!(!OrderedMapError::configuration("bad").is_recoverable());
        assert!(!OrderedMapError::serialization("bad json").is_recoverable());
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: OrderedMapError = io_error.into();

        assert_eq!(err.category(), "io");
        assert!(err.is_recoverable());
        assert!(format!("{}", err).contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = OrderedMapError::configuration("debug test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Configuration"));
        assert!(debug_str.contains("debug test"));
    }
}
