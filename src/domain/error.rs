//! Error types for foodlens.
//!
//! This module defines the centralized error type [`FoodlensError`] and a type alias
//! [`Result`] used throughout the crate. The first three variants form the catalog
//! failure taxonomy (transport, decode, not found); the rest cover local concerns
//! such as the preference file and configuration.

use thiserror::Error;

/// The main error type for foodlens operations.
///
/// # Examples
///
/// ```
/// use foodlens::FoodlensError;
///
/// fn lookup() -> Result<(), FoodlensError> {
///     Err(FoodlensError::NotFound("barcode 000000000000".to_string()))
/// }
///
/// assert!(matches!(lookup(), Err(FoodlensError::NotFound(_))));
/// ```
#[derive(Debug, Error)]
pub enum FoodlensError {
    /// The catalog could not be reached or answered with a non-success status.
    ///
    /// Covers connection failures, request timeouts and HTTP error codes.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The catalog answered, but the payload is not the expected JSON shape.
    ///
    /// Only structurally required fields (the top-level result arrays) trigger
    /// this; missing optional product fields never do.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The catalog reported that the requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading or writing the preference store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for FoodlensError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// A specialized `Result` type for foodlens operations.
pub type Result<T> = std::result::Result<T, FoodlensError>;
