//! Error types for merge key generation and opening.

use thiserror::Error;

/// Result type alias for merge key operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or opening merge keys.
///
/// Opening a key never reports *why* it failed: a wrong owner password, a
/// wrong user password and a corrupted key all surface as [`Error::InvalidKey`].
#[derive(Error, Debug)]
pub enum Error {
    /// Owner or user password rejected by the password policy.
    #[error("Password not accepted by the password policy")]
    RejectedPassword,

    /// Data contains the line feed used as the key delimiter.
    #[error("Unsupported data: line feeds are not allowed, encode the data first (e.g. base64)")]
    UnsupportedData,

    /// The key cannot be opened with the given credentials, or is malformed.
    #[error("Invalid key")]
    InvalidKey,

    /// Oil lengths must be non-negative.
    #[error("Oil can't be negative")]
    InvalidOil,

    /// Invalid key configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encryption error while generating a key.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// I/O error while reading or writing a serialized key.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
