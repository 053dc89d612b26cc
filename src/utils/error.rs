use std::io::Error as IoError;
use hmac::digest::MacError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("Handshake error: {0}")]
    Handshake(String),

    #[error("Verification failed: {0}")]
    Verification(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("MAC mismatch")]
    Mac(#[from] MacError),
}

impl Error {
    /// Create an IO error from message
    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(IoError::other(msg.into()))
    }

    /// Create a handshake error
    pub fn handshake(msg: impl Into<String>) -> Self {
        Error::Handshake(msg.into())
    }

    /// Create a verification error
    pub fn verification(msg: impl Into<String>) -> Self {
        Error::Verification(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
