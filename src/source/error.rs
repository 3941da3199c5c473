//! Error types for data sources.

use thiserror::Error;

/// Errors that can occur while fetching readings from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Timeout waiting for the device.
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the device.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// HTTP request failed for another reason.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The device answered with a non-success status.
    #[error("Device returned status {0}")]
    Status(u16),

    /// Reading a captured log failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_connect() {
            SourceError::Connection(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}
