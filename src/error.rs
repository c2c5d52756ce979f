//! Error types for the receipt printer library

use thiserror::Error;

/// Printing error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// No device paired/selected, permission denied, or device busy
    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    /// IO failure during open/write/close
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Timeout waiting for the device
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid printer or paper configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Malformed transaction payload (upstream data error, fail fast)
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),
}

/// Result type for printing operations
pub type PrintResult<T> = Result<T, PrintError>;
