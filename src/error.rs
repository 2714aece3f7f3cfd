//! # Error Types
//!
//! Custom error types for CRSF TX using `thiserror`.

use thiserror::Error;

/// Main error type for CRSF TX
#[derive(Debug, Error)]
pub enum CrsfTxError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Telemetry pass-through input larger than the protocol frame maximum
    #[error("Telemetry pass-through frame too large: {0} bytes (max {max})", max = crate::crsf::protocol::CRSF_FRAME_MAXLEN)]
    PassthroughTooLarge(usize),
}

/// Result type alias for CRSF TX
pub type Result<T> = std::result::Result<T, CrsfTxError>;
