//! Client Error Types
//!
//! Gateway rejections are not errors here: they come back as
//! [`GatewayResult::Errors`](crate::GatewayResult). This enum covers the
//! faults a caller cannot branch on as gateway data.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PagSeguroError>;

/// Client-side errors
#[derive(Error, Debug)]
pub enum PagSeguroError {
    /// Request never produced an HTTP response (DNS, TLS, connection reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Checkout payload could not be written
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Response body could not be read as XML
    #[error("Parse error: {0}")]
    Parse(String),

    /// Gateway returned a timestamp we could not read
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PagSeguroError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Get user-friendly message
    pub const fn user_message(&self) -> &str {
        match self {
            Self::Transport(_) => "Could not reach PagSeguro. Please try again.",
            Self::Config(_) => "Payment service configuration error.",
            _ => "An error occurred processing your payment.",
        }
    }
}
