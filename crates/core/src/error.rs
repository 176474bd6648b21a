//! Error types for the Talkio domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The classification
//! stages are total functions and never fail; only the model-call stage and
//! request validation can produce errors, so the taxonomy is small.

use thiserror::Error;

/// The top-level error type for all Talkio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request carried no usable message text → HTTP 400.
    #[error("Invalid message")]
    InvalidInput,

    /// The provider API key is absent from process configuration → HTTP 500.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The model capability call failed → HTTP 500, generic message to the
    /// caller; full detail is logged server-side only.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration error (bad config file, invalid value).
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the external model capability.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}
