//! Error types for the promptloom domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all promptloom operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Expansion errors ---
    #[error("Expansion error: {0}")]
    Expand(#[from] ExpandError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised while expanding references in a template.
///
/// Every variant is fatal to the whole run: the expansion engine performs
/// no recovery, no retry, and no partial-result salvage.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The resource existed when classified but vanished before the read.
    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Expansion deadline of {millis}ms exceeded")]
    Timeout { millis: u64 },
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Network error: {0}")]
    Network(String),
}
