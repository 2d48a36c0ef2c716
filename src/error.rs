use thiserror::Error;

/// Error type for storefront data access.
///
/// - `RequestFailed` — network/transport errors (wraps `reqwest::Error`)
/// - `NotFound` — HTTP 404
/// - `Api` — any other non-2xx status code
/// - `Decode` — a body that is not the expected product JSON
/// - `Io` — fixture or config file could not be read
/// - `Config` — config file present but malformed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid product data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
