//! Error types for CodeVF API operations

use thiserror::Error;

/// Result type for CodeVF API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the CodeVF API
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error response
    #[error("CodeVF API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response
        status: reqwest::StatusCode,
        /// Response body, as returned by the API
        message: String,
    },

    /// Authentication error
    #[error("CodeVF authentication error: {0}")]
    Auth(String),

    /// Invalid base URL
    #[error("invalid CodeVF base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}
