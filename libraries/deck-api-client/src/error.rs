//! Error types for the Web API client.

use deck_core::DeckError;
use thiserror::Error;

/// Errors that can occur when talking to the Web API or handling login.
#[derive(Error, Debug)]
pub enum ApiClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// No token available, or the API rejected it
    #[error("Authentication required")]
    AuthRequired,

    /// The authorization server reported an error in the redirect
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid base URL or redirect URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the API response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Reading or writing the token session failed
    #[error(transparent)]
    Storage(#[from] DeckError),
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;
