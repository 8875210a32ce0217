//! HTTP client abstraction for registry clients

pub mod native;

pub use native::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Request timed out")]
    Timeout,
    #[error("Failed to read response body: {message}")]
    Body { message: String },
    #[error("Failed to build HTTP client: {message}")]
    Build { message: String },
}

/// Response of a completed request, whatever its status
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
