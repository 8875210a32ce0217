//! Error types for setting up the pipeline
//!
//! Verification itself never fails: see [`crate::VerificationResult`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::HttpError;

/// Result type alias for pipeline construction
pub type Result<T> = std::result::Result<T, VerifyError>;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpError),
}
