//! Common traits for registry clients

use async_trait::async_trait;
use impress_identifiers::IdentifierKind;
use thiserror::Error;

use crate::http::HttpError;
use crate::result::VerificationResult;

/// Why a registry lookup could not produce an answer
///
/// The `Display` text becomes the cause in "<KIND> verification failed: <cause>".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("{0}")]
    Parse(String),
}

/// Metadata about a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Endpoint the client actually queries
    pub base_url: String,
}

/// One external registry able to confirm identifiers of a single kind
#[async_trait]
pub trait RegistryClient: Send + Sync {
    fn kind(&self) -> IdentifierKind;

    fn metadata(&self) -> RegistryMetadata;

    /// Look up `value` and fold every outcome, including faults, into a result
    async fn verify(&self, value: &str) -> VerificationResult;
}

/// Fold a lookup fault into the provider-prefixed failure result
pub(crate) fn lookup_failed(kind: IdentifierKind, error: &RegistryError) -> VerificationResult {
    tracing::warn!("{} verification failed: {}", kind, error);
    VerificationResult::rejected(kind, format!("{} verification failed: {}", kind, error))
}
