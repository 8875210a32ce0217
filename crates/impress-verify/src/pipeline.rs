//! Verification orchestrator
//!
//! bytes → text → one identifier → the one registry for its kind → result.
//! The identifier kind alone decides which registry is asked; a failed
//! DOI lookup does not fall back to scanning for an ISSN or ISBN.

use std::future::Future;
use std::sync::Arc;

use impress_identifiers::{extract_identifier, ExtractedIdentifier, Extraction};

use crate::config::VerifierConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::registry::RegistrySet;
use crate::result::VerificationResult;
use crate::text::{DocumentTextExtractor, TextExtractor};

/// Stateless verifier; safe to share across request handlers
#[derive(Clone)]
pub struct Verifier {
    extractor: Arc<dyn TextExtractor>,
    registries: RegistrySet,
}

impl Verifier {
    pub fn new(extractor: Arc<dyn TextExtractor>, registries: RegistrySet) -> Self {
        Self {
            extractor,
            registries,
        }
    }

    /// Production verifier: default text extraction and the three registries
    pub fn from_config(config: &VerifierConfig) -> Result<Self> {
        config.validate()?;
        let http = Arc::new(HttpClient::new(&config.user_agent, config.timeout())?);
        Ok(Self::new(
            Arc::new(DocumentTextExtractor),
            RegistrySet::from_config(config, http),
        ))
    }

    /// Verify an uploaded document
    pub async fn verify_document(&self, bytes: &[u8]) -> VerificationResult {
        let text = match self.extractor.extract_text(bytes) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Text extraction failed: {}", e);
                return VerificationResult::failed(format!("Document verification failed: {}", e));
            }
        };
        self.verify_text(&text).await
    }

    /// Verify already-extracted document text
    pub async fn verify_text(&self, text: &str) -> VerificationResult {
        match extract_identifier(text) {
            Extraction::Found(identifier) => {
                tracing::debug!("Extracted {} {}", identifier.kind, identifier.value);
                self.verify_identifier(&identifier).await
            }
            Extraction::NotFound => {
                tracing::info!("No identifier found in document");
                VerificationResult::no_identifier()
            }
        }
    }

    /// Verify one identifier against the registry for its kind
    pub async fn verify_identifier(&self, identifier: &ExtractedIdentifier) -> VerificationResult {
        self.registries
            .verify(identifier.kind, &identifier.value)
            .await
    }

    /// Verify a document unless `cancel` resolves first
    ///
    /// Returns `None` when cancelled; the in-flight registry request is
    /// dropped with its connection.
    pub async fn verify_document_until<F>(&self, bytes: &[u8], cancel: F) -> Option<VerificationResult>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::info!("Verification cancelled");
                None
            }
            result = self.verify_document(bytes) => Some(result),
        }
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("registries", &self.registries)
            .finish_non_exhaustive()
    }
}
