//! Registry clients that confirm an identifier against an external database
//!
//! One client per identifier kind. The clients share a result contract but
//! nothing else: each registry signals success and failure differently.

pub mod crossref;
pub mod issn_portal;
pub mod open_library;
pub mod traits;

pub use crossref::*;
pub use issn_portal::*;
pub use open_library::*;
pub use traits::*;

use std::collections::HashMap;
use std::sync::Arc;

use impress_identifiers::IdentifierKind;

use crate::config::VerifierConfig;
use crate::http::HttpClient;
use crate::result::VerificationResult;

/// Kind → client lookup; exactly one client answers for each kind
#[derive(Clone, Default)]
pub struct RegistrySet {
    clients: HashMap<IdentifierKind, Arc<dyn RegistryClient>>,
}

impl RegistrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The production registries, all sharing one HTTP client
    pub fn from_config(config: &VerifierConfig, http: Arc<HttpClient>) -> Self {
        Self::new()
            .with_client(Arc::new(CrossrefClient::new(
                http.clone(),
                &config.crossref_base_url,
            )))
            .with_client(Arc::new(IssnPortalClient::new(
                http.clone(),
                &config.issn_portal_base_url,
                &config.issn_user_agent,
            )))
            .with_client(Arc::new(OpenLibraryClient::new(
                http,
                &config.open_library_base_url,
            )))
    }

    /// Register a client for its kind, replacing any previous one
    pub fn with_client(mut self, client: Arc<dyn RegistryClient>) -> Self {
        self.clients.insert(client.kind(), client);
        self
    }

    pub fn client_for(&self, kind: IdentifierKind) -> Option<&Arc<dyn RegistryClient>> {
        self.clients.get(&kind)
    }

    /// Verify `value` against the single registry for `kind`
    pub async fn verify(&self, kind: IdentifierKind, value: &str) -> VerificationResult {
        match self.client_for(kind) {
            Some(client) => client.verify(value).await,
            None => {
                tracing::warn!("No registry configured for {}", kind);
                VerificationResult::rejected(kind, format!("No registry configured for {}", kind))
            }
        }
    }
}

impl std::fmt::Debug for RegistrySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.clients.values().map(|c| c.metadata().id).collect();
        names.sort_unstable();
        f.debug_struct("RegistrySet").field("clients", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn http() -> Arc<HttpClient> {
        Arc::new(HttpClient::new("impress-verify-test", Duration::from_secs(1)).unwrap())
    }

    #[test]
    fn test_from_config_registers_all_kinds() {
        let registries = RegistrySet::from_config(&VerifierConfig::default(), http());
        for kind in IdentifierKind::priority_order() {
            let client = registries.client_for(*kind).unwrap();
            assert_eq!(client.kind(), *kind);
        }
        assert_eq!(
            registries.client_for(IdentifierKind::Doi).unwrap().metadata().id,
            "crossref"
        );
    }

    #[test]
    fn test_metadata_reports_configured_endpoint() {
        let config = VerifierConfig::default().with_base_url("http://127.0.0.1:9999/");
        let registries = RegistrySet::from_config(&config, http());

        let expected = [
            (IdentifierKind::Doi, "CrossRef"),
            (IdentifierKind::Issn, "ISSN Portal"),
            (IdentifierKind::Isbn, "Open Library"),
        ];
        for (kind, name) in expected {
            let metadata = registries.client_for(kind).unwrap().metadata();
            assert_eq!(metadata.name, name);
            assert_eq!(metadata.base_url, "http://127.0.0.1:9999");
        }
    }

    #[test]
    fn test_default_metadata_points_at_public_registries() {
        let registries = RegistrySet::from_config(&VerifierConfig::default(), http());
        assert_eq!(
            registries.client_for(IdentifierKind::Isbn).unwrap().metadata().base_url,
            OPEN_LIBRARY_BASE_URL
        );
    }

    #[tokio::test]
    async fn test_missing_client_is_soft_failure() {
        let registries = RegistrySet::new();
        let result = registries.verify(IdentifierKind::Isbn, "9780306406157").await;
        assert!(!result.valid);
        assert_eq!(result.kind, Some(IdentifierKind::Isbn));
        assert_eq!(result.message, "No registry configured for ISBN");
    }
}
