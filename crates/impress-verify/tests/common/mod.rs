//! Shared fixtures for registry and pipeline tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use impress_verify::{Publication, PublicationStore, StoreError, Verifier, VerifierConfig};
use serde_json::json;
use tokio::net::TcpListener;

/// Verifier whose three registries all point at `base_url`
pub fn verifier_for(base_url: &str) -> Verifier {
    let config = VerifierConfig {
        timeout_secs: 5,
        ..VerifierConfig::default().with_base_url(base_url)
    };
    Verifier::from_config(&config).expect("valid test config")
}

pub fn crossref_work_body(title: &str, given: &str, family: &str) -> String {
    json!({
        "status": "ok",
        "message-type": "work",
        "message": {
            "DOI": "10.1234/abcd.5678",
            "title": [title],
            "author": [{"given": given, "family": family}],
            "publisher": "Example Press",
            "container-title": ["Journal of Examples"]
        }
    })
    .to_string()
}

pub fn issn_page(ld_json: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>ISSN record</title>
<script type="application/ld+json">{}</script>
</head><body><main>record</main></body></html>"#,
        ld_json
    )
}

pub const ISSN_PAGE_WITHOUT_METADATA: &str = r#"<!DOCTYPE html><html><head><title>ISSN record</title>
<script src="/static/app.js"></script></head><body><main>record</main></body></html>"#;

pub fn open_library_body() -> String {
    json!({
        "title": "Introduction to Algorithms",
        "publishers": ["MIT Press"],
        "publish_date": "2009",
        "key": "/books/OL24304101M"
    })
    .to_string()
}

/// A server that accepts connections and never answers
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// In-memory stand-in for the persistence collaborator
#[derive(Default)]
pub struct InMemoryStore {
    pub records: Mutex<Vec<Publication>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn all(&self) -> Vec<Publication> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl PublicationStore for InMemoryStore {
    async fn create(&self, publication: Publication) -> Result<Publication, StoreError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|p| p.id == publication.id) {
            return Err(StoreError::Duplicate(publication.id));
        }
        records.push(publication.clone());
        Ok(publication)
    }
}

/// Store that is down
pub struct FailingStore;

#[async_trait]
impl PublicationStore for FailingStore {
    async fn create(&self, _publication: Publication) -> Result<Publication, StoreError> {
        Err(StoreError::Storage("connection refused".to_string()))
    }
}
