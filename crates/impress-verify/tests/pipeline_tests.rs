//! End-to-end pipeline tests: document bytes in, one verification result out

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use common::{crossref_work_body, issn_page, open_library_body, silent_server, verifier_for};
use impress_verify::{
    IdentifierKind, RegistryClient, RegistryMetadata, RegistrySet, TextExtractionError,
    TextExtractor, Utf8TextExtractor, VerificationResult, Verifier, VerifierConfig,
};
use tokio::sync::Mutex;

#[tokio::test]
async fn test_document_with_doi_is_verified_by_crossref() {
    let mut server = mockito::Server::new_async().await;
    let crossref = server
        .mock("GET", "/works/10.1234/abcd.5678")
        .with_status(200)
        .with_body(crossref_work_body("Example Paper", "A", "Smith"))
        .expect(1)
        .create_async()
        .await;

    let verifier = verifier_for(&server.url());
    let result = verifier
        .verify_document(b"... see DOI: 10.1234/abcd.5678 for details ...")
        .await;

    assert!(result.valid);
    assert_eq!(result.kind, Some(IdentifierKind::Doi));
    crossref.assert_async().await;
}

#[tokio::test]
async fn test_parenthesised_doi_is_looked_up_without_bracket() {
    let mut server = mockito::Server::new_async().await;
    let crossref = server
        .mock("GET", "/works/10.1234/abcd.5678")
        .with_status(200)
        .with_body(crossref_work_body("Example Paper", "A", "Smith"))
        .expect(1)
        .create_async()
        .await;

    let verifier = verifier_for(&server.url());
    let result = verifier
        .verify_document(b"as shown previously (doi:10.1234/abcd.5678).")
        .await;

    assert!(result.valid, "{}", result.message);
    crossref.assert_async().await;
}

#[tokio::test]
async fn test_no_identifier_makes_no_network_call() {
    let mut server = mockito::Server::new_async().await;
    let any_request = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let verifier = verifier_for(&server.url());
    let result = verifier
        .verify_document(b"Workshop talk slides, no bibliographic data.")
        .await;

    assert_eq!(
        result,
        VerificationResult {
            valid: false,
            kind: None,
            message: "No DOI, ISSN, or ISBN found in the document".to_string(),
            details: None,
        }
    );
    any_request.assert_async().await;
}

#[tokio::test]
async fn test_failed_doi_does_not_fall_back_to_issn() {
    let mut server = mockito::Server::new_async().await;
    let crossref = server
        .mock("GET", "/works/10.1000/xyz123")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;
    let issn = server
        .mock("GET", "/resource/ISSN/0028-0836")
        .with_status(200)
        .with_body(issn_page(r#"{"name": "Nature"}"#))
        .expect(0)
        .create_async()
        .await;

    let verifier = verifier_for(&server.url());
    let result = verifier
        .verify_document(b"ISSN 0028-0836\ndoi:10.1000/xyz123")
        .await;

    assert!(!result.valid);
    assert_eq!(result.kind, Some(IdentifierKind::Doi));
    assert_eq!(result.message, "DOI not found in CrossRef database");
    crossref.assert_async().await;
    issn.assert_async().await;
}

#[tokio::test]
async fn test_isbn_document_goes_to_open_library_only() {
    let mut server = mockito::Server::new_async().await;
    let open_library = server
        .mock("GET", "/isbn/9780262033848.json")
        .with_status(200)
        .with_body(open_library_body())
        .expect(1)
        .create_async()
        .await;

    let verifier = verifier_for(&server.url());
    let result = verifier
        .verify_document(b"Cormen et al., ISBN 978-0-262-03384-8")
        .await;

    assert!(result.valid);
    assert_eq!(result.kind, Some(IdentifierKind::Isbn));
    open_library.assert_async().await;
}

#[tokio::test]
async fn test_binary_upload_is_soft_failure() {
    let verifier = verifier_for("http://127.0.0.1:1");
    let result = verifier.verify_document(&[0xde, 0xad, 0xbe, 0xef]).await;

    assert!(!result.valid);
    assert_eq!(result.kind, None);
    assert!(result
        .message
        .starts_with("Document verification failed: Document is not valid UTF-8 text"));
}

#[tokio::test]
async fn test_cancellation_drops_inflight_request() {
    let base_url = silent_server().await;
    let config = VerifierConfig {
        timeout_secs: 30,
        ..VerifierConfig::default().with_base_url(&base_url)
    };
    let verifier = Verifier::from_config(&config).unwrap();

    let started = Instant::now();
    let result = verifier
        .verify_document_until(
            b"doi 10.1234/abcd.5678",
            tokio::time::sleep(Duration::from_millis(200)),
        )
        .await;

    assert_eq!(result, None);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_completes_when_not_cancelled() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/works/10.1234/abcd.5678")
        .with_status(200)
        .with_body(crossref_work_body("Example Paper", "A", "Smith"))
        .create_async()
        .await;

    let verifier = verifier_for(&server.url());
    let result = verifier
        .verify_document_until(b"doi 10.1234/abcd.5678", std::future::pending())
        .await;

    assert!(result.unwrap().valid);
}

// === Custom collaborators ===

/// Registry double that records what it was asked
struct RecordingRegistry {
    kind: IdentifierKind,
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl RegistryClient for RecordingRegistry {
    fn kind(&self) -> IdentifierKind {
        self.kind
    }

    fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            id: "recording",
            name: "Recording",
            description: "test double",
            base_url: "http://localhost".to_string(),
        }
    }

    async fn verify(&self, value: &str) -> VerificationResult {
        self.seen.lock().await.push(value.to_string());
        VerificationResult::rejected(self.kind, "recorded")
    }
}

#[tokio::test]
async fn test_exactly_one_registry_is_consulted() {
    let doi = Arc::new(RecordingRegistry {
        kind: IdentifierKind::Doi,
        seen: Mutex::new(Vec::new()),
    });
    let issn = Arc::new(RecordingRegistry {
        kind: IdentifierKind::Issn,
        seen: Mutex::new(Vec::new()),
    });
    let isbn = Arc::new(RecordingRegistry {
        kind: IdentifierKind::Isbn,
        seen: Mutex::new(Vec::new()),
    });
    let registries = RegistrySet::new()
        .with_client(doi.clone())
        .with_client(issn.clone())
        .with_client(isbn.clone());
    let verifier = Verifier::new(Arc::new(Utf8TextExtractor), registries);

    verifier
        .verify_text("ISBN 978-0-262-03384-8 ISSN 0028-0836")
        .await;

    assert!(doi.seen.lock().await.is_empty());
    assert_eq!(*issn.seen.lock().await, vec!["0028-0836"]);
    assert!(isbn.seen.lock().await.is_empty());
}

struct FixedText(&'static str);

impl TextExtractor for FixedText {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, TextExtractionError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn test_text_extractor_is_pluggable() {
    let isbn = Arc::new(RecordingRegistry {
        kind: IdentifierKind::Isbn,
        seen: Mutex::new(Vec::new()),
    });
    let verifier = Verifier::new(
        Arc::new(FixedText("ISBN 979-10-90636-07-1")),
        RegistrySet::new().with_client(isbn.clone()),
    );

    let result = verifier.verify_document(b"%PDF-1.7 binary").await;

    assert_eq!(result.kind, Some(IdentifierKind::Isbn));
    assert_eq!(*isbn.seen.lock().await, vec!["9791090636071"]);
}
