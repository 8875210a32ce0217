//! Open Library registry client for ISBNs
//!
//! `/isbn/{isbn}.json` redirects to the edition record; unknown ISBNs 404.

use std::sync::Arc;

use async_trait::async_trait;
use impress_identifiers::{registry_display_name, IdentifierKind};
use serde::Deserialize;
use serde_json::Value;

use super::traits::{lookup_failed, RegistryClient, RegistryError, RegistryMetadata};
use crate::http::HttpClient;
use crate::result::{
    IsbnDetails, VerificationDetails, VerificationResult, ISBN_NOT_FOUND_MESSAGE,
    ISBN_VERIFIED_MESSAGE,
};

pub const OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OpenLibraryEdition {
    title: Option<String>,
    publishers: Option<Value>,
    publish_date: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new(http: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn edition_url(&self, isbn: &str) -> String {
        format!("{}/isbn/{}.json", self.base_url, isbn)
    }

    /// Parse an edition record; publishers and publish_date pass through untouched
    pub fn parse_edition_response(isbn: &str, json: &str) -> Result<IsbnDetails, RegistryError> {
        let edition: OpenLibraryEdition = serde_json::from_str(json)
            .map_err(|e| RegistryError::Parse(format!("Invalid Open Library JSON: {}", e)))?;

        Ok(IsbnDetails {
            isbn: isbn.to_string(),
            title: edition.title,
            publishers: edition.publishers,
            publish_date: edition.publish_date,
        })
    }

    async fn lookup(&self, isbn: &str) -> Result<VerificationResult, RegistryError> {
        let url = self.edition_url(isbn);
        tracing::debug!("Querying Open Library: {}", url);

        let response = self.http.get(&url).await?;
        if !response.is_success() {
            tracing::info!("Open Library returned {} for ISBN {}", response.status, isbn);
            return Ok(VerificationResult::rejected(
                IdentifierKind::Isbn,
                ISBN_NOT_FOUND_MESSAGE,
            ));
        }

        let details = Self::parse_edition_response(isbn, &response.body)?;
        tracing::info!("ISBN {} verified via Open Library", isbn);
        Ok(VerificationResult::verified(
            IdentifierKind::Isbn,
            ISBN_VERIFIED_MESSAGE,
            VerificationDetails::Isbn(details),
        ))
    }
}

#[async_trait]
impl RegistryClient for OpenLibraryClient {
    fn kind(&self) -> IdentifierKind {
        IdentifierKind::Isbn
    }

    fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            id: "open_library",
            name: registry_display_name(self.kind()),
            description: "Internet Archive catalogue of book editions",
            base_url: self.base_url.clone(),
        }
    }

    async fn verify(&self, value: &str) -> VerificationResult {
        match self.lookup(value).await {
            Ok(result) => result,
            Err(e) => lookup_failed(IdentifierKind::Isbn, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_edition_response() {
        let body = json!({
            "title": "The Art of Computer Programming",
            "publishers": ["Addison-Wesley"],
            "publish_date": "1997",
            "number_of_pages": 672,
            "key": "/books/OL123M"
        })
        .to_string();

        let details = OpenLibraryClient::parse_edition_response("9780201896831", &body).unwrap();
        assert_eq!(details.isbn, "9780201896831");
        assert_eq!(details.title.as_deref(), Some("The Art of Computer Programming"));
        assert_eq!(details.publishers, Some(json!(["Addison-Wesley"])));
        assert_eq!(details.publish_date, Some(json!("1997")));
    }

    #[test]
    fn test_parse_edition_without_publishers() {
        let details =
            OpenLibraryClient::parse_edition_response("9780306406157", r#"{"title": "T"}"#)
                .unwrap();
        assert_eq!(details.publishers, None);
        assert_eq!(details.publish_date, None);
    }

    #[test]
    fn test_parse_edition_invalid_json() {
        let err = OpenLibraryClient::parse_edition_response("9780306406157", "not json").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }
}
