//! CrossRef registry client for DOIs
//!
//! API docs: https://api.crossref.org/swagger-ui/index.html
//! A DOI that is not registered answers 404 on `/works/{doi}`.

use std::sync::Arc;

use async_trait::async_trait;
use impress_identifiers::{registry_display_name, IdentifierKind};
use serde::Deserialize;

use super::traits::{lookup_failed, RegistryClient, RegistryError, RegistryMetadata};
use crate::http::HttpClient;
use crate::result::{
    DoiDetails, VerificationDetails, VerificationResult, DOI_NOT_FOUND_MESSAGE,
    DOI_VERIFIED_MESSAGE,
};

pub const CROSSREF_BASE_URL: &str = "https://api.crossref.org";

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefWork,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrossrefWork {
    title: Vec<String>,
    author: Vec<CrossrefAuthor>,
    publisher: Option<String>,
    #[serde(rename = "container-title")]
    container_title: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrossrefAuthor {
    given: Option<String>,
    family: Option<String>,
}

impl CrossrefAuthor {
    fn display_name(&self) -> String {
        [self.given.as_deref(), self.family.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct CrossrefClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl CrossrefClient {
    pub fn new(http: Arc<HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn work_url(&self, doi: &str) -> String {
        format!("{}/works/{}", self.base_url, doi)
    }

    /// Parse a single work response into DOI details
    pub fn parse_work_response(doi: &str, json: &str) -> Result<DoiDetails, RegistryError> {
        let response: CrossrefResponse = serde_json::from_str(json)
            .map_err(|e| RegistryError::Parse(format!("Invalid CrossRef JSON: {}", e)))?;
        let work = response.message;

        let authors = work
            .author
            .iter()
            .map(CrossrefAuthor::display_name)
            .filter(|name| !name.is_empty())
            .collect();

        Ok(DoiDetails {
            doi: doi.to_string(),
            title: work.title.into_iter().next(),
            authors,
            publisher: work.publisher,
            journal: work.container_title.into_iter().next(),
        })
    }

    async fn lookup(&self, doi: &str) -> Result<VerificationResult, RegistryError> {
        let url = self.work_url(doi);
        tracing::debug!("Querying CrossRef: {}", url);

        let response = self.http.get(&url).await?;
        if !response.is_success() {
            tracing::info!("CrossRef returned {} for DOI {}", response.status, doi);
            return Ok(VerificationResult::rejected(
                IdentifierKind::Doi,
                DOI_NOT_FOUND_MESSAGE,
            ));
        }

        let details = Self::parse_work_response(doi, &response.body)?;
        tracing::info!("DOI {} verified via CrossRef", doi);
        Ok(VerificationResult::verified(
            IdentifierKind::Doi,
            DOI_VERIFIED_MESSAGE,
            VerificationDetails::Doi(details),
        ))
    }
}

#[async_trait]
impl RegistryClient for CrossrefClient {
    fn kind(&self) -> IdentifierKind {
        IdentifierKind::Doi
    }

    fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            id: "crossref",
            name: registry_display_name(self.kind()),
            description: "DOI registration agency with metadata for scholarly works",
            base_url: self.base_url.clone(),
        }
    }

    async fn verify(&self, value: &str) -> VerificationResult {
        match self.lookup(value).await {
            Ok(result) => result,
            Err(e) => lookup_failed(IdentifierKind::Doi, &e),
        }
    }
}
