//! ISSN Portal registry client
//!
//! The portal has no JSON API: the resource page is HTML carrying one
//! `<script type="application/ld+json">` block with the record. The portal
//! also rejects requests without a browser-like User-Agent.
//!
//! Scraping is tied to the portal's current markup. A page that answers 2xx
//! without the block is reported as "found but metadata unavailable".

use std::sync::Arc;

use async_trait::async_trait;
use impress_identifiers::{registry_display_name, IdentifierKind};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde_json::Value;

use super::traits::{lookup_failed, RegistryClient, RegistryError, RegistryMetadata};
use crate::http::HttpClient;
use crate::result::{
    IssnDetails, VerificationDetails, VerificationResult, ISSN_METADATA_UNAVAILABLE_MESSAGE,
    ISSN_NOT_FOUND_MESSAGE, ISSN_VERIFIED_MESSAGE,
};

pub const ISSN_PORTAL_BASE_URL: &str = "https://portal.issn.org";
pub const ISSN_PORTAL_USER_AGENT: &str = "Mozilla/5.0";

lazy_static! {
    static ref LD_JSON_SELECTOR: Selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
}

#[derive(Debug, Clone)]
pub struct IssnPortalClient {
    http: Arc<HttpClient>,
    base_url: String,
    user_agent: String,
}

impl IssnPortalClient {
    pub fn new(http: Arc<HttpClient>, base_url: &str, user_agent: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn resource_url(&self, issn: &str) -> String {
        format!("{}/resource/ISSN/{}", self.base_url, issn)
    }

    /// Pull the JSON-LD record out of a resource page
    ///
    /// `Ok(None)` means the page has no JSON-LD block at all.
    pub fn parse_resource_page(issn: &str, html: &str) -> Result<Option<IssnDetails>, RegistryError> {
        let Some(block) = find_ld_json(html) else {
            return Ok(None);
        };

        let record: Value = serde_json::from_str(block.trim())
            .map_err(|e| RegistryError::Parse(format!("Invalid JSON-LD: {}", e)))?;

        Ok(Some(IssnDetails {
            issn: issn.to_string(),
            title: text_at(&record, "/name"),
            publisher: text_at(&record, "/mainEntityOfPage/sourceOrganization/name"),
            country: text_at(&record, "/publication/location/name"),
            medium: text_at(&record, "/material"),
        }))
    }

    async fn lookup(&self, issn: &str) -> Result<VerificationResult, RegistryError> {
        let url = self.resource_url(issn);
        tracing::debug!("Querying ISSN Portal: {}", url);

        let response = self.http.get_with_user_agent(&url, &self.user_agent).await?;
        if !response.is_success() {
            tracing::info!("ISSN Portal returned {} for ISSN {}", response.status, issn);
            return Ok(VerificationResult::rejected(
                IdentifierKind::Issn,
                ISSN_NOT_FOUND_MESSAGE,
            ));
        }

        match Self::parse_resource_page(issn, &response.body)? {
            Some(details) => {
                tracing::info!("ISSN {} verified via ISSN Portal", issn);
                Ok(VerificationResult::verified(
                    IdentifierKind::Issn,
                    ISSN_VERIFIED_MESSAGE,
                    VerificationDetails::Issn(details),
                ))
            }
            None => {
                tracing::warn!("ISSN Portal page for {} has no JSON-LD block", issn);
                Ok(VerificationResult::rejected(
                    IdentifierKind::Issn,
                    ISSN_METADATA_UNAVAILABLE_MESSAGE,
                ))
            }
        }
    }
}

#[async_trait]
impl RegistryClient for IssnPortalClient {
    fn kind(&self) -> IdentifierKind {
        IdentifierKind::Issn
    }

    fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            id: "issn_portal",
            name: registry_display_name(self.kind()),
            description: "ISSN International Centre register of serial publications",
            base_url: self.base_url.clone(),
        }
    }

    async fn verify(&self, value: &str) -> VerificationResult {
        match self.lookup(value).await {
            Ok(result) => result,
            Err(e) => lookup_failed(IdentifierKind::Issn, &e),
        }
    }
}

/// Body of the first JSON-LD script block
fn find_ld_json(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&LD_JSON_SELECTOR)
        .next()
        .map(|script| script.text().collect::<String>())
}

/// String at a JSON pointer; a list yields its first string
fn text_at(record: &Value, pointer: &str) -> Option<String> {
    match record.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
        _ => None,
    }
}
