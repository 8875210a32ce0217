//! The single terminal outcome of a verification run

use impress_identifiers::IdentifierKind;
use serde::{Deserialize, Serialize};

pub const NO_IDENTIFIER_MESSAGE: &str = "No DOI, ISSN, or ISBN found in the document";

pub const DOI_VERIFIED_MESSAGE: &str = "DOI verified via CrossRef";
pub const DOI_NOT_FOUND_MESSAGE: &str = "DOI not found in CrossRef database";

pub const ISSN_VERIFIED_MESSAGE: &str = "ISSN verified via ISSN Portal";
pub const ISSN_NOT_FOUND_MESSAGE: &str = "ISSN not found in ISSN Portal";
pub const ISSN_METADATA_UNAVAILABLE_MESSAGE: &str = "ISSN found but metadata unavailable";

pub const ISBN_VERIFIED_MESSAGE: &str = "ISBN verified via Open Library";
pub const ISBN_NOT_FOUND_MESSAGE: &str = "ISBN not found in Open Library";

/// Result of verifying one document or identifier
///
/// Every failure mode of the pipeline is folded into `valid: false` with a
/// message; nothing is raised to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub kind: Option<IdentifierKind>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<VerificationDetails>,
}

impl VerificationResult {
    pub fn verified(
        kind: IdentifierKind,
        message: impl Into<String>,
        details: VerificationDetails,
    ) -> Self {
        Self {
            valid: true,
            kind: Some(kind),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn rejected(kind: IdentifierKind, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            kind: Some(kind),
            message: message.into(),
            details: None,
        }
    }

    pub fn no_identifier() -> Self {
        Self::failed(NO_IDENTIFIER_MESSAGE)
    }

    /// Failure before any identifier kind was known
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            kind: None,
            message: message.into(),
            details: None,
        }
    }
}

/// Registry metadata attached to a verified result
///
/// Serialized without a tag so consumers read `details.title` directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerificationDetails {
    Doi(DoiDetails),
    Issn(IssnDetails),
    Isbn(IsbnDetails),
}

impl VerificationDetails {
    pub fn title(&self) -> Option<&str> {
        match self {
            VerificationDetails::Doi(d) => d.title.as_deref(),
            VerificationDetails::Issn(d) => d.title.as_deref(),
            VerificationDetails::Isbn(d) => d.title.as_deref(),
        }
    }
}

/// CrossRef work metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoiDetails {
    pub doi: String,
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    /// First container title
    pub journal: Option<String>,
}

/// ISSN Portal record metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssnDetails {
    pub issn: String,
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub country: Option<String>,
    pub medium: Option<String>,
}

/// Open Library edition metadata, passed through as returned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsbnDetails {
    pub isbn: String,
    pub title: Option<String>,
    pub publishers: Option<serde_json::Value>,
    pub publish_date: Option<serde_json::Value>,
}
