//! Identifier kinds and their per-kind metadata
//!
//! Maps each kind to the registry that can confirm it and to the public
//! link a submitter can follow to check the record themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Types of bibliographic identifiers recognised in submitted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentifierKind {
    /// Digital Object Identifier
    Doi,
    /// International Standard Serial Number
    Issn,
    /// International Standard Book Number (13-digit form only)
    Isbn,
}

impl IdentifierKind {
    /// Kinds in extraction priority order
    pub fn priority_order() -> &'static [IdentifierKind] {
        &[IdentifierKind::Doi, IdentifierKind::Issn, IdentifierKind::Isbn]
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(identifier_display_name(*self))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown identifier kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for IdentifierKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doi" => Ok(IdentifierKind::Doi),
            "issn" => Ok(IdentifierKind::Issn),
            "isbn" => Ok(IdentifierKind::Isbn),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// Get the display name for an identifier kind
pub fn identifier_display_name(kind: IdentifierKind) -> &'static str {
    match kind {
        IdentifierKind::Doi => "DOI",
        IdentifierKind::Issn => "ISSN",
        IdentifierKind::Isbn => "ISBN",
    }
}

/// Get the name of the registry that confirms an identifier kind
pub fn registry_display_name(kind: IdentifierKind) -> &'static str {
    match kind {
        IdentifierKind::Doi => "CrossRef",
        IdentifierKind::Issn => "ISSN Portal",
        IdentifierKind::Isbn => "Open Library",
    }
}

/// Get the URL prefix of the public landing page for an identifier kind
pub fn identifier_url_prefix(kind: IdentifierKind) -> &'static str {
    match kind {
        IdentifierKind::Doi => "https://doi.org/",
        IdentifierKind::Issn => "https://portal.issn.org/resource/ISSN/",
        IdentifierKind::Isbn => "https://openlibrary.org/isbn/",
    }
}

/// Get the full public URL for an identifier
pub fn identifier_url(kind: IdentifierKind, value: &str) -> String {
    format!("{}{}", identifier_url_prefix(kind), value)
}
