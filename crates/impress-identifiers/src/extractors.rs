//! Identifier extraction from document text
//!
//! A document yields at most one identifier. Matchers run in a fixed
//! DOI → ISSN → ISBN order and the first one that finds anything wins;
//! later matchers are never consulted.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::kinds::IdentifierKind;

/// Identifier found in a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractedIdentifier {
    pub kind: IdentifierKind,
    pub value: String,
}

impl ExtractedIdentifier {
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Outcome of scanning a document for an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(ExtractedIdentifier),
    NotFound,
}

impl Extraction {
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    pub fn into_option(self) -> Option<ExtractedIdentifier> {
        match self {
            Extraction::Found(id) => Some(id),
            Extraction::NotFound => None,
        }
    }
}

lazy_static! {
    // DOI: 10.<registrant>/<suffix>, registrant is 4-9 digits
    static ref DOI_REGEX: Regex = Regex::new(
        r"(?i)10\.[0-9]{4,9}/[-._;()/:A-Z0-9]+"
    ).unwrap();

    // ISSN: literal prefix, optional separators, dddd-dddX
    static ref ISSN_REGEX: Regex = Regex::new(
        r"(?i)ISSN[:\s]*(?P<issn>[0-9]{4}-[0-9]{3}[0-9X])"
    ).unwrap();

    // ISBN-13: 978/979 followed by ten more digits, hyphens or spaces between
    static ref ISBN13_REGEX: Regex = Regex::new(
        r"97[89](?:[-\s]?[0-9]){10}"
    ).unwrap();
}

type Matcher = fn(&str) -> Option<String>;

const MATCHERS: [(IdentifierKind, Matcher); 3] = [
    (IdentifierKind::Doi, extract_doi),
    (IdentifierKind::Issn, extract_issn),
    (IdentifierKind::Isbn, extract_isbn13),
];

/// Find the single identifier a document claims, in priority order
pub fn extract_identifier(text: &str) -> Extraction {
    for (kind, matcher) in MATCHERS {
        if let Some(value) = matcher(text) {
            return Extraction::Found(ExtractedIdentifier { kind, value });
        }
    }
    Extraction::NotFound
}

/// Extract the first DOI in the text
pub fn extract_doi(text: &str) -> Option<String> {
    DOI_REGEX.find(text).map(|m| clean_doi(m.as_str()))
}

/// Extract the first `ISSN dddd-dddX` in the text, without the prefix
pub fn extract_issn(text: &str) -> Option<String> {
    ISSN_REGEX
        .captures(text)
        .and_then(|cap| cap.name("issn"))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Extract the first 978/979 ISBN-13 in the text, digits only
pub fn extract_isbn13(text: &str) -> Option<String> {
    ISBN13_REGEX.find(text).map(|m| normalize_isbn(m.as_str()))
}

/// Bring a user-supplied value into the form the extractors produce
pub fn normalize_identifier(kind: IdentifierKind, value: &str) -> String {
    let value = value.trim();
    match kind {
        IdentifierKind::Doi => clean_doi(value),
        IdentifierKind::Issn => value.to_ascii_uppercase(),
        IdentifierKind::Isbn => normalize_isbn(value),
    }
}

/// Clean a DOI by removing trailing punctuation picked up from the text
///
/// A closing `)` is only dropped when the DOI has no `(` left to match it.
fn clean_doi(doi: &str) -> String {
    let mut doi = doi;
    loop {
        let trimmed = doi.trim_end_matches(['.', ';', ':']);
        let unbalanced = trimmed.matches(')').count() > trimmed.matches('(').count();
        let trimmed = match trimmed.strip_suffix(')') {
            Some(rest) if unbalanced => rest,
            _ => trimmed,
        };
        if trimmed.len() == doi.len() {
            return trimmed.to_string();
        }
        doi = trimmed;
    }
}

/// Normalize ISBN by removing hyphens and whitespace
fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| c.is_ascii_digit()).collect()
}
