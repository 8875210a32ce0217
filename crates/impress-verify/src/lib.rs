//! Publication verification pipeline
//!
//! Decides without human input whether an uploaded document is traceable
//! scholarship:
//! - Text extraction from the uploaded buffer
//! - Identifier extraction (DOI, then ISSN, then ISBN-13)
//! - Lookup in the one matching registry: CrossRef, ISSN Portal or Open Library
//! - Approval classification for the new publication record
//!
//! Every outcome, including network faults, comes back as a
//! [`VerificationResult`]; verification never blocks a submission.

pub mod approval;
pub mod config;
pub mod error;
pub mod http;
#[cfg(feature = "cli")]
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod result;
pub mod text;

pub use approval::{
    classify, submit_publication, ApprovalDecision, NewPublication, Publication,
    PublicationStore, ReviewStatus, StoreError,
};
pub use config::{ConfigError, VerifierConfig};
pub use error::VerifyError;
pub use pipeline::Verifier;
pub use registry::{
    CrossrefClient, IssnPortalClient, OpenLibraryClient, RegistryClient, RegistryError,
    RegistryMetadata, RegistrySet,
};
pub use result::{DoiDetails, IsbnDetails, IssnDetails, VerificationDetails, VerificationResult};
pub use text::{DocumentTextExtractor, TextExtractionError, TextExtractor, Utf8TextExtractor};

pub use impress_identifiers::{ExtractedIdentifier, Extraction, IdentifierKind};
