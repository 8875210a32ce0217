//! Bibliographic identifier extraction for publication verification
//!
//! This crate finds the identifier a submitted document claims to be:
//! - DOI, ISSN and ISBN-13 matchers over unstructured document text
//! - A fixed DOI → ISSN → ISBN priority with first-match-wins semantics
//! - Display names and resolver links for each identifier kind
//!
//! Everything here is pure: no network, no clock, no randomness.

pub mod extractors;
pub mod kinds;

pub use extractors::*;
pub use kinds::*;
