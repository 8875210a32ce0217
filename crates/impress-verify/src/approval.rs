//! Approval classification at publication creation
//!
//! A publication is always created. Verification only decides whether it
//! starts out approved or waits for an administrator.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::pipeline::Verifier;
use crate::result::{VerificationDetails, VerificationResult};

/// Review state shown to the submitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    AutoVerified,
    PendingReview,
}

impl ReviewStatus {
    pub fn feedback_label(&self) -> &'static str {
        match self {
            ReviewStatus::AutoVerified => "Paper Auto-Verified!",
            ReviewStatus::PendingReview => "Manual Verification Required",
        }
    }
}

/// Approval state and audit metadata derived from a verification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub is_approved: bool,
    pub status: ReviewStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<VerificationDetails>,
}

/// `is_approved` is exactly `result.valid`
pub fn classify(result: &VerificationResult) -> ApprovalDecision {
    let status = if result.valid {
        ReviewStatus::AutoVerified
    } else {
        ReviewStatus::PendingReview
    };

    ApprovalDecision {
        is_approved: result.valid,
        status,
        message: result.message.clone(),
        details: result.details.clone(),
    }
}

/// Submission data supplied by the upload handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPublication {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
    /// Stored document reference from the object-storage upload
    pub file_url: String,
    pub submitted_by: String,
}

/// Publication record as handed to persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: Uuid,
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub venue: Option<String>,
    pub file_url: String,
    pub submitted_by: String,
    pub is_approved: bool,
    pub verification: ApprovalDecision,
    pub created_at: DateTime<Utc>,
}

impl Publication {
    fn from_submission(submission: NewPublication, decision: ApprovalDecision) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: submission.title,
            authors: submission.authors,
            year: submission.year,
            venue: submission.venue,
            file_url: submission.file_url,
            submitted_by: submission.submitted_by,
            is_approved: decision.is_approved,
            verification: decision,
            created_at: Utc::now(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Publication already exists: {0}")]
    Duplicate(Uuid),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Persistence collaborator that owns publication records
#[async_trait]
pub trait PublicationStore: Send + Sync {
    async fn create(&self, publication: Publication) -> Result<Publication, StoreError>;
}

/// Verify the uploaded document and create the publication record
///
/// Only the store can fail; a failed verification still creates the record
/// with `is_approved = false`.
pub async fn submit_publication(
    verifier: &Verifier,
    store: &dyn PublicationStore,
    submission: NewPublication,
    document: &[u8],
) -> Result<Publication, StoreError> {
    let result = verifier.verify_document(document).await;
    let decision = classify(&result);
    tracing::info!(
        "Creating publication '{}' ({})",
        submission.title,
        decision.status.feedback_label()
    );
    store
        .create(Publication::from_submission(submission, decision))
        .await
}
