use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AllocationStatus, InternshipPosting, PostingId, StudentId};

/// Seat allocation captured when a student is placed on a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub student_id: StudentId,
    pub internship_id: PostingId,
    pub score: i32,
    pub status: AllocationStatus,
    pub explanation: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction for postings so the service can be exercised in isolation.
///
/// `list` must return postings in a stable order; ranking ties fall back to it.
pub trait PostingRepository: Send + Sync {
    fn insert(&self, posting: InternshipPosting) -> Result<InternshipPosting, RepositoryError>;
    fn update(&self, posting: InternshipPosting) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PostingId) -> Result<Option<InternshipPosting>, RepositoryError>;
    fn list(&self) -> Result<Vec<InternshipPosting>, RepositoryError>;
}

/// Append-only ledger of allocation decisions.
pub trait AllocationRepository: Send + Sync {
    fn record(&self, allocation: AllocationRecord) -> Result<AllocationRecord, RepositoryError>;
    fn for_posting(&self, id: &PostingId) -> Result<Vec<AllocationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
