use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    AllocationRequest, AllocationStatus, InternshipPosting, NewPosting, PostingId, StudentProfile,
    DEFAULT_ALLOCATED, DEFAULT_CAPACITY,
};
use super::evaluation::{MatchEngine, ScoredMatch};
use super::repository::{
    AllocationRecord, AllocationRepository, PostingRepository, RepositoryError,
};
use crate::config::MatchingConfig;

/// Service composing the posting store, allocation ledger, and scoring engine.
pub struct MatchService<P, A> {
    postings: Arc<P>,
    allocations: Arc<A>,
    engine: Arc<MatchEngine>,
    default_top_n: usize,
    allocation_gate: Mutex<()>,
}

static POSTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_posting_id() -> PostingId {
    let id = POSTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PostingId(format!("int-{id:06}"))
}

impl<P, A> MatchService<P, A>
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    pub fn new(
        postings: Arc<P>,
        allocations: Arc<A>,
        engine: MatchEngine,
        matching: MatchingConfig,
    ) -> Self {
        Self {
            postings,
            allocations,
            engine: Arc::new(engine),
            default_top_n: matching.default_top_n,
            allocation_gate: Mutex::new(()),
        }
    }

    /// Publish a new posting with a generated identifier.
    pub fn create_posting(
        &self,
        posting: NewPosting,
    ) -> Result<InternshipPosting, MatchServiceError> {
        let NewPosting {
            title,
            organization,
            location,
            skills,
            capacity,
            allocated,
            description,
        } = posting;

        let posting = InternshipPosting {
            id: next_posting_id(),
            title,
            organization,
            description,
            skills: Some(skills),
            location: location.filter(|value| !value.is_empty()),
            capacity: Some(capacity.unwrap_or(DEFAULT_CAPACITY)),
            allocated: Some(allocated.unwrap_or(DEFAULT_ALLOCATED)),
            created_at: Some(Utc::now()),
        };

        let stored = self.postings.insert(posting)?;
        info!(internship_id = %stored.id.0, title = %stored.title, "internship posting created");
        Ok(stored)
    }

    /// Store an already-identified posting, e.g. one loaded from an export.
    pub fn import_posting(
        &self,
        posting: InternshipPosting,
    ) -> Result<InternshipPosting, MatchServiceError> {
        Ok(self.postings.insert(posting)?)
    }

    pub fn get_posting(&self, id: &PostingId) -> Result<InternshipPosting, MatchServiceError> {
        let posting = self.postings.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(posting)
    }

    pub fn list_postings(&self) -> Result<Vec<InternshipPosting>, MatchServiceError> {
        Ok(self.postings.list()?)
    }

    /// Rank every stored posting for `student`.
    pub fn match_student(
        &self,
        student: Option<&StudentProfile>,
        top_n: Option<i64>,
    ) -> Result<Vec<ScoredMatch>, MatchServiceError> {
        let postings = self.postings.list()?;
        let top_n = top_n
            .unwrap_or_else(|| i64::try_from(self.default_top_n).unwrap_or(i64::MAX));
        Ok(self.engine.rank(student, Some(postings.as_slice()), top_n))
    }

    /// Place a student on a posting, waitlisting them when no seat is left.
    pub fn allocate(
        &self,
        request: AllocationRequest,
    ) -> Result<AllocationRecord, MatchServiceError> {
        let AllocationRequest {
            student_id,
            student_profile,
            internship_id,
        } = request;

        let _gate = self
            .allocation_gate
            .lock()
            .map_err(|_| MatchServiceError::Poisoned)?;

        let posting = self
            .postings
            .fetch(&internship_id)?
            .ok_or(RepositoryError::NotFound)?;

        let evaluation = self.engine.score(&student_profile, &posting);

        let status = if posting.open_seats() > 0 {
            let allocated = posting.allocated.unwrap_or(DEFAULT_ALLOCATED);
            self.postings.update(InternshipPosting {
                allocated: Some(allocated.saturating_add(1)),
                ..posting.clone()
            })?;
            AllocationStatus::Allocated
        } else {
            AllocationStatus::Waitlisted
        };

        let recorded = self.allocations.record(AllocationRecord {
            student_id,
            internship_id,
            score: evaluation.score,
            status,
            explanation: evaluation.explanation(),
            created_at: Utc::now(),
        });

        // A seat is only held while a ledger entry names its holder.
        let record = match recorded {
            Ok(record) => record,
            Err(error) => {
                if status == AllocationStatus::Allocated {
                    if let Err(rollback) = self.postings.update(posting) {
                        warn!(%rollback, "failed to release seat after ledger write failed");
                    }
                }
                return Err(error.into());
            }
        };

        info!(
            student_id = %record.student_id.0,
            internship_id = %record.internship_id.0,
            status = record.status.label(),
            score = record.score,
            "allocation recorded"
        );

        Ok(record)
    }

    pub fn allocations_for(
        &self,
        internship_id: &PostingId,
    ) -> Result<Vec<AllocationRecord>, MatchServiceError> {
        self.get_posting(internship_id)?;
        Ok(self.allocations.for_posting(internship_id)?)
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("allocation lock poisoned")]
    Poisoned,
}
