use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::workflows::matching::domain::{
    InternshipPosting, PostingId, StudentCategory, StudentProfile,
};
use crate::workflows::matching::evaluation::MatchEngine;
use crate::workflows::matching::repository::{
    AllocationRecord, AllocationRepository, PostingRepository, RepositoryError,
};
use crate::workflows::matching::{matching_router, MatchService};

pub(super) fn student() -> StudentProfile {
    StudentProfile {
        name: Some("Asha Verma".to_string()),
        email: Some("asha@example.in".to_string()),
        skills: Some(vec!["React".to_string(), "Python".to_string()]),
        location: Some("Delhi".to_string()),
        first_timer: true,
        category: Some(StudentCategory::General),
    }
}

pub(super) fn posting(
    id: &str,
    skills: &[&str],
    location: Option<&str>,
    capacity: Option<i64>,
    allocated: Option<i64>,
) -> InternshipPosting {
    InternshipPosting {
        id: PostingId(id.to_string()),
        title: format!("Internship {id}"),
        organization: Some("Ministry of Corporate Affairs".to_string()),
        description: String::new(),
        skills: Some(skills.iter().map(|skill| skill.to_string()).collect()),
        location: location.map(str::to_string),
        capacity,
        allocated,
        created_at: None,
    }
}

/// Posting from the first worked example: one skill, same city, plenty of seats.
pub(super) fn frontend_posting() -> InternshipPosting {
    posting("frontend", &["react", "ui/ux"], Some("Delhi"), Some(20), Some(12))
}

/// Posting from the second worked example: nothing in common and no seats left.
pub(super) fn full_cobol_posting() -> InternshipPosting {
    posting("cobol", &["cobol"], Some("Mumbai"), Some(10), Some(10))
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::default()
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig { default_top_n: 5 }
}

pub(super) fn build_service() -> (
    MatchService<MemoryPostings, MemoryAllocations>,
    Arc<MemoryPostings>,
    Arc<MemoryAllocations>,
) {
    let postings = Arc::new(MemoryPostings::default());
    let allocations = Arc::new(MemoryAllocations::default());
    let service = MatchService::new(
        postings.clone(),
        allocations.clone(),
        engine(),
        matching_config(),
    );
    (service, postings, allocations)
}

pub(super) fn seeded_service(
    seed: Vec<InternshipPosting>,
) -> (
    MatchService<MemoryPostings, MemoryAllocations>,
    Arc<MemoryPostings>,
    Arc<MemoryAllocations>,
) {
    let (service, postings, allocations) = build_service();
    for posting in seed {
        postings.insert(posting).expect("seed posting");
    }
    (service, postings, allocations)
}

#[derive(Default, Clone)]
pub(super) struct MemoryPostings {
    records: Arc<Mutex<Vec<InternshipPosting>>>,
}

impl PostingRepository for MemoryPostings {
    fn insert(&self, posting: InternshipPosting) -> Result<InternshipPosting, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(posting.clone());
        Ok(posting)
    }

    fn update(&self, posting: InternshipPosting) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == posting.id) {
            Some(slot) => {
                *slot = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &PostingId) -> Result<Option<InternshipPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|posting| &posting.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<InternshipPosting>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAllocations {
    records: Arc<Mutex<Vec<AllocationRecord>>>,
}

impl MemoryAllocations {
    pub(super) fn records(&self) -> Vec<AllocationRecord> {
        self.records.lock().expect("ledger mutex poisoned").clone()
    }
}

impl AllocationRepository for MemoryAllocations {
    fn record(&self, allocation: AllocationRecord) -> Result<AllocationRecord, RepositoryError> {
        self.records
            .lock()
            .expect("ledger mutex poisoned")
            .push(allocation.clone());
        Ok(allocation)
    }

    fn for_posting(&self, id: &PostingId) -> Result<Vec<AllocationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("ledger mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.internship_id == id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailablePostings;

impl PostingRepository for UnavailablePostings {
    fn insert(&self, _posting: InternshipPosting) -> Result<InternshipPosting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _posting: InternshipPosting) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PostingId) -> Result<Option<InternshipPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<InternshipPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct UnavailableAllocations;

impl AllocationRepository for UnavailableAllocations {
    fn record(&self, _allocation: AllocationRecord) -> Result<AllocationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }

    fn for_posting(&self, _id: &PostingId) -> Result<Vec<AllocationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("ledger offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: MatchService<MemoryPostings, MemoryAllocations>,
) -> axum::Router {
    matching_router(Arc::new(service))
}
