use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use yuvasetu::workflows::matching::{
    AllocationRecord, AllocationRepository, InternshipPosting, PostingId, PostingRepository,
    RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered posting store; ranking ties fall back to this order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPostingRepository {
    records: Arc<Mutex<Vec<InternshipPosting>>>,
}

impl PostingRepository for InMemoryPostingRepository {
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAllocationRepository {
    records: Arc<Mutex<Vec<AllocationRecord>>>,
}

impl AllocationRepository for InMemoryAllocationRepository {
    fn record(&self, allocation: AllocationRecord) -> Result<AllocationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("ledger mutex poisoned");
        guard.push(allocation.clone());
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
