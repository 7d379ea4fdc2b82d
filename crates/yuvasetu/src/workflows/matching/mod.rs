//! Student-to-internship matching: domain records, the scoring engine, storage seams, and
//! the HTTP router that exposes them.

pub mod domain;
pub mod evaluation;
mod lenient;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AllocationRequest, AllocationStatus, InternshipPosting, NewPosting, PostingId,
    StudentCategory, StudentId, StudentProfile,
};
pub use evaluation::{
    MatchEngine, MatchEvaluation, MatchFactor, ScoreComponent, ScoredMatch, ScoringWeights,
    DEFAULT_TOP_N,
};
pub use repository::{AllocationRecord, AllocationRepository, PostingRepository, RepositoryError};
pub use router::{matching_router, MatchRequest, MatchResponse};
pub use service::{MatchService, MatchServiceError};
