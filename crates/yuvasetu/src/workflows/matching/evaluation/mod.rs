//! Compatibility scoring between a student profile and internship postings.
//!
//! Factors are evaluated in a fixed order (skills, location, first-timer, diversity,
//! capacity) and each one that moves the score leaves an explanation line behind.

mod config;
mod ranking;
mod rules;

pub use config::ScoringWeights;

use super::domain::{InternshipPosting, StudentProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of matches returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_N: i64 = 5;

/// Stateless scorer shared across requests.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    weights: ScoringWeights,
}

impl MatchEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, student: &StudentProfile, posting: &InternshipPosting) -> MatchEvaluation {
        let (components, score) = rules::score_posting(student, posting, &self.weights);
        MatchEvaluation { score, components }
    }

    /// Rank `postings` for `student`, returning at most `top_n` matches.
    ///
    /// A missing student or posting list, or a non-positive `top_n`, yields no matches.
    pub fn rank(
        &self,
        student: Option<&StudentProfile>,
        postings: Option<&[InternshipPosting]>,
        top_n: i64,
    ) -> Vec<ScoredMatch> {
        let (Some(student), Some(postings)) = (student, postings) else {
            debug!("rank called without a student or posting list");
            return Vec::new();
        };

        let limit = usize::try_from(top_n).unwrap_or(0);
        let matches = ranking::rank_postings(student, postings, &self.weights, limit);

        debug!(
            postings = postings.len(),
            returned = matches.len(),
            top_n,
            "ranked internship postings"
        );

        matches
    }

    pub fn rank_default(
        &self,
        student: Option<&StudentProfile>,
        postings: Option<&[InternshipPosting]>,
    ) -> Vec<ScoredMatch> {
        self.rank(student, postings, DEFAULT_TOP_N)
    }
}

/// Scoring factor that produced a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    SkillOverlap,
    Location,
    FirstTimer,
    Diversity,
    Capacity,
}

/// Discrete contribution to a score, kept for explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: i32,
    pub note: String,
}

/// Score of a single posting together with the components behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvaluation {
    pub score: i32,
    pub components: Vec<ScoreComponent>,
}

impl MatchEvaluation {
    pub fn explanation(&self) -> Vec<String> {
        self.components
            .iter()
            .map(|component| component.note.clone())
            .collect()
    }
}

/// Ranked result: the untouched posting plus its score and explanation.
///
/// Serializes with the posting fields flattened next to `score` and `explanation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub posting: InternshipPosting,
    pub score: i32,
    pub explanation: Vec<String>,
}
