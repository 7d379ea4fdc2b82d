use super::super::domain::{InternshipPosting, StudentProfile};
use super::config::ScoringWeights;
use super::{rules, ScoredMatch};

/// Score every posting, order by score descending, and keep the first `limit`.
///
/// Ties keep the caller's input order: `sort_by` is stable, so equal scores never swap.
pub(crate) fn rank_postings(
    student: &StudentProfile,
    postings: &[InternshipPosting],
    weights: &ScoringWeights,
    limit: usize,
) -> Vec<ScoredMatch> {
    if limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredMatch> = postings
        .iter()
        .map(|posting| {
            let (components, score) = rules::score_posting(student, posting, weights);
            ScoredMatch {
                posting: posting.clone(),
                score,
                explanation: components
                    .into_iter()
                    .map(|component| component.note)
                    .collect(),
            }
        })
        .collect();

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored.truncate(limit);
    scored
}
