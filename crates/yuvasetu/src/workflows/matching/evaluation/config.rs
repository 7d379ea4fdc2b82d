use serde::{Deserialize, Serialize};

/// Point values for each scoring factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill_points: i32,
    pub location_points: i32,
    pub first_timer_points: i32,
    pub diversity_points: i32,
    pub full_penalty: i32,
    pub high_availability_points: i32,
    pub high_availability_threshold: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_points: 6,
            location_points: 4,
            first_timer_points: 3,
            diversity_points: 2,
            full_penalty: 10,
            high_availability_points: 1,
            high_availability_threshold: 3,
        }
    }
}
