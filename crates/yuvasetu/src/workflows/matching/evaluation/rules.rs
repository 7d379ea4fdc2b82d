use std::collections::HashSet;

use super::super::domain::{InternshipPosting, StudentProfile};
use super::config::ScoringWeights;
use super::{MatchFactor, ScoreComponent};

pub(crate) fn score_posting(
    student: &StudentProfile,
    posting: &InternshipPosting,
    weights: &ScoringWeights,
) -> (Vec<ScoreComponent>, i32) {
    let components: Vec<ScoreComponent> = [
        skill_overlap(student, posting, weights),
        location_match(student, posting, weights),
        first_timer_bonus(student, weights),
        diversity_boost(student, weights),
        capacity_signal(posting, weights),
    ]
    .into_iter()
    .flatten()
    .filter(|component| component.points != 0)
    .collect();

    let total_score = components
        .iter()
        .fold(0i32, |total, component| total.saturating_add(component.points));

    (components, total_score)
}

fn skill_overlap(
    student: &StudentProfile,
    posting: &InternshipPosting,
    weights: &ScoringWeights,
) -> Option<ScoreComponent> {
    let (Some(student_skills), Some(posting_skills)) = (&student.skills, &posting.skills) else {
        return None;
    };

    let wanted: HashSet<String> = posting_skills
        .iter()
        .map(|skill| skill.to_lowercase())
        .collect();
    let matched: Vec<&str> = student_skills
        .iter()
        .filter(|skill| wanted.contains(&skill.to_lowercase()))
        .map(String::as_str)
        .collect();

    if matched.is_empty() {
        return None;
    }

    let count = i32::try_from(matched.len()).unwrap_or(i32::MAX);
    let points = weights.skill_points.saturating_mul(count);
    Some(ScoreComponent {
        factor: MatchFactor::SkillOverlap,
        points,
        note: format!("Skills matched: {} ({})", matched.join(", "), signed(points)),
    })
}

fn location_match(
    student: &StudentProfile,
    posting: &InternshipPosting,
    weights: &ScoringWeights,
) -> Option<ScoreComponent> {
    let student_location = student.location.as_deref().filter(|value| !value.is_empty())?;
    let posting_location = posting.location.as_deref().filter(|value| !value.is_empty())?;

    if student_location.to_lowercase() != posting_location.to_lowercase() {
        return None;
    }

    Some(ScoreComponent {
        factor: MatchFactor::Location,
        points: weights.location_points,
        note: format!("Location match ({})", signed(weights.location_points)),
    })
}

fn first_timer_bonus(student: &StudentProfile, weights: &ScoringWeights) -> Option<ScoreComponent> {
    if !student.first_timer {
        return None;
    }

    Some(ScoreComponent {
        factor: MatchFactor::FirstTimer,
        points: weights.first_timer_points,
        note: format!("First-timer bonus ({})", signed(weights.first_timer_points)),
    })
}

fn diversity_boost(student: &StudentProfile, weights: &ScoringWeights) -> Option<ScoreComponent> {
    let category = student.category.filter(|category| category.is_boosted())?;

    Some(ScoreComponent {
        factor: MatchFactor::Diversity,
        points: weights.diversity_points,
        note: format!(
            "Diversity boost ({}) ({})",
            category.label(),
            signed(weights.diversity_points)
        ),
    })
}

// Only one capacity branch ever applies, and both need a nonzero capacity.
fn capacity_signal(posting: &InternshipPosting, weights: &ScoringWeights) -> Option<ScoreComponent> {
    let capacity = posting.capacity.filter(|capacity| *capacity != 0)?;
    let allocated = posting.allocated?;

    if allocated >= capacity {
        let points = weights.full_penalty.saturating_neg();
        return Some(ScoreComponent {
            factor: MatchFactor::Capacity,
            points,
            note: format!("Internship full ({})", signed(points)),
        });
    }

    if allocated < 0 {
        return None;
    }

    let available = capacity.saturating_sub(allocated);
    if available < weights.high_availability_threshold {
        return None;
    }

    Some(ScoreComponent {
        factor: MatchFactor::Capacity,
        points: weights.high_availability_points,
        note: format!(
            "High availability ({})",
            signed(weights.high_availability_points)
        ),
    })
}

fn signed(points: i32) -> String {
    if points < 0 {
        points.to_string()
    } else {
        format!("+{points}")
    }
}
