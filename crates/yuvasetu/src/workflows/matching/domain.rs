use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Identifier wrapper for internship postings. Opaque to the matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostingId(pub String);

/// Identifier wrapper for students recorded against allocations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Reservation categories recognised by the placement scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentCategory {
    General,
    #[serde(rename = "SC")]
    Sc,
    #[serde(rename = "ST")]
    St,
    #[serde(rename = "OBC")]
    Obc,
    #[serde(rename = "EWS")]
    Ews,
}

impl StudentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            StudentCategory::General => "General",
            StudentCategory::Sc => "SC",
            StudentCategory::St => "ST",
            StudentCategory::Obc => "OBC",
            StudentCategory::Ews => "EWS",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "General" => Some(StudentCategory::General),
            "SC" => Some(StudentCategory::Sc),
            "ST" => Some(StudentCategory::St),
            "OBC" => Some(StudentCategory::Obc),
            "EWS" => Some(StudentCategory::Ews),
            _ => None,
        }
    }

    /// `General` is the baseline; every other category receives the diversity boost.
    pub fn is_boosted(&self) -> bool {
        !matches!(self, StudentCategory::General)
    }
}

/// Student-supplied profile consumed by the matcher.
///
/// Fields decode leniently: a value of the wrong JSON shape is treated as absent so the
/// corresponding scoring factor is skipped instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub first_timer: bool,
    #[serde(default, deserialize_with = "lenient::category")]
    pub category: Option<StudentCategory>,
}

/// Internship opportunity as stored by the posting repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipPosting {
    #[serde(default, alias = "_id")]
    pub id: PostingId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub skills: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient::seat_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub allocated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Seats assumed for a posting that does not state its capacity.
pub const DEFAULT_CAPACITY: i64 = 1;
/// Fill count assumed for a posting that does not state it.
pub const DEFAULT_ALLOCATED: i64 = 0;

impl InternshipPosting {
    /// Seats still available for allocation, never negative.
    pub fn open_seats(&self) -> i64 {
        self.capacity
            .unwrap_or(DEFAULT_CAPACITY)
            .saturating_sub(self.allocated.unwrap_or(DEFAULT_ALLOCATED))
            .max(0)
    }
}

/// Payload accepted when publishing a new posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosting {
    pub title: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub allocated: Option<i64>,
    #[serde(default)]
    pub description: String,
}

/// Whether an allocation secured a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Allocated,
    Waitlisted,
}

impl AllocationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AllocationStatus::Allocated => "allocated",
            AllocationStatus::Waitlisted => "waitlisted",
        }
    }
}

/// Request to place a student on a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub student_id: StudentId,
    pub student_profile: StudentProfile,
    pub internship_id: PostingId,
}
