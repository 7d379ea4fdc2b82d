use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::matching::{InternshipPosting, PostingId};

pub(crate) fn parse_postings<R: Read>(reader: R) -> Result<Vec<InternshipPosting>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut postings = Vec::new();

    for record in csv_reader.deserialize::<PostingRow>() {
        let row = record?;
        postings.push(row.into_posting());
    }

    Ok(postings)
}

#[derive(Debug, Deserialize)]
struct PostingRow {
    id: String,
    title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    organization: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    capacity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    allocated: Option<String>,
    #[serde(default)]
    description: String,
}

impl PostingRow {
    fn into_posting(self) -> InternshipPosting {
        let skills = self.skills.as_deref().map(split_skills);
        let capacity = self.capacity.as_deref().and_then(parse_count);
        let allocated = self.allocated.as_deref().and_then(parse_count);

        InternshipPosting {
            id: PostingId(self.id),
            title: self.title,
            organization: self.organization,
            description: self.description,
            skills,
            location: self.location,
            capacity,
            allocated,
            created_at: None,
        }
    }
}

fn split_skills(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_count(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
