//! Bulk loading of internship postings from CSV exports.

mod parser;

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::workflows::matching::InternshipPosting;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read posting export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid posting CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads postings from a CSV export with an `id,title,organization,location,skills,capacity,
/// allocated,description` header. `skills` cells hold a `;`-separated list.
pub struct PostingCsvImporter;

impl PostingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<InternshipPosting>, ImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let postings = Self::from_reader(file)?;
        info!(path = %path.display(), count = postings.len(), "imported internship postings");
        Ok(postings)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<InternshipPosting>, ImportError> {
        Ok(parser::parse_postings(reader)?)
    }
}
