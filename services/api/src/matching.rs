use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use yuvasetu::config::AppConfig;
use yuvasetu::error::AppError;
use yuvasetu::workflows::import::PostingCsvImporter;
use yuvasetu::workflows::matching::{MatchEngine, ScoredMatch, StudentProfile};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Student profile as a JSON document
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Internship postings as a CSV export
    #[arg(long)]
    pub(crate) internships: PathBuf,
    /// Number of matches to print (defaults to APP_MATCH_TOP_N)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) top_n: Option<i64>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        internships,
        top_n,
    } = args;

    let config = AppConfig::load()?;
    let top_n = top_n.unwrap_or_else(|| {
        i64::try_from(config.matching.default_top_n).unwrap_or(i64::MAX)
    });

    let reader = BufReader::new(File::open(&profile)?);
    let student: StudentProfile = serde_json::from_reader(reader)?;
    let postings = PostingCsvImporter::from_path(&internships)?;

    let matches = MatchEngine::default().rank(Some(&student), Some(postings.as_slice()), top_n);

    println!("Internship matches");
    println!(
        "Profile: {} | Postings: {} | Showing top {}",
        profile.display(),
        postings.len(),
        top_n.max(0)
    );
    for line in render_matches(&matches) {
        println!("{line}");
    }

    Ok(())
}

pub(crate) fn render_matches(matches: &[ScoredMatch]) -> Vec<String> {
    if matches.is_empty() {
        return vec!["\nNo matching internships".to_string()];
    }

    let mut lines = Vec::new();
    for (rank, scored) in matches.iter().enumerate() {
        let organization = scored
            .posting
            .organization
            .as_deref()
            .unwrap_or("unknown organization");
        lines.push(format!(
            "\n{}. {} ({}) [{}] score {}",
            rank + 1,
            scored.posting.title,
            organization,
            scored.posting.id.0,
            scored.score
        ));
        for note in &scored.explanation {
            lines.push(format!("   - {note}"));
        }
    }
    lines
}
