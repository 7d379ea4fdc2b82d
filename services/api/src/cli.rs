use crate::matching::{run_match, MatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use yuvasetu::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "YuvaSetu Matcher",
    about = "Rank internship postings for student profiles over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank postings from a CSV export for a profile stored as JSON
    Match(MatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// CSV export used to seed the in-memory posting store
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_command_parses_paths_and_top_n() {
        let cli = Cli::try_parse_from([
            "yuvasetu-api",
            "match",
            "--profile",
            "profile.json",
            "--internships",
            "postings.csv",
            "--top-n",
            "3",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Match(args)) => {
                assert_eq!(args.profile, PathBuf::from("profile.json"));
                assert_eq!(args.internships, PathBuf::from("postings.csv"));
                assert_eq!(args.top_n, Some(3));
            }
            other => panic!("expected match command, got {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["yuvasetu-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
