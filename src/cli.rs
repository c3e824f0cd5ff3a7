//! Command-line interface definitions for Subject Research.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for the Subject Research application.
///
/// # Examples
///
/// ```sh
/// # Interactive prompt, reports written to the current directory
/// subject_research
///
/// # Job-market profile, reports under ./reports
/// subject_research -p jobs -o ./reports
///
/// # One query from a custom profile file, then exit
/// subject_research -c profile.yaml --query "dell,layoff,2025"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the JSON and HTML reports
    #[arg(short, long, env = "SUBJECT_RESEARCH_OUTPUT_DIR", default_value = ".")]
    pub output_dir: String,

    /// Optional path to a YAML research profile (overrides --profile)
    #[arg(short, long, env = "SUBJECT_RESEARCH_CONFIG")]
    pub config: Option<String>,

    /// Built-in profile name: `research` or `jobs`
    #[arg(short, long, env = "SUBJECT_RESEARCH_PROFILE", default_value = "research")]
    pub profile: String,

    /// Run a single query (`subject[,topic[,year[,location]]]`) instead of prompting
    #[arg(long)]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["subject_research"]);

        assert_eq!(cli.output_dir, ".");
        assert_eq!(cli.profile, "research");
        assert!(cli.config.is_none());
        assert!(cli.query.is_none());
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "subject_research",
            "--output-dir",
            "./reports",
            "--profile",
            "jobs",
            "--query",
            "Data Scientist,hiring,2024,Boston",
        ]);

        assert_eq!(cli.output_dir, "./reports");
        assert_eq!(cli.profile, "jobs");
        assert_eq!(cli.query.as_deref(), Some("Data Scientist,hiring,2024,Boston"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "subject_research",
            "-o",
            "/tmp/reports",
            "-c",
            "/tmp/profile.yaml",
        ]);

        assert_eq!(cli.output_dir, "/tmp/reports");
        assert_eq!(cli.config.as_deref(), Some("/tmp/profile.yaml"));
    }
}
