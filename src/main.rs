//! # Subject Research
//!
//! An interactive research tool: given a subject (a company, a job title,
//! a technology), it queries a set of public sources, extracts result
//! records, derives a summary, and writes a JSON and an HTML report.
//!
//! ## Features
//!
//! - Web search, Google News RSS, Bing News, Reddit, GitHub, Stack Overflow,
//!   Wikipedia and layoffs.fyi sources
//! - Per-source failures are recorded in the report instead of aborting the run
//! - Sentiment, market outlook, skill, salary and trending keyword summaries
//! - Built-in `research` and `jobs` profiles, or a custom YAML profile
//!
//! ## Usage
//!
//! ```sh
//! subject_research -o ./reports
//! Enter subject,topic,year,location (or 'quit'): dell,layoff,2025
//! ```
//!
//! ## Architecture
//!
//! 1. **Query**: Parse `subject[,topic[,year[,location]]]`
//! 2. **Fetching**: Query every source of the profile (bounded concurrency, shared deadline)
//! 3. **Extraction**: Turn each response into records; failures become typed section errors
//! 4. **Aggregation**: Derive the summary
//! 5. **Output**: Write the JSON and HTML reports

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod analysis;
mod cli;
mod config;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod query;
mod scrapers;
mod utils;

use cli::Cli;
use config::Profile;
use fetch::{Fetch, HttpFetcher};
use pipeline::Pipeline;
use query::QueryError;
use utils::ensure_writable_dir;

const PROMPT: &str = "Enter subject,topic,year,location (or 'quit'): ";

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    info!("subject_research starting up");

    let args = Cli::parse();
    debug!(?args.output_dir, ?args.config, ?args.profile, "Parsed CLI arguments");

    let profile = match &args.config {
        Some(path) => Profile::load(path).await?,
        None => Profile::builtin(&args.profile)
            .ok_or_else(|| format!("unknown profile '{}' (expected research or jobs)", args.profile))?,
    };
    info!(profile = %profile.name, sources = profile.sources.len(), "Loaded research profile");

    // Early check: ensure output dir is writable
    let output_dir = Path::new(&args.output_dir);
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new(&profile.user_agent, profile.timeout())?;
    let pipeline = Pipeline::new(fetcher, profile);

    if let Some(line) = &args.query {
        return run_once(&pipeline, line, output_dir).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if is_exit(&line) {
            break;
        }
        if let Err(e) = run_once(&pipeline, &line, output_dir).await {
            error!(error = %e, "Research failed; ready for the next subject");
        }
    }

    info!("Goodbye");
    Ok(())
}

/// Research one input line and write its reports.
async fn run_once<F: Fetch>(
    pipeline: &Pipeline<F>,
    line: &str,
    output_dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    let report = match pipeline.research_line(line).await {
        Ok(report) => report,
        Err(QueryError::EmptySubject) => {
            println!("Please enter a subject, e.g. dell,layoff,2025");
            return Ok(());
        }
    };

    let written = outputs::write_all(&report, output_dir).await?;

    for line in outputs::console::summary_lines(&report) {
        println!("{line}");
    }
    println!("JSON report: {}", written.json.display());
    println!("HTML report: {}", written.html.display());

    let elapsed = start_time.elapsed();
    info!(
        query = %report.query.to_line(),
        profile = %pipeline.profile().name,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Research complete"
    );
    Ok(())
}

fn is_exit(line: &str) -> bool {
    let token = line.trim();
    ["quit", "exit", "q"]
        .iter()
        .any(|t| token.eq_ignore_ascii_case(t))
}
