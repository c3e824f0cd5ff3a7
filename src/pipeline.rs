//! One research pass: fetch every source, extract, aggregate.
//!
//! Sources are fetched with bounded concurrency under one shared deadline.
//! `buffered` keeps results in catalog order, so the report lists sections
//! exactly as the profile declares them regardless of arrival order.

use crate::aggregate::build_report;
use crate::config::{Profile, SourceSpec};
use crate::fetch::{Fetch, FetchError};
use crate::models::{LayoffStat, Report, Section};
use crate::query::{Query, QueryError};
use crate::scrapers::{self, Extraction};
use crate::utils::truncate_for_log;
use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, instrument, warn};

/// Drives the fetch → extract → aggregate pass for one profile.
#[derive(Debug)]
pub struct Pipeline<F> {
    fetcher: F,
    profile: Profile,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F, profile: Profile) -> Self {
        Self { fetcher, profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Parse `line` and research it. An empty subject is rejected before
    /// any request is made.
    pub async fn research_line(&self, line: &str) -> Result<Report, QueryError> {
        let query = Query::parse(line)?;
        Ok(self.research(query, Local::now()).await)
    }

    /// Query every configured source and build the report.
    ///
    /// Source failures never abort the pass; they are recorded on the
    /// matching section.
    #[instrument(level = "info", skip_all, fields(subject = %query.subject, profile = %self.profile.name))]
    pub async fn research(&self, query: Query, generated_at: DateTime<Local>) -> Report {
        let deadline = Instant::now() + self.profile.deadline();
        let concurrency = self.profile.max_concurrency.max(1);

        let outcomes: Vec<(Section, Vec<LayoffStat>)> = stream::iter(&self.profile.sources)
            .map(|spec| self.run_source(spec, &query, deadline))
            .buffered(concurrency)
            .collect()
            .await;

        let mut sections = Vec::with_capacity(outcomes.len());
        let mut layoff_stats = Vec::new();
        for (section, stats) in outcomes {
            sections.push(section);
            layoff_stats.extend(stats);
        }

        let failed = sections.iter().filter(|s| s.is_failed()).count();
        info!(
            sources = sections.len(),
            failed,
            "Completed source fetches"
        );

        build_report(&self.profile, query, sections, layoff_stats, generated_at)
    }

    async fn run_source(
        &self,
        spec: &SourceSpec,
        query: &Query,
        deadline: Instant,
    ) -> (Section, Vec<LayoffStat>) {
        let url = scrapers::request_url(spec, query, &self.profile.default_year);
        debug!(source = %spec.key, %url, "Fetching source");

        let outcome = match timeout_at(deadline, self.fetcher.fetch(&url)).await {
            Ok(Ok(body)) => scrapers::extract(spec, &body).inspect_err(|e| {
                debug!(source = %spec.key, body = %truncate_for_log(&body, 200), error = %e, "Extraction failed");
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FetchError::Timeout),
        };

        let mut section = Section {
            key: spec.key.clone(),
            title: spec.title.clone(),
            counted: scrapers::is_counted(&spec.kind),
            records: Vec::new(),
            error: None,
        };

        match outcome {
            Ok(Extraction {
                records,
                layoff_stats,
            }) => {
                info!(source = %spec.key, count = records.len(), "Source extracted");
                section.records = records;
                (section, layoff_stats)
            }
            Err(e) => {
                warn!(source = %spec.key, error = %e, "Source unavailable");
                section.error = Some(e);
                (section, Vec::new())
            }
        }
    }
}
