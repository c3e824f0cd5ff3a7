//! Source request builders and extractors.
//!
//! Each source family lives in its own submodule and follows the same
//! two-phase pattern:
//!
//! 1. **Request**: `request_url(...)` builds the GET URL from the query terms
//! 2. **Extraction**: `extract(...)` turns the response body into [`Record`]s
//!
//! Extractors are pure functions over the body text. Network I/O is done by
//! the caller through [`crate::fetch::Fetch`].
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Google web search | [`search`] | HTML, `div.g` containers |
//! | layoffs.fyi | [`layoffs`] | HTML text patterns + first table |
//! | Wikipedia | [`wikipedia`] | REST page summary JSON |
//! | Reddit | [`reddit`] | `search.json` |
//! | GitHub | [`github`] | Search API JSON |
//! | Stack Overflow | [`stackoverflow`] | Stack Exchange API JSON |
//! | Google News / Bing News | [`news`] | RSS 2.0 / HTML cards |

pub mod github;
pub mod layoffs;
pub mod news;
pub mod reddit;
pub mod search;
pub mod stackoverflow;
pub mod wikipedia;

use crate::config::{SourceKind, SourceSpec};
use crate::fetch::FetchError;
use crate::models::{LayoffStat, Record};
use crate::query::Query;
use itertools::Itertools;
use scraper::ElementRef;

/// What one source body yielded.
#[derive(Debug, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub layoff_stats: Vec<LayoffStat>,
}

impl From<Vec<Record>> for Extraction {
    fn from(records: Vec<Record>) -> Self {
        Self {
            records,
            layoff_stats: Vec::new(),
        }
    }
}

/// Fill a search template from the query.
///
/// Placeholders: `{subject}`, `{topic}`, `{year}`, `{location}`. Runs of
/// whitespace left by blank fields collapse to one space. With `exact`, the
/// subject is quoted.
pub fn render_terms(template: &str, query: &Query, default_year: &str, exact: bool) -> String {
    let subject = if exact {
        format!("\"{}\"", query.subject)
    } else {
        query.subject.clone()
    };
    template
        .replace("{subject}", &subject)
        .replace("{topic}", &query.topic)
        .replace("{year}", query.year_or(default_year))
        .replace("{location}", &query.location)
        .split_whitespace()
        .join(" ")
}

/// Build the GET URL for a configured source.
pub fn request_url(spec: &SourceSpec, query: &Query, default_year: &str) -> String {
    let terms = |template: &str| render_terms(template, query, default_year, false);
    match &spec.kind {
        SourceKind::WebSearch {
            template,
            site,
            exact,
        } => {
            let terms = render_terms(template, query, default_year, *exact);
            search::request_url(&terms, site.as_deref())
        }
        SourceKind::BingNews { template } => news::bing_request_url(&terms(template)),
        SourceKind::Layoffs { .. } => layoffs::PAGE_URL.to_string(),
        SourceKind::Wikipedia => wikipedia::request_url(&query.subject),
        SourceKind::Reddit { template } => reddit::request_url(&terms(template), spec.limit),
        SourceKind::Github { template, target } => {
            github::request_url(&terms(template), *target, spec.limit)
        }
        SourceKind::StackOverflow { template } => {
            stackoverflow::request_url(&terms(template), spec.limit)
        }
        SourceKind::GoogleNews { template } => news::google_request_url(&terms(template)),
    }
}

/// Run the extractor matching the source family over a response body.
pub fn extract(spec: &SourceSpec, body: &str) -> Result<Extraction, FetchError> {
    let limit = spec.limit;
    let extraction: Extraction = match &spec.kind {
        SourceKind::WebSearch { .. } => search::extract(body, limit).into(),
        SourceKind::BingNews { .. } => news::extract_bing(body, limit).into(),
        SourceKind::Layoffs { years } => layoffs::extract(body, years, limit)?,
        SourceKind::Wikipedia => wikipedia::extract(body)?.into(),
        SourceKind::Reddit { .. } => reddit::extract(body, limit)?.into(),
        SourceKind::Github { target, .. } => github::extract(body, *target, limit)?.into(),
        SourceKind::StackOverflow { .. } => stackoverflow::extract(body, limit)?.into(),
        SourceKind::GoogleNews { .. } => news::extract_google(body, limit)?.into(),
    };
    Ok(extraction)
}

/// Whether a source's records count toward the report total.
pub fn is_counted(kind: &SourceKind) -> bool {
    !matches!(kind, SourceKind::Wikipedia)
}

/// Visible text of an element with whitespace normalized.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).join(" ")
}

/// Truncate on a character boundary, appending an ellipsis when cut.
pub(crate) fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

/// `Some(text)` unless the trimmed text is empty.
pub(crate) fn non_empty(text: impl AsRef<str>) -> Option<String> {
    let trimmed = text.as_ref().trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
