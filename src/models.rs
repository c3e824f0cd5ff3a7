//! Data models for extracted records and the per-query report.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Record`]: One item extracted from a source (title, link, snippet, ...)
//! - [`Section`]: One configured source's outcome, records or a typed failure
//! - [`Report`]: Every section for a query plus the derived [`Summary`]
//!
//! A [`Report`] is built once per query and serialized unchanged to both JSON
//! and HTML, so everything the HTML shows is recoverable from the JSON.

use crate::analysis::{
    InterviewPrep, KeywordCount, MarketAssessment, MarketOutlook, SalaryRange, Sentiment,
    SkillProfile,
};
use crate::fetch::FetchError;
use crate::query::Query;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One extracted item.
///
/// Sources fill whichever fields they have; absent fields are skipped
/// when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Description, preview or summary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Publication date as the source prints it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    /// Votes, stars, or laid-off head count depending on the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    /// Comment or answer count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Sub-source: subreddit, news outlet, repository language...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Record {
    /// A record with a title and a link, the minimum most extractors require.
    pub fn linked(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Text used by the keyword classifiers: title and snippet joined.
    pub fn text(&self) -> String {
        match (&self.title, &self.snippet) {
            (Some(t), Some(s)) => format!("{t} {s}"),
            (Some(t), None) => t.clone(),
            (None, Some(s)) => s.clone(),
            (None, None) => String::new(),
        }
    }
}

/// The outcome of one configured source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Stable key from the profile, e.g. `reddit_discussions`.
    pub key: String,
    /// Human-readable heading.
    pub title: String,
    /// Whether this section contributes to the total record count.
    /// Summary-style sources such as Wikipedia are not counted.
    #[serde(default = "default_counted")]
    pub counted: bool,
    /// Extracted records; always empty when `error` is set.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Why the source produced nothing, if it failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
}

fn default_counted() -> bool {
    true
}

impl Section {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Headline figures scraped from the layoffs tracker for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoffStat {
    pub year: String,
    pub employees_laid_off: String,
    pub companies_affected: String,
}

/// Derived fields computed from all sections of a [`Report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub subject: String,
    pub topic: String,
    pub year: String,
    pub location: String,
    /// Sum of record counts over counted sections.
    pub total_records: usize,
    /// Number of sections holding at least one record.
    pub sources_with_results: usize,
    /// Keys of sections whose fetch or extraction failed.
    pub failed_sources: Vec<String>,
    pub sentiment: Sentiment,
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub market_outlook: MarketOutlook,
    /// Combined record count of the profile's outlook sections.
    pub outlook_score: usize,
    pub skills: SkillProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<SalaryRange>,
    pub trending: Vec<KeywordCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layoff_impact: Option<String>,
    /// Hiring tier over the postings sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hiring_trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_assessment: Option<MarketAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_signal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview: Option<InterviewPrep>,
    pub key_findings: Vec<String>,
    /// Keys of every section present in the report, in catalog order.
    pub section_keys: Vec<String>,
    pub generated_at: String,
}

/// The full result of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub query: Query,
    /// Name of the profile that produced this report.
    pub profile: String,
    pub generated_at: DateTime<Local>,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub layoff_stats: Vec<LayoffStat>,
    pub summary: Summary,
}

impl Report {
    /// Look up a section by key.
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_text_joins_title_and_snippet() {
        let mut record = Record::linked("Growth ahead", "https://example.com");
        assert_eq!(record.text(), "Growth ahead");
        record.snippet = Some("hiring is up".to_string());
        assert_eq!(record.text(), "Growth ahead hiring is up");
        assert_eq!(Record::default().text(), "");
    }

    #[test]
    fn test_record_skips_absent_fields() {
        let record = Record::linked("Title", "https://example.com");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"title":"Title","link":"https://example.com"}"#);
    }

    #[test]
    fn test_section_deserialization_defaults() {
        let json = r#"{"key": "reddit", "title": "Reddit"}"#;
        let section: Section = serde_json::from_str(json).unwrap();
        assert!(section.counted);
        assert!(section.records.is_empty());
        assert!(!section.is_failed());
    }

    #[test]
    fn test_failed_section_serialization() {
        let section = Section {
            key: "github".to_string(),
            title: "GitHub".to_string(),
            counted: true,
            records: vec![],
            error: Some(FetchError::Status { status: 403 }),
        };
        let json = serde_json::to_string(&section).unwrap();
        assert!(json.contains(r#""records":[]"#));
        assert!(json.contains(r#""kind":"status""#));
        let back: Section = serde_json::from_str(&json).unwrap();
        assert_eq!(back, section);
    }
}
