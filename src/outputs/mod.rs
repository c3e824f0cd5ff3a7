//! Output generation for JSON, HTML and the terminal.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`Report`] as indented JSON
//! - [`html`]: Renders the [`Report`] as a styled static page
//! - [`console`]: Short plain-text summary for the prompt loop
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── dell_research_report_20250304_050607.json
//! └── dell_research_report_20250304_050607.html
//! ```

pub mod console;
pub mod html;
pub mod json;

use crate::models::Report;
use crate::utils::report_stem;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Paths of the files written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub json: PathBuf,
    pub html: PathBuf,
}

/// Write both the JSON and HTML renditions of `report` into `dir`.
pub async fn write_all(report: &Report, dir: &Path) -> Result<WrittenReport, Box<dyn Error>> {
    let stem = report_stem(&report.query.subject, &report.generated_at);
    let json = json::write_report(report, dir, &stem).await?;
    let html = html::write_report(report, dir, &stem).await?;
    Ok(WrittenReport { json, html })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Profile;
    use crate::fetch::FetchError;
    use crate::pipeline::Pipeline;
    use crate::pipeline::tests::one_record_each;
    use crate::query::Query;
    use chrono::{Local, TimeZone};

    #[tokio::test]
    async fn test_end_to_end_writes_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(one_record_each(), Profile::research());
        let at = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let report = pipeline
            .research(Query::parse("dell,layoff,2025").unwrap(), at)
            .await;

        let written = write_all(&report, tmp.path()).await.unwrap();
        assert_eq!(
            written.json,
            tmp.path().join("dell_research_report_20250304_050607.json")
        );
        assert_eq!(
            written.html,
            tmp.path().join("dell_research_report_20250304_050607.html")
        );

        let raw = tokio::fs::read_to_string(&written.json).await.unwrap();
        let back: Report = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.summary.sources_with_results, report.sections.len());

        let page = tokio::fs::read_to_string(&written.html).await.unwrap();
        assert_eq!(page, html::render_report(&back));
        assert!(page.contains("Dell layoff thread"));
    }

    #[tokio::test]
    async fn test_total_failure_still_writes_valid_outputs() {
        struct Offline;
        impl crate::fetch::Fetch for Offline {
            async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
                Err(FetchError::Network {
                    message: "connection refused".to_string(),
                })
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(Offline, Profile::jobs());
        let report = pipeline.research_line("Data Scientist").await.unwrap();
        assert!(report.sections.iter().all(|s| s.records.is_empty()));

        let written = write_all(&report, tmp.path()).await.unwrap();
        let file_name = written.json.file_name().unwrap().to_string_lossy().into_owned();
        assert!(file_name.starts_with("Data_Scientist_research_report_"));

        let raw = tokio::fs::read_to_string(&written.json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["summary"]["total_records"], 0);
        assert_eq!(value["sections"][0]["records"], serde_json::json!([]));

        let page = tokio::fs::read_to_string(&written.html).await.unwrap();
        assert!(page.contains("Source unavailable: network error: connection refused"));
    }
}
