//! Wikipedia page summary.
//!
//! Uses the REST summary endpoint, which returns the lead paragraph of the
//! page named after the subject. The result is a single record.

use super::non_empty;
use crate::fetch::FetchError;
use crate::models::Record;
use serde::Deserialize;

const SUMMARY_BASE: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

#[derive(Debug, Deserialize)]
struct PageSummary {
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: PageUrl,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: String,
}

/// Summary URL for the page titled `subject`.
pub fn request_url(subject: &str) -> String {
    let title = subject.trim().replace(' ', "_");
    format!("{SUMMARY_BASE}/{}", urlencoding::encode(&title))
}

/// Parse a summary payload into one record.
pub fn extract(body: &str) -> Result<Vec<Record>, FetchError> {
    let summary: PageSummary = serde_json::from_str(body)?;
    let record = Record {
        title: Some(summary.title),
        link: summary.content_urls.map(|u| u.desktop.page),
        snippet: non_empty(summary.extract),
        origin: summary.description.and_then(non_empty),
        ..Record::default()
    };
    Ok(vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        assert_eq!(
            request_url("Dell Technologies"),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Dell_Technologies"
        );
    }

    #[test]
    fn test_extract_summary() {
        let body = r#"{
            "type": "standard",
            "title": "Dell",
            "description": "American technology company",
            "extract": "Dell Inc. is an American technology company.",
            "content_urls": {
                "desktop": { "page": "https://en.wikipedia.org/wiki/Dell" },
                "mobile": { "page": "https://en.m.wikipedia.org/wiki/Dell" }
            }
        }"#;
        let records = extract(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Dell"));
        assert_eq!(records[0].link.as_deref(), Some("https://en.wikipedia.org/wiki/Dell"));
        assert_eq!(
            records[0].snippet.as_deref(),
            Some("Dell Inc. is an American technology company.")
        );
        assert_eq!(records[0].origin.as_deref(), Some("American technology company"));
    }

    #[test]
    fn test_extract_error_payload_fails() {
        let body = r#"{"type": "https://mediawiki.org/wiki/HyperSwitch/errors/not_found", "detail": "Not found."}"#;
        assert!(matches!(extract(body), Err(FetchError::Parse { .. })));
    }
}
