//! Stack Overflow questions via the Stack Exchange API.
//!
//! Titles come back HTML-entity encoded (`&#39;`, `&amp;`) and are decoded
//! here; escaping for the report happens again at render time.

use crate::fetch::FetchError;
use crate::models::Record;
use html_escape::decode_html_entities;
use serde::Deserialize;

const API_URL: &str = "https://api.stackexchange.com/2.3/search/advanced";

#[derive(Debug, Deserialize)]
struct Response {
    items: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct Question {
    title: String,
    link: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    answer_count: u64,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    is_answered: bool,
}

pub fn request_url(terms: &str, limit: usize) -> String {
    format!(
        "{API_URL}?order=desc&sort=relevance&q={}&site=stackoverflow&pagesize={limit}",
        urlencoding::encode(terms)
    )
}

pub fn extract(body: &str, limit: usize) -> Result<Vec<Record>, FetchError> {
    let response: Response = serde_json::from_str(body)?;
    let records = response
        .items
        .into_iter()
        .take(limit)
        .map(|q| Record {
            snippet: (!q.tags.is_empty()).then(|| q.tags.join(", ")),
            score: Some(q.score.to_string()),
            comments: Some(q.answer_count.to_string()),
            origin: Some(if q.is_answered { "answered" } else { "unanswered" }.to_string()),
            ..Record::linked(decode_html_entities(&q.title), q.link)
        })
        .collect();
    Ok(records)
}
