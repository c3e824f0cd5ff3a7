//! Reddit search via the public `search.json` listing.

use super::{clip, non_empty};
use crate::fetch::FetchError;
use crate::models::Record;
use serde::Deserialize;

const REDDIT_BASE: &str = "https://www.reddit.com";
const SELFTEXT_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    permalink: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    subreddit: Option<String>,
}

pub fn request_url(terms: &str, limit: usize) -> String {
    format!(
        "{REDDIT_BASE}/search.json?q={}&sort=relevance&limit={limit}",
        urlencoding::encode(terms)
    )
}

pub fn extract(body: &str, limit: usize) -> Result<Vec<Record>, FetchError> {
    let listing: Listing = serde_json::from_str(body)?;
    let records = listing
        .data
        .children
        .into_iter()
        .take(limit)
        .map(|Child { data: post }| Record {
            snippet: non_empty(clip(post.selftext.trim(), SELFTEXT_CHARS)),
            score: Some(post.score.to_string()),
            comments: Some(post.num_comments.to_string()),
            origin: post.subreddit.map(|s| format!("r/{s}")),
            ..Record::linked(post.title, format!("{REDDIT_BASE}{}", post.permalink))
        })
        .collect();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": null,
            "children": [
                {"kind": "t3", "data": {
                    "title": "Dell layoffs megathread",
                    "permalink": "/r/cscareerquestions/comments/abc/dell_layoffs/",
                    "selftext": "Post your experiences here.",
                    "score": 412, "num_comments": 230, "subreddit": "cscareerquestions"
                }},
                {"kind": "t3", "data": {
                    "title": "Link post",
                    "permalink": "/r/technology/comments/def/link/",
                    "selftext": "",
                    "score": -3, "num_comments": 0, "subreddit": "technology"
                }}
            ]
        }
    }"#;

    #[test]
    fn test_request_url() {
        assert_eq!(
            request_url("dell layoff", 10),
            "https://www.reddit.com/search.json?q=dell%20layoff&sort=relevance&limit=10"
        );
    }

    #[test]
    fn test_extract_posts() {
        let records = extract(BODY, 10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title.as_deref(), Some("Dell layoffs megathread"));
        assert_eq!(
            records[0].link.as_deref(),
            Some("https://www.reddit.com/r/cscareerquestions/comments/abc/dell_layoffs/")
        );
        assert_eq!(records[0].score.as_deref(), Some("412"));
        assert_eq!(records[0].comments.as_deref(), Some("230"));
        assert_eq!(records[0].origin.as_deref(), Some("r/cscareerquestions"));
        assert_eq!(records[1].snippet, None);
        assert_eq!(records[1].score.as_deref(), Some("-3"));
    }

    #[test]
    fn test_extract_truncates() {
        assert_eq!(extract(BODY, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_error_body() {
        let body = r#"{"message": "Too Many Requests", "error": 429}"#;
        assert!(matches!(extract(body, 10), Err(FetchError::Parse { .. })));
    }
}
