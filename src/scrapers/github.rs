//! GitHub search API (issues or repositories).

use super::{clip, non_empty};
use crate::config::GithubTarget;
use crate::fetch::FetchError;
use crate::models::Record;
use serde::Deserialize;

const API_BASE: &str = "https://api.github.com/search";
const BODY_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
struct SearchResults<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Issue {
    title: String,
    html_url: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    comments: u64,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
    html_url: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

pub fn request_url(terms: &str, target: GithubTarget, limit: usize) -> String {
    let q = urlencoding::encode(terms);
    match target {
        GithubTarget::Issues => {
            format!("{API_BASE}/issues?q={q}&sort=created&order=desc&per_page={limit}")
        }
        GithubTarget::Repositories => {
            format!("{API_BASE}/repositories?q={q}&sort=stars&order=desc&per_page={limit}")
        }
    }
}

pub fn extract(body: &str, target: GithubTarget, limit: usize) -> Result<Vec<Record>, FetchError> {
    let records = match target {
        GithubTarget::Issues => {
            let results: SearchResults<Issue> = serde_json::from_str(body)?;
            results
                .items
                .into_iter()
                .take(limit)
                .map(|issue| Record {
                    snippet: issue.body.and_then(|b| non_empty(clip(b.trim(), BODY_CHARS))),
                    published: issue.created_at,
                    comments: Some(issue.comments.to_string()),
                    origin: issue.state,
                    ..Record::linked(issue.title, issue.html_url)
                })
                .collect()
        }
        GithubTarget::Repositories => {
            let results: SearchResults<Repository> = serde_json::from_str(body)?;
            results
                .items
                .into_iter()
                .take(limit)
                .map(|repo| Record {
                    snippet: repo.description.and_then(non_empty),
                    published: repo.updated_at,
                    score: Some(repo.stargazers_count.to_string()),
                    origin: repo.language,
                    ..Record::linked(repo.full_name, repo.html_url)
                })
                .collect()
        }
    };
    Ok(records)
}
