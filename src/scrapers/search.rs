//! Web search result scraping.
//!
//! Result pages are parsed by container class: every `div.g` is one result,
//! with the title in `h3`, the target in the first `a[href]` and the
//! description in `span.aCOpRe` or `div.VwiC3b`. Results missing a title or
//! link are skipped. These class names track the live markup and break
//! silently when it changes; the section then simply comes back empty.

use super::{element_text, non_empty};
use crate::models::Record;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

const SEARCH_BASE: &str = "https://www.google.com";

static RESULT: Lazy<Selector> = Lazy::new(|| Selector::parse("div.g").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DESCRIPTION: Lazy<[Selector; 2]> = Lazy::new(|| {
    [
        Selector::parse("span.aCOpRe").unwrap(),
        Selector::parse("div.VwiC3b").unwrap(),
    ]
});

/// Search URL for `terms`, optionally restricted to one `site`.
pub fn request_url(terms: &str, site: Option<&str>) -> String {
    let q = match site {
        Some(site) => format!("site:{site} {terms}"),
        None => terms.to_string(),
    };
    format!("{SEARCH_BASE}/search?q={}", urlencoding::encode(&q))
}

/// Extract up to `limit` results from a search result page.
pub fn extract(html: &str, limit: usize) -> Vec<Record> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for result in document.select(&RESULT).take(limit) {
        let Some(title) = result.select(&TITLE).next().map(element_text) else {
            continue;
        };
        let Some(href) = result
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            continue;
        };

        let snippet = DESCRIPTION
            .iter()
            .find_map(|sel| result.select(sel).next())
            .map(element_text)
            .and_then(non_empty);

        records.push(Record {
            snippet,
            ..Record::linked(title, resolve_link(href))
        });
    }

    debug!(count = records.len(), "Extracted search results");
    records
}

/// Unwrap `/url?q=<target>` redirect links and resolve relative hrefs.
fn resolve_link(href: &str) -> String {
    let Ok(base) = Url::parse(SEARCH_BASE) else {
        return href.to_string();
    };
    match base.join(href) {
        Ok(url) if url.path() == "/url" && url.host_str() == base.host_str() => url
            .query_pairs()
            .find(|(k, _)| k == "q" || k == "url")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_else(|| url.to_string()),
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}
