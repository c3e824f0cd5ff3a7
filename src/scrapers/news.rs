//! News sources: Google News RSS and Bing News result cards.
//!
//! Google News is read as an RSS 2.0 feed, taking the first `limit` items.
//! Any child element an item lacks becomes an absent field. Bing News has
//! no feed for arbitrary queries, so its HTML result cards are scraped.

use super::{element_text, non_empty};
use crate::fetch::FetchError;
use crate::models::Record;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;

const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";
const BING_NEWS: &str = "https://www.bing.com/news/search";

static CARD: Lazy<Selector> = Lazy::new(|| Selector::parse("div.news-card").unwrap());
static CARD_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("a.title").unwrap());
static CARD_SNIPPET: Lazy<Selector> = Lazy::new(|| Selector::parse("div.snippet").unwrap());

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<ItemSource>,
}

#[derive(Debug, Deserialize)]
struct ItemSource {
    #[serde(rename = "$text", default)]
    name: Option<String>,
}

pub fn google_request_url(terms: &str) -> String {
    format!(
        "{GOOGLE_NEWS_RSS}?q={}&hl=en-US&gl=US&ceid=US:en",
        urlencoding::encode(terms)
    )
}

pub fn bing_request_url(terms: &str) -> String {
    format!("{BING_NEWS}?q={}", urlencoding::encode(terms))
}

/// Parse the first `limit` items of an RSS feed.
pub fn extract_google(xml: &str, limit: usize) -> Result<Vec<Record>, FetchError> {
    let rss: Rss = quick_xml::de::from_str(xml).map_err(|e| FetchError::parse(e.to_string()))?;
    let records: Vec<Record> = rss
        .channel
        .items
        .into_iter()
        .take(limit)
        .map(|item| Record {
            title: item.title.and_then(non_empty),
            link: item.link.and_then(non_empty),
            snippet: item.description.as_deref().and_then(strip_tags),
            published: item.pub_date.and_then(non_empty),
            origin: item.source.and_then(|s| s.name).and_then(non_empty),
            ..Record::default()
        })
        .collect();
    debug!(count = records.len(), "Extracted Google News items");
    Ok(records)
}

/// Extract up to `limit` Bing News cards. Cards without a titled link are skipped.
pub fn extract_bing(html: &str, limit: usize) -> Vec<Record> {
    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for card in document.select(&CARD).take(limit) {
        let Some(anchor) = card.select(&CARD_TITLE).next() else {
            continue;
        };
        let (Some(title), Some(href)) = (non_empty(element_text(anchor)), anchor.value().attr("href"))
        else {
            continue;
        };
        records.push(Record {
            snippet: card.select(&CARD_SNIPPET).next().map(element_text).and_then(non_empty),
            origin: card.value().attr("data-author").and_then(non_empty),
            ..Record::linked(title, href)
        });
    }

    debug!(count = records.len(), "Extracted Bing News cards");
    records
}

/// RSS descriptions carry HTML; keep only the text.
fn strip_tags(fragment: &str) -> Option<String> {
    let html = Html::parse_fragment(fragment);
    non_empty(element_text(html.root_element()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r##"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <generator>NFE/5.0</generator>
    <title>"dell layoff" - Google News</title>
    <link>https://news.google.com/search?q=dell+layoff</link>
    <language>en-US</language>
    <description>Google News</description>
    <item>
      <title>Dell cuts jobs amid restructuring - Reuters</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <guid isPermaLink="false">abc</guid>
      <pubDate>Mon, 03 Mar 2025 12:00:00 GMT</pubDate>
      <description>&lt;a href="https://news.google.com/rss/articles/abc"&gt;Dell cuts jobs&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
      <source url="https://www.reuters.com">Reuters</source>
    </item>
    <item>
      <title>Dell hiring for AI growth</title>
      <link>https://news.google.com/rss/articles/def</link>
    </item>
  </channel>
</rss>"##;

    #[test]
    fn test_request_urls() {
        assert_eq!(
            google_request_url("dell layoff"),
            "https://news.google.com/rss/search?q=dell%20layoff&hl=en-US&gl=US&ceid=US:en"
        );
        assert_eq!(
            bing_request_url("dell"),
            "https://www.bing.com/news/search?q=dell"
        );
    }

    #[test]
    fn test_extract_google_items() {
        let records = extract_google(FEED, 15).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].title.as_deref(),
            Some("Dell cuts jobs amid restructuring - Reuters")
        );
        assert_eq!(
            records[0].published.as_deref(),
            Some("Mon, 03 Mar 2025 12:00:00 GMT")
        );
        assert_eq!(records[0].origin.as_deref(), Some("Reuters"));
        let snippet = records[0].snippet.as_deref().unwrap();
        assert!(snippet.contains("Dell cuts jobs"));
        assert!(!snippet.contains('<'));

        assert_eq!(records[1].published, None);
        assert_eq!(records[1].snippet, None);
        assert_eq!(records[1].origin, None);
    }

    #[test]
    fn test_extract_google_limit() {
        assert_eq!(extract_google(FEED, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_extract_google_malformed() {
        assert!(matches!(
            extract_google("<html><body>blocked</body>", 10),
            Err(FetchError::Parse { .. })
        ));
    }

    #[test]
    fn test_extract_bing_cards() {
        let html = r#"
            <div class="news-card newsitem cardcommon" data-author="The Verge">
              <a class="title" href="https://www.theverge.com/dell">Dell reorganizes sales</a>
              <div class="snippet">Dell is cutting roles in its sales division.</div>
            </div>
            <div class="news-card"><div class="snippet">no title</div></div>
            <div class="news-card" data-author="">
              <a class="title" href="https://example.com/2">Second story</a>
            </div>
        "#;
        let records = extract_bing(html, 10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title.as_deref(), Some("Dell reorganizes sales"));
        assert_eq!(records[0].origin.as_deref(), Some("The Verge"));
        assert_eq!(
            records[0].snippet.as_deref(),
            Some("Dell is cutting roles in its sales division.")
        );
        assert_eq!(records[1].origin, None);
        assert_eq!(records[1].snippet, None);
    }
}
