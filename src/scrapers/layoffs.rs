//! layoffs.fyi scraping.
//!
//! Two things are read from the tracker's landing page:
//!
//! - headline figures ("N tech employees laid off ... M tech companies ...
//!   In YYYY") for each configured year, and
//! - the first table on the page, whose rows are recent company layoffs.

use super::{Extraction, element_text};
use crate::fetch::FetchError;
use crate::models::{LayoffStat, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

pub const PAGE_URL: &str = "https://layoffs.fyi/";

static STAT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)(\d{1,3},?\d{3})\s+tech employees laid off.*?(\d{1,3}(?:,\d{3})?)\s+tech companies",
    )
    .unwrap()
});
static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Extract per-year statistics and up to `limit` table rows.
pub fn extract(html: &str, years: &[String], limit: usize) -> Result<Extraction, FetchError> {
    let document = Html::parse_document(html);
    let text = element_text(document.root_element());

    let layoff_stats = years
        .iter()
        .filter_map(|year| year_stat(&text, year))
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    if let Some(table) = document.select(&TABLE).next() {
        for row in table.select(&ROW).skip(1).take(limit) {
            let cells: Vec<String> = row.select(&CELL).map(element_text).collect();
            if cells.len() < 3 {
                continue;
            }
            records.push(Record {
                title: Some(cells[0].clone()),
                score: Some(cells[1].clone()),
                published: Some(cells[2].clone()),
                ..Record::default()
            });
        }
    }

    debug!(stats = layoff_stats.len(), rows = records.len(), "Extracted layoff data");
    Ok(Extraction {
        records,
        layoff_stats,
    })
}

/// Find the statistics block labelled `In <year>`.
///
/// A block is labelled by the year marker that follows it before the next
/// block starts.
fn year_stat(text: &str, year: &str) -> Option<LayoffStat> {
    let marker = format!("In {year}");
    let blocks: Vec<_> = STAT_BLOCK.captures_iter(text).collect();

    blocks.iter().enumerate().find_map(|(i, caps)| {
        let end = caps.get(0)?.end();
        let next_start = blocks
            .get(i + 1)
            .and_then(|c| c.get(0))
            .map_or(text.len(), |m| m.start());
        if !text[end..next_start].contains(&marker) {
            return None;
        }
        Some(LayoffStat {
            year: year.to_string(),
            employees_laid_off: caps[1].replace(',', ""),
            companies_affected: caps[2].replace(',', ""),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="stats">
            <p>22,123</p><p>tech employees laid off</p>
            <p>95</p><p>tech companies</p><p>In 2025</p>
          </div>
          <div class="stats">
            <p>152,922 tech employees laid off</p>
            <p>551 tech companies with layoffs</p><p>In 2024</p>
          </div>
          <table>
            <tr><th>Company</th><th>Laid Off</th><th>Date</th></tr>
            <tr><td>Dell</td><td>12,500</td><td>2025-03-01</td></tr>
            <tr><td>Intel</td><td>15,000</td><td>2025-02-10</td></tr>
            <tr><td>broken row</td></tr>
            <tr><td>Microsoft</td><td>6,000</td><td>2025-01-20</td></tr>
          </table>
          <table><tr><td>ignored</td><td>1</td><td>x</td></tr></table>
        </body></html>
    "#;

    fn years() -> Vec<String> {
        vec!["2025".to_string(), "2024".to_string()]
    }

    #[test]
    fn test_extract_year_stats() {
        let extraction = extract(PAGE, &years(), 10).unwrap();
        assert_eq!(
            extraction.layoff_stats,
            vec![
                LayoffStat {
                    year: "2025".to_string(),
                    employees_laid_off: "22123".to_string(),
                    companies_affected: "95".to_string(),
                },
                LayoffStat {
                    year: "2024".to_string(),
                    employees_laid_off: "152922".to_string(),
                    companies_affected: "551".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_extract_first_table_rows() {
        let extraction = extract(PAGE, &years(), 10).unwrap();
        let companies: Vec<_> = extraction
            .records
            .iter()
            .filter_map(|r| r.title.as_deref())
            .collect();
        assert_eq!(companies, vec!["Dell", "Intel", "Microsoft"]);
        assert_eq!(extraction.records[0].score.as_deref(), Some("12,500"));
        assert_eq!(extraction.records[0].published.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_extract_limit_counts_rows() {
        let extraction = extract(PAGE, &years(), 2).unwrap();
        assert_eq!(extraction.records.len(), 2);
    }

    #[test]
    fn test_missing_year_is_skipped() {
        let extraction = extract(PAGE, &["2023".to_string()], 10).unwrap();
        assert!(extraction.layoff_stats.is_empty());
    }

    #[test]
    fn test_empty_page() {
        let extraction = extract("<html><body>nothing</body></html>", &years(), 10).unwrap();
        assert_eq!(extraction, Extraction::default());
    }
}
