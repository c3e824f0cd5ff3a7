//! Static HTML report.
//!
//! The page is assembled with `write!` into a `String`: header, summary
//! cards, key findings, layoff figures, skills, then one section per source
//! with one card per record.
//!
//! Every piece of scraped text passes through [`html_escape`] before it is
//! embedded, and links are only emitted for `http`/`https` URLs.

use crate::analysis::{MarketOutlook, MarketVerdict, Sentiment};
use crate::models::{Record, Report, Section};
use crate::utils::upcase;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::error::Error;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

const STYLE: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; text-align: center; margin-bottom: 30px; }
.section { background: white; padding: 25px; margin-bottom: 20px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.metric-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(250px, 1fr)); gap: 20px; margin: 20px 0; }
.metric-card { background: #f8f9fa; padding: 20px; border-radius: 8px; border-left: 4px solid #667eea; }
.positive { border-left-color: #28a745; }
.warning { border-left-color: #ffc107; }
.negative { border-left-color: #dc3545; }
.skills-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 15px 0; }
.skill-category { background: #e9ecef; padding: 15px; border-radius: 8px; }
.chip { display: inline-block; padding: 6px 14px; margin: 4px; background: #e7f3ff; color: #0066cc; border-radius: 20px; font-weight: bold; }
.record { border-bottom: 1px solid #eee; padding: 12px 0; }
.record:last-child { border-bottom: none; }
.meta { color: #777; font-size: 0.9em; }
.notice { color: #856404; background: #fff3cd; padding: 12px; border-radius: 6px; }
.source-link { color: #667eea; text-decoration: none; font-weight: bold; }
.source-link:hover { text-decoration: underline; }
nav a { margin-right: 12px; }
"#;

/// Render the full report page.
pub fn render_report(report: &Report) -> String {
    let mut html = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut html, report);
    html
}

/// Render `report` and write it to `{dir}/{stem}.html`.
#[instrument(level = "info", skip_all, fields(dir = %dir.display(), %stem))]
pub async fn write_report(
    report: &Report,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let html = render_report(report);
    let path = dir.join(format!("{stem}.html"));
    fs::write(&path, html).await?;
    info!(path = %path.display(), "Wrote HTML report");
    Ok(path)
}

fn write_document(out: &mut String, report: &Report) -> fmt::Result {
    let subject = encode_text(&report.query.subject);
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">\n<head>")?;
    writeln!(out, "<meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "<title>Research Report - {subject}</title>")?;
    writeln!(out, "<style>{STYLE}</style>\n</head>\n<body>")?;

    write_header(out, report)?;
    write_summary(out, report)?;
    write_findings(out, report)?;
    write_layoff_stats(out, report)?;
    write_market(out, report)?;
    write_skills(out, report)?;
    write_interview(out, report)?;
    write_nav(out, report)?;
    for section in &report.sections {
        write_section(out, section)?;
    }

    writeln!(out, "</body>\n</html>")
}

fn write_header(out: &mut String, report: &Report) -> fmt::Result {
    let q = &report.query;
    writeln!(out, "<div class=\"header\">")?;
    writeln!(out, "<h1>Research Report</h1>")?;
    writeln!(out, "<h2>{}</h2>", encode_text(&q.subject))?;
    let details: Vec<String> = [("Topic", &q.topic), ("Year", &q.year), ("Location", &q.location)]
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{k}: {}", encode_text(v)))
        .collect();
    if !details.is_empty() {
        writeln!(out, "<p>{}</p>", details.join(" &middot; "))?;
    }
    writeln!(
        out,
        "<p>Generated: {} &middot; Profile: {}</p>",
        encode_text(&report.summary.generated_at),
        encode_text(&upcase(&report.profile))
    )?;
    writeln!(out, "</div>")
}

fn sentiment_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "positive",
        Sentiment::Negative => "negative",
        Sentiment::Neutral => "warning",
    }
}

fn outlook_class(outlook: MarketOutlook) -> &'static str {
    match outlook {
        MarketOutlook::Strong | MarketOutlook::Good => "positive",
        MarketOutlook::Fair => "warning",
        MarketOutlook::Weak => "negative",
    }
}

fn write_summary(out: &mut String, report: &Report) -> fmt::Result {
    let s = &report.summary;
    writeln!(out, "<div class=\"section\">\n<h2>Summary</h2>\n<div class=\"metric-grid\">")?;
    writeln!(
        out,
        "<div class=\"metric-card\"><h3>Records Found</h3><p><strong>{}</strong> records from <strong>{}</strong> of {} sources</p></div>",
        s.total_records,
        s.sources_with_results,
        s.section_keys.len()
    )?;
    writeln!(
        out,
        "<div class=\"metric-card {}\"><h3>Sentiment</h3><p><strong>{}</strong></p><p class=\"meta\">{} positive / {} negative signals</p></div>",
        sentiment_class(s.sentiment),
        s.sentiment,
        s.positive_hits,
        s.negative_hits
    )?;
    writeln!(
        out,
        "<div class=\"metric-card {}\"><h3>Market Outlook</h3><p><strong>{}</strong></p><p class=\"meta\">activity score {}</p></div>",
        outlook_class(s.market_outlook),
        s.market_outlook,
        s.outlook_score
    )?;
    if let Some(impact) = &s.layoff_impact {
        let class = if impact.starts_with("Minimal") || impact.starts_with("Low") {
            "positive"
        } else {
            "warning"
        };
        writeln!(
            out,
            "<div class=\"metric-card {class}\"><h3>Layoff Impact on {}</h3><p>{}</p></div>",
            encode_text(&s.subject),
            encode_text(impact)
        )?;
    }
    writeln!(out, "</div>\n</div>")
}

fn write_findings(out: &mut String, report: &Report) -> fmt::Result {
    let findings = &report.summary.key_findings;
    if findings.is_empty() {
        return Ok(());
    }
    writeln!(out, "<div class=\"section\">\n<h2>Key Findings</h2>\n<ul>")?;
    for finding in findings {
        writeln!(out, "<li>{}</li>", encode_text(finding))?;
    }
    writeln!(out, "</ul>\n</div>")
}

fn write_layoff_stats(out: &mut String, report: &Report) -> fmt::Result {
    if report.layoff_stats.is_empty() {
        return Ok(());
    }
    writeln!(
        out,
        "<div class=\"section\">\n<h2>Tech Layoffs</h2>\n<p>Source: <a href=\"https://layoffs.fyi/\" class=\"source-link\" target=\"_blank\" rel=\"noopener\">layoffs.fyi</a></p>\n<div class=\"metric-grid\">"
    )?;
    for stat in &report.layoff_stats {
        writeln!(
            out,
            "<div class=\"metric-card warning\"><h3>{} Tech Layoffs</h3><p><strong>{}</strong> employees laid off</p><p><strong>{}</strong> companies affected</p></div>",
            encode_text(&stat.year),
            encode_text(&stat.employees_laid_off),
            encode_text(&stat.companies_affected)
        )?;
    }
    writeln!(out, "</div>\n</div>")
}

fn write_skills(out: &mut String, report: &Report) -> fmt::Result {
    let s = &report.summary;
    if s.skills.total() == 0 && s.trending.is_empty() && s.salary.is_none() {
        return Ok(());
    }
    writeln!(out, "<div class=\"section\">\n<h2>Skills &amp; Market Requirements</h2>")?;

    let categories = s.skills.categories();
    if !categories.is_empty() {
        writeln!(
            out,
            "<p><strong>{}</strong> skills identified ({} technical, {} soft)</p>\n<div class=\"skills-grid\">",
            s.skills.total(),
            s.skills.technical.len(),
            s.skills.soft.len()
        )?;
        for (name, skills) in categories {
            writeln!(
                out,
                "<div class=\"skill-category\"><h4>{name}</h4><p>{}</p></div>",
                encode_text(&skills.join(", "))
            )?;
        }
        writeln!(out, "</div>")?;
    }

    if !s.trending.is_empty() {
        writeln!(out, "<h3>Trending Keywords</h3>\n<div>")?;
        for k in &s.trending {
            writeln!(
                out,
                "<span class=\"chip\">{} ({})</span>",
                encode_text(&upcase(&k.keyword)),
                k.count
            )?;
        }
        writeln!(out, "</div>")?;
    }

    if let Some(salary) = &s.salary {
        writeln!(
            out,
            "<div class=\"metric-card positive\"><h3>Salary Mentions</h3><p>Range: ${} - ${}</p><p>Average: ${}</p><p class=\"meta\">Based on {} figures</p></div>",
            salary.min, salary.max, salary.average, salary.count
        )?;
    }

    writeln!(out, "</div>")
}

fn write_nav(out: &mut String, report: &Report) -> fmt::Result {
    if report.sections.is_empty() {
        return Ok(());
    }
    write!(out, "<nav class=\"section\">")?;
    for section in &report.sections {
        write!(
            out,
            "<a href=\"#{}\" class=\"source-link\">{} ({})</a>",
            encode_double_quoted_attribute(&anchor(section)),
            encode_text(&section.title),
            section.records.len()
        )?;
    }
    writeln!(out, "</nav>")
}

/// Element id of a section. Keys are unique within a profile; titles need not be.
fn anchor(section: &Section) -> String {
    format!("section-{}", section.key)
}

fn verdict_class(verdict: MarketVerdict) -> &'static str {
    match verdict {
        MarketVerdict::Positive => "positive",
        MarketVerdict::Cautious => "negative",
        MarketVerdict::Neutral => "warning",
    }
}

fn write_market(out: &mut String, report: &Report) -> fmt::Result {
    let s = &report.summary;
    if s.hiring_trend.is_none()
        && s.networking.is_none()
        && s.market_assessment.is_none()
        && s.trend_signal.is_none()
    {
        return Ok(());
    }
    writeln!(out, "<div class=\"section\">\n<h2>Job Market Assessment</h2>\n<div class=\"metric-grid\">")?;

    if let Some(market) = &s.market_assessment {
        writeln!(
            out,
            "<div class=\"metric-card {}\"><h3>Market Verdict</h3><p><strong>{}</strong></p><p>{}</p>",
            verdict_class(market.verdict),
            market.verdict,
            encode_text(&market.recommendation)
        )?;
        if !market.factors.is_empty() {
            writeln!(out, "<ul>")?;
            for factor in &market.factors {
                writeln!(out, "<li>{}</li>", encode_text(factor))?;
            }
            writeln!(out, "</ul>")?;
        }
        writeln!(out, "</div>")?;
    }
    for (heading, value) in [
        ("Hiring Trend", &s.hiring_trend),
        ("Networking", &s.networking),
        ("Trend Signals", &s.trend_signal),
    ] {
        if let Some(value) = value {
            writeln!(
                out,
                "<div class=\"metric-card\"><h3>{heading}</h3><p>{}</p></div>",
                encode_text(value)
            )?;
        }
    }

    writeln!(out, "</div>\n</div>")
}

fn write_interview(out: &mut String, report: &Report) -> fmt::Result {
    let Some(prep) = &report.summary.interview else {
        return Ok(());
    };
    writeln!(out, "<div class=\"section\">\n<h2>Interview Preparation</h2>")?;
    writeln!(
        out,
        "<p class=\"meta\">{} resources &middot; {}</p>",
        prep.sources,
        encode_text(&prep.relevance)
    )?;
    writeln!(out, "<div class=\"skills-grid\">")?;
    writeln!(out, "<div class=\"skill-category\"><h4>Common Questions</h4>\n<ul>")?;
    for question in &prep.standard_questions {
        writeln!(out, "<li>{}</li>", encode_text(question))?;
    }
    writeln!(out, "</ul></div>")?;
    writeln!(out, "<div class=\"skill-category\"><h4>Preparation Tips</h4>\n<ul>")?;
    for tip in &prep.tips {
        writeln!(out, "<li>{}</li>", encode_text(tip))?;
    }
    writeln!(out, "</ul></div>\n</div>")?;
    writeln!(out, "<p>{}</p>", encode_text(&prep.recommendation))?;
    writeln!(out, "</div>")
}

fn write_section(out: &mut String, section: &Section) -> fmt::Result {
    writeln!(
        out,
        "<div class=\"section\" id=\"{}\">\n<h2>{}</h2>",
        encode_double_quoted_attribute(&anchor(section)),
        encode_text(&section.title)
    )?;

    if let Some(error) = &section.error {
        writeln!(
            out,
            "<p class=\"notice\">&#9888; Source unavailable: {}</p>",
            encode_text(&error.to_string())
        )?;
    } else if section.records.is_empty() {
        writeln!(out, "<p class=\"meta\">No results found.</p>")?;
    } else {
        for record in &section.records {
            write_record(out, record)?;
        }
    }

    writeln!(out, "</div>")
}

fn write_record(out: &mut String, record: &Record) -> fmt::Result {
    writeln!(out, "<div class=\"record\">")?;

    let title = record.title.as_deref().unwrap_or("(untitled)");
    match record.link.as_deref().and_then(safe_href) {
        Some(href) => writeln!(
            out,
            "<h3><a href=\"{}\" class=\"source-link\" target=\"_blank\" rel=\"noopener\">{}</a></h3>",
            encode_double_quoted_attribute(&href),
            encode_text(title)
        )?,
        None => writeln!(out, "<h3>{}</h3>", encode_text(title))?,
    }

    if let Some(snippet) = &record.snippet {
        writeln!(out, "<p>{}</p>", encode_text(snippet))?;
    }

    let meta: Vec<String> = [
        ("", &record.origin),
        ("Published: ", &record.published),
        ("Score: ", &record.score),
        ("Comments: ", &record.comments),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}{}", encode_text(v))))
    .collect();
    if !meta.is_empty() {
        writeln!(out, "<p class=\"meta\">{}</p>", meta.join(" &middot; "))?;
    }

    writeln!(out, "</div>")
}

/// Only absolute `http`/`https` URLs become links.
fn safe_href(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
