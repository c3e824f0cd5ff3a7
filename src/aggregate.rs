//! Folding per-source sections into a [`Report`].

use crate::analysis::{
    MarketOutlook, assess_market, classify_sentiment, extract_skills, hiring_trend,
    interview_prep, layoff_impact, networking_potential, salary_range, trend_signal,
    trending_keywords,
};
use crate::config::{Profile, SectionRole, SourceKind};
use crate::models::{LayoffStat, Record, Report, Section, Summary};
use crate::query::Query;
use chrono::{DateTime, Local};
use itertools::Itertools;
use tracing::{debug, instrument};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the report for `query` from sections already in catalog order.
#[instrument(level = "debug", skip_all, fields(subject = %query.subject, sections = sections.len()))]
pub fn build_report(
    profile: &Profile,
    query: Query,
    sections: Vec<Section>,
    layoff_stats: Vec<LayoffStat>,
    generated_at: DateTime<Local>,
) -> Report {
    let summary = summarize(profile, &query, &sections, generated_at);
    debug!(
        total_records = summary.total_records,
        sentiment = %summary.sentiment,
        outlook = %summary.market_outlook,
        "Summarized report"
    );
    Report {
        query,
        profile: profile.name.clone(),
        generated_at,
        sections,
        layoff_stats,
        summary,
    }
}

fn summarize(
    profile: &Profile,
    query: &Query,
    sections: &[Section],
    generated_at: DateTime<Local>,
) -> Summary {
    let records = || sections.iter().flat_map(|s| s.records.iter());

    let total_records = sections
        .iter()
        .filter(|s| s.counted)
        .map(|s| s.records.len())
        .sum();
    let sources_with_results = sections.iter().filter(|s| !s.records.is_empty()).count();
    let failed_sources: Vec<String> = sections
        .iter()
        .filter(|s| s.is_failed())
        .map(|s| s.key.clone())
        .collect();

    let headline_text = records().map(Record::text).join(" ");
    let description_text = records()
        .map(|r| r.snippet.clone().or_else(|| r.title.clone()).unwrap_or_default())
        .join(" ");

    let sentiment = classify_sentiment(&headline_text);
    let skills = extract_skills(&description_text);
    let salary = salary_range(records().filter_map(|r| r.snippet.as_deref()));
    let trending = trending_keywords(&description_text);

    let outlook_score = profile
        .outlook_sections
        .iter()
        .filter_map(|key| sections.iter().find(|s| &s.key == key))
        .map(|s| s.records.len())
        .sum();
    let market_outlook = MarketOutlook::from_score(outlook_score);

    let layoff_keys: Vec<&str> = profile
        .sources
        .iter()
        .filter(|spec| matches!(spec.kind, SourceKind::Layoffs { .. }))
        .map(|spec| spec.key.as_str())
        .collect();
    let layoff_impact = sections
        .iter()
        .find(|s| layoff_keys.contains(&s.key.as_str()) && !s.is_failed())
        .map(|s| {
            layoff_impact(
                &query.subject,
                s.records.iter().filter_map(|r| r.title.as_deref()),
            )
        });

    let postings = role_count(profile, sections, SectionRole::Postings);
    let hiring = postings.map(|n| hiring_trend(n).to_string());
    let market_assessment = postings.map(|n| assess_market(layoff_impact.as_deref(), n));
    let networking = role_count(profile, sections, SectionRole::Networking)
        .map(|n| networking_potential(n).to_string());

    let trend_sections = role_sections(profile, sections, SectionRole::Trends);
    let trend = (!trend_sections.is_empty()).then(|| {
        trend_signal(
            trend_sections
                .iter()
                .flat_map(|s| s.records.iter())
                .map(|r| r.snippet.as_deref().unwrap_or_default()),
        )
    });

    let interview_sections = role_sections(profile, sections, SectionRole::Interview);
    let interview = (!interview_sections.is_empty()).then(|| {
        let records = || interview_sections.iter().flat_map(|s| s.records.iter());
        interview_prep(
            &query.subject,
            records().count(),
            records().filter_map(|r| r.snippet.as_deref()),
        )
    });

    let mut summary = Summary {
        subject: query.subject.clone(),
        topic: query.topic.clone(),
        year: query.year.clone(),
        location: query.location.clone(),
        total_records,
        sources_with_results,
        failed_sources,
        sentiment: sentiment.sentiment,
        positive_hits: sentiment.positive,
        negative_hits: sentiment.negative,
        market_outlook,
        outlook_score,
        skills,
        salary,
        trending,
        layoff_impact,
        hiring_trend: hiring,
        networking,
        market_assessment,
        trend_signal: trend,
        interview,
        key_findings: Vec::new(),
        section_keys: sections.iter().map(|s| s.key.clone()).collect(),
        generated_at: generated_at.format(TIMESTAMP_FORMAT).to_string(),
    };
    summary.key_findings = key_findings(profile, sections, &summary);
    summary
}

/// Sections playing `role` that produced a result. Failed sections carry no
/// evidence either way and are left out.
fn role_sections<'a>(profile: &Profile, sections: &'a [Section], role: SectionRole) -> Vec<&'a Section> {
    profile
        .sources
        .iter()
        .filter(|spec| spec.role == Some(role))
        .filter_map(|spec| sections.iter().find(|s| s.key == spec.key))
        .filter(|s| !s.is_failed())
        .collect()
}

/// Record count over the sections playing `role`, if any answered.
fn role_count(profile: &Profile, sections: &[Section], role: SectionRole) -> Option<usize> {
    let matched = role_sections(profile, sections, role);
    (!matched.is_empty()).then(|| matched.iter().map(|s| s.records.len()).sum())
}

/// Human-readable findings from presence and length checks.
fn key_findings(profile: &Profile, sections: &[Section], summary: &Summary) -> Vec<String> {
    let mut findings = Vec::new();

    for spec in &profile.sources {
        let Some(section) = sections.iter().find(|s| s.key == spec.key) else {
            continue;
        };
        if section.records.is_empty() {
            continue;
        }
        match (&spec.kind, &spec.finding) {
            (SourceKind::Wikipedia, _) => {
                findings.push(format!("Wikipedia summary available for {}", summary.subject));
            }
            (_, Some(label)) => {
                findings.push(format!("Found {} {}", section.records.len(), label));
            }
            (_, None) => {}
        }
    }

    if let Some(impact) = &summary.layoff_impact {
        findings.push(format!("Layoff impact: {impact}"));
    }
    if summary.skills.total() > 0 {
        findings.push(format!(
            "Identified {} skills ({} technical, {} soft)",
            summary.skills.total(),
            summary.skills.technical.len(),
            summary.skills.soft.len()
        ));
    }
    if let Some(top) = summary.trending.first() {
        findings.push(format!(
            "Most mentioned emerging keyword: {} ({} mentions)",
            top.keyword, top.count
        ));
    }
    if !summary.failed_sources.is_empty() {
        findings.push(format!(
            "{} source(s) unavailable: {}",
            summary.failed_sources.len(),
            summary.failed_sources.join(", ")
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MarketVerdict, Sentiment};
    use crate::fetch::FetchError;
    use chrono::TimeZone;

    fn section(key: &str, records: Vec<Record>) -> Section {
        Section {
            key: key.to_string(),
            title: key.to_string(),
            counted: key != "wikipedia",
            records,
            error: None,
        }
    }

    fn titled(n: usize, title: &str) -> Vec<Record> {
        (0..n)
            .map(|i| Record::linked(format!("{title} {i}"), format!("https://example.com/{i}")))
            .collect()
    }

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    #[test]
    fn test_totals_exclude_uncounted_sections() {
        let profile = Profile::research();
        let sections = vec![
            section("wikipedia", titled(1, "Dell")),
            section("reddit_discussions", titled(3, "thread")),
            section("github", vec![]),
        ];
        let report = build_report(&profile, Query::parse("dell").unwrap(), sections, vec![], at());
        assert_eq!(report.summary.total_records, 3);
        assert_eq!(report.summary.sources_with_results, 2);
        assert_eq!(
            report.summary.section_keys,
            vec!["wikipedia", "reddit_discussions", "github"]
        );
        assert_eq!(report.summary.generated_at, "2025-03-04 05:06:07");
        assert_eq!(report.profile, "research");
    }

    #[test]
    fn test_outlook_uses_configured_sections() {
        let profile = Profile::research();
        let sections = vec![
            section("career_opportunities", titled(10, "job")),
            section("market_trends", titled(5, "trend")),
            section("google_news", titled(2, "news")),
            section("reddit_discussions", titled(10, "ignored")),
        ];
        let report = build_report(&profile, Query::parse("dell").unwrap(), sections, vec![], at());
        assert_eq!(report.summary.outlook_score, 17);
        assert_eq!(report.summary.market_outlook, MarketOutlook::Strong);
    }

    #[test]
    fn test_failed_sources_and_findings() {
        let profile = Profile::research();
        let mut failed = section("github", vec![]);
        failed.error = Some(FetchError::Timeout);
        let sections = vec![
            section("layoffs", titled(2, "Dell")),
            section("wikipedia", titled(1, "Dell")),
            section("career_opportunities", titled(2, "Hiring growth")),
            failed,
        ];
        let report = build_report(&profile, Query::parse("dell").unwrap(), sections, vec![], at());
        let summary = &report.summary;

        assert_eq!(summary.failed_sources, vec!["github"]);
        assert_eq!(
            summary.layoff_impact.as_deref(),
            Some("High impact - Many relevant companies affected")
        );
        assert!(summary.key_findings.contains(&"Found 2 recent tech layoff entries".to_string()));
        assert!(summary.key_findings.contains(&"Found 2 career opportunity articles".to_string()));
        assert!(summary.key_findings.contains(&"Wikipedia summary available for dell".to_string()));
        assert!(summary.key_findings.contains(&"1 source(s) unavailable: github".to_string()));
        assert_eq!(summary.sentiment, Sentiment::Positive);
    }

    fn with_snippet(n: usize, title: &str, snippet: &str) -> Vec<Record> {
        titled(n, title)
            .into_iter()
            .map(|r| Record {
                snippet: Some(snippet.to_string()),
                ..r
            })
            .collect()
    }

    #[test]
    fn test_job_market_assessments() {
        let profile = Profile::jobs();
        let sections = vec![
            section("layoffs", titled(10, "Other Corp")),
            section("indeed_postings", titled(10, "Posting")),
            section("linkedin_opportunities", titled(7, "Opportunity")),
            section("market_trends", with_snippet(2, "Trend", "Demand and growth keep expanding")),
            section(
                "interview_prep",
                with_snippet(3, "Questions", "The interview questions commonly asked"),
            ),
        ];
        let report = build_report(&profile, Query::parse("Data Scientist").unwrap(), sections, vec![], at());
        let summary = &report.summary;

        assert_eq!(summary.hiring_trend.as_deref(), Some("Limited hiring activity"));
        assert_eq!(summary.networking.as_deref(), Some("Moderate networking potential"));
        let market = summary.market_assessment.as_ref().unwrap();
        // Minimal layoff impact, postings between 5 and 15.
        assert_eq!(market.verdict, MarketVerdict::Positive);
        assert_eq!(market.factors, vec!["Positive - Low layoff impact"]);
        assert_eq!(
            summary.trend_signal.as_deref(),
            Some("Positive trend indicators (found 3 positive vs 0 negative signals)")
        );
        let interview = summary.interview.as_ref().unwrap();
        assert_eq!(interview.sources, 3);
        assert_eq!(interview.relevance, "2/4 question indicators found");

        let json = serde_json::to_string(&report).unwrap();
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_assessments_skip_failed_or_missing_roles() {
        let profile = Profile::jobs();
        let mut postings = section("indeed_postings", vec![]);
        postings.error = Some(FetchError::Status { status: 429 });
        let sections = vec![postings, section("market_trends", vec![])];
        let report = build_report(&profile, Query::parse("dell").unwrap(), sections, vec![], at());
        let summary = &report.summary;

        assert_eq!(summary.hiring_trend, None);
        assert_eq!(summary.market_assessment, None);
        assert_eq!(summary.networking, None);
        assert_eq!(summary.interview, None);
        assert_eq!(summary.trend_signal.as_deref(), Some("No trend data available"));
    }

    #[test]
    fn test_huge_salary_figures_in_snippets() {
        let profile = Profile::research();
        let sections = vec![section(
            "career_opportunities",
            with_snippet(
                1,
                "Hiring",
                "$10,000,000,000,000,000,000 and $10,000,000,000,000,000,000",
            ),
        )];
        let report = build_report(&profile, Query::parse("dell").unwrap(), sections, vec![], at());
        let salary = report.summary.salary.unwrap();
        assert_eq!(salary.count, 2);
        assert_eq!(salary.average, 10_000_000_000_000_000_000);
    }

    #[test]
    fn test_empty_report() {
        let profile = Profile::jobs();
        let report = build_report(&profile, Query::parse("nobody").unwrap(), vec![], vec![], at());
        assert_eq!(report.summary.total_records, 0);
        assert_eq!(report.summary.sentiment, Sentiment::Neutral);
        assert_eq!(report.summary.market_outlook, MarketOutlook::Weak);
        assert_eq!(report.summary.layoff_impact, None);
        assert!(report.summary.key_findings.is_empty());
    }
}
