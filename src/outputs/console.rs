//! Plain-text summary printed after each query.

use crate::models::Report;

/// Lines shown on the terminal once a report is built.
pub fn summary_lines(report: &Report) -> Vec<String> {
    let s = &report.summary;
    let mut lines = vec![
        format!("Research summary: {}", s.subject),
        "=".repeat(60),
        format!(
            "Records found: {} from {} of {} sources",
            s.total_records,
            s.sources_with_results,
            s.section_keys.len()
        ),
        format!("Sentiment: {}", s.sentiment),
        format!("Market outlook: {}", s.market_outlook),
    ];
    if let Some(impact) = &s.layoff_impact {
        lines.push(format!("Layoff impact: {impact}"));
    }
    if let Some(trend) = &s.hiring_trend {
        lines.push(format!("Hiring trend: {trend}"));
    }
    if let Some(networking) = &s.networking {
        lines.push(format!("Networking: {networking}"));
    }
    if let Some(market) = &s.market_assessment {
        lines.push(format!("Market verdict: {} ({})", market.verdict, market.recommendation));
    }
    if let Some(signal) = &s.trend_signal {
        lines.push(format!("Trend signals: {signal}"));
    }
    if s.skills.total() > 0 {
        lines.push(format!("Skills identified: {}", s.skills.total()));
    }
    if let Some(prep) = &s.interview {
        lines.push(format!("Interview prep: {} resources, {}", prep.sources, prep.relevance));
    }
    lines.extend(s.key_findings.iter().map(|f| format!("  - {f}")));
    lines.push("=".repeat(60));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_report;
    use crate::config::Profile;
    use crate::models::{Record, Section};
    use crate::query::Query;
    use chrono::Local;

    #[test]
    fn test_summary_lines() {
        let section = Section {
            key: "career_opportunities".to_string(),
            title: "Career Opportunities".to_string(),
            counted: true,
            records: vec![Record::linked("Dell hiring", "https://example.com")],
            error: None,
        };
        let report = build_report(
            &Profile::research(),
            Query::parse("dell").unwrap(),
            vec![section],
            vec![],
            Local::now(),
        );
        let lines = summary_lines(&report);
        assert_eq!(lines[0], "Research summary: dell");
        assert!(lines.contains(&"Records found: 1 from 1 of 1 sources".to_string()));
        assert!(lines.contains(&"Sentiment: Positive".to_string()));
        assert!(lines.contains(&"  - Found 1 career opportunity articles".to_string()));
        assert!(lines.contains(&"Hiring trend: Minimal hiring activity".to_string()));
        assert!(lines.contains(
            &"Market verdict: Cautious (Consider timing and focus on skill development)".to_string()
        ));
        assert!(!lines.iter().any(|l| l.starts_with("Interview prep")));
    }

    #[test]
    fn test_summary_lines_jobs_profile() {
        let section = |key: &str, n: usize| Section {
            key: key.to_string(),
            title: key.to_string(),
            counted: true,
            records: (0..n)
                .map(|i| Record::linked(format!("r{i}"), format!("https://example.com/{i}")))
                .collect(),
            error: None,
        };
        let report = build_report(
            &Profile::jobs(),
            Query::parse("Data Scientist").unwrap(),
            vec![
                section("linkedin_opportunities", 11),
                section("market_trends", 0),
                section("interview_prep", 4),
            ],
            vec![],
            Local::now(),
        );
        let lines = summary_lines(&report);
        assert!(lines.contains(&"Networking: High networking potential".to_string()));
        assert!(lines.contains(&"Trend signals: No trend data available".to_string()));
        assert!(lines.contains(
            &"Interview prep: 4 resources, 0/4 question indicators found".to_string()
        ));
        assert!(!lines.iter().any(|l| l.starts_with("Hiring trend")));
    }
}
