//! Keyword-based classifiers over scraped text.
//!
//! Everything here is deliberately naive: case-insensitive substring tests
//! against fixed vocabularies, and fixed thresholds mapped to fixed labels.
//!
//! - [`classify_sentiment`]: positive vs. negative keyword occurrences
//! - [`extract_skills`]: technical and soft skills present in the text
//! - [`MarketOutlook::from_score`]: four-tier bucketing of an activity count
//! - [`salary_range`]: dollar figures mentioned in snippets
//! - [`trending_keywords`]: occurrence counts of emerging-technology terms
//! - [`layoff_impact`]: share of layoff entries related to the subject
//! - [`hiring_trend`] / [`networking_potential`]: posting-count tiers
//! - [`assess_market`]: layoff impact and posting volume folded into a verdict
//! - [`trend_signal`]: direction of market-trend snippets
//! - [`interview_prep`]: standard questions, source relevance and tips

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const POSITIVE_WORDS: &[&str] = &[
    "growth",
    "increasing",
    "demand",
    "expanding",
    "opportunity",
    "hiring",
    "success",
    "innovation",
];

const NEGATIVE_WORDS: &[&str] = &[
    "decline",
    "decreasing",
    "layoffs",
    "reduction",
    "challenging",
    "cuts",
    "loss",
    "struggle",
];

const TECH_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "sql",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "spring",
    "mongodb",
    "postgresql",
    "mysql",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "git",
    "jenkins",
    "terraform",
    "machine learning",
    "data science",
    "artificial intelligence",
    "deep learning",
    "tableau",
    "power bi",
    "excel",
    "r",
    "scala",
    "spark",
    "hadoop",
];

const SOFT_SKILLS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem solving",
    "analytical",
    "project management",
    "agile",
    "scrum",
    "critical thinking",
    "creativity",
];

const PROGRAMMING: &[&str] = &[
    "python",
    "java",
    "javascript",
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "node.js",
];
const DATABASES: &[&str] = &["sql", "mongodb", "postgresql", "mysql"];
const CLOUD: &[&str] = &["aws", "azure", "gcp", "docker", "kubernetes"];
const ANALYTICS: &[&str] = &["tableau", "power bi", "excel", "r", "machine learning", "data science"];

const EMERGING_KEYWORDS: &[&str] = &[
    "ai",
    "machine learning",
    "cloud",
    "automation",
    "blockchain",
    "cybersecurity",
];

static SALARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[\d,]+(?:k|,000)?").unwrap());

/// Overall tone of the scraped titles and snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        })
    }
}

/// Keyword hit counts behind a [`Sentiment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub positive: usize,
    pub negative: usize,
}

/// Count vocabulary occurrences and pick the majority.
///
/// Ties, including no hits at all, are [`Sentiment::Neutral`].
pub fn classify_sentiment(text: &str) -> SentimentScore {
    let lower = text.to_lowercase();
    let positive = count_occurrences(&lower, POSITIVE_WORDS);
    let negative = count_occurrences(&lower, NEGATIVE_WORDS);
    let sentiment = match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    };
    SentimentScore {
        sentiment,
        positive,
        negative,
    }
}

fn count_occurrences(lower: &str, words: &[&str]) -> usize {
    words.iter().map(|w| lower.matches(w).count()).sum()
}

/// Market activity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketOutlook {
    Strong,
    Good,
    Fair,
    Weak,
}

impl MarketOutlook {
    /// Bucket an activity count: >15 strong, >8 good, >3 fair, else weak.
    pub fn from_score(score: usize) -> Self {
        match score {
            s if s > 15 => Self::Strong,
            s if s > 8 => Self::Good,
            s if s > 3 => Self::Fair,
            _ => Self::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong - High market activity",
            Self::Good => "Good - Moderate market activity",
            Self::Fair => "Fair - Limited market activity",
            Self::Weak => "Weak - Minimal market activity",
        }
    }
}

impl fmt::Display for MarketOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Skills found in scraped descriptions, with a coarse categorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub programming: Vec<String>,
    pub databases: Vec<String>,
    pub cloud: Vec<String>,
    pub analytics: Vec<String>,
}

impl SkillProfile {
    pub fn total(&self) -> usize {
        self.technical.len() + self.soft.len()
    }

    /// Non-empty categories with display names, in a fixed order.
    pub fn categories(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Programming", self.programming.as_slice()),
            ("Databases", self.databases.as_slice()),
            ("Cloud", self.cloud.as_slice()),
            ("Analytics", self.analytics.as_slice()),
            ("Soft Skills", self.soft.as_slice()),
        ]
        .into_iter()
        .filter(|(_, skills)| !skills.is_empty())
        .collect()
    }
}

/// Test every vocabulary term for case-insensitive substring membership.
///
/// No weighting, stemming or word boundaries: single-letter terms such as
/// `r` match almost any text.
pub fn extract_skills(text: &str) -> SkillProfile {
    let lower = text.to_lowercase();
    let present = |vocab: &[&str]| -> Vec<String> {
        vocab
            .iter()
            .filter(|term| lower.contains(*term))
            .map(|term| term.to_string())
            .collect()
    };

    let technical = present(TECH_SKILLS);
    let in_category = |category: &[&str]| -> Vec<String> {
        technical
            .iter()
            .filter(|s| category.contains(&s.as_str()))
            .cloned()
            .collect()
    };

    SkillProfile {
        programming: in_category(PROGRAMMING),
        databases: in_category(DATABASES),
        cloud: in_category(CLOUD),
        analytics: in_category(ANALYTICS),
        soft: present(SOFT_SKILLS),
        technical,
    }
}

/// Salary figures mentioned in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub average: u64,
    pub count: usize,
}

/// Collect `$120,000` / `$95k` style figures and summarize them.
pub fn salary_range<'a>(texts: impl IntoIterator<Item = &'a str>) -> Option<SalaryRange> {
    let figures: Vec<u64> = texts
        .into_iter()
        .flat_map(|t| SALARY.find_iter(t))
        .filter_map(|m| {
            m.as_str()
                .trim_start_matches('$')
                .replace(',', "")
                .replace('k', "000")
                .parse::<u64>()
                .ok()
        })
        .collect();

    let min = *figures.iter().min()?;
    let max = *figures.iter().max()?;
    let count = figures.len();
    // Never above `max`, so the narrowing is lossless.
    let total: u128 = figures.iter().map(|&f| u128::from(f)).sum();
    let average = (total / count as u128) as u64;
    Some(SalaryRange {
        min,
        max,
        average,
        count,
    })
}

/// One keyword and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Occurrence counts of emerging-technology keywords, most frequent first.
pub fn trending_keywords(text: &str) -> Vec<KeywordCount> {
    let lower = text.to_lowercase();
    let mut counts: Vec<KeywordCount> = EMERGING_KEYWORDS
        .iter()
        .map(|k| KeywordCount {
            keyword: k.to_string(),
            count: lower.matches(k).count(),
        })
        .filter(|k| k.count > 0)
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    counts
}

/// Describe how much of the layoff list concerns the subject.
///
/// A company is relevant when its name contains any word of the subject.
pub fn layoff_impact<'a>(subject: &str, companies: impl IntoIterator<Item = &'a str>) -> String {
    let keywords: Vec<String> = subject.to_lowercase().split_whitespace().map(str::to_string).collect();
    let (relevant, total) = companies.into_iter().fold((0usize, 0usize), |(rel, tot), company| {
        let company = company.to_lowercase();
        let hit = keywords.iter().any(|k| company.contains(k.as_str()));
        (rel + usize::from(hit), tot + 1)
    });

    if total == 0 {
        return "No recent layoff data available".to_string();
    }

    let percentage = relevant as f64 / total as f64 * 100.0;
    if percentage > 20.0 {
        "High impact - Many relevant companies affected"
    } else if percentage > 10.0 {
        "Moderate impact - Some relevant companies affected"
    } else if percentage > 0.0 {
        "Low impact - Few relevant companies affected"
    } else {
        "Minimal impact - No directly relevant companies in recent layoffs"
    }
    .to_string()
}

/// Hiring activity tier for a number of job postings.
pub fn hiring_trend(postings: usize) -> &'static str {
    match postings {
        n if n > 20 => "Strong hiring activity",
        n if n > 10 => "Moderate hiring activity",
        n if n > 5 => "Limited hiring activity",
        _ => "Minimal hiring activity",
    }
}

/// Networking tier for a number of professional-network opportunities.
pub fn networking_potential(opportunities: usize) -> &'static str {
    match opportunities {
        n if n > 10 => "High networking potential",
        n if n > 5 => "Moderate networking potential",
        _ => "Limited networking opportunities",
    }
}

/// Overall call on the job market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketVerdict {
    Positive,
    Cautious,
    Neutral,
}

impl MarketVerdict {
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Positive => "Good time to pursue opportunities in this field",
            Self::Cautious => "Consider timing and focus on skill development",
            Self::Neutral => "Monitor market conditions and prepare for opportunities",
        }
    }
}

impl fmt::Display for MarketVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "Positive",
            Self::Cautious => "Cautious",
            Self::Neutral => "Neutral",
        })
    }
}

/// A [`MarketVerdict`] with the factors that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketAssessment {
    pub verdict: MarketVerdict,
    pub factors: Vec<String>,
    pub recommendation: String,
}

/// Weigh layoff impact and posting volume.
///
/// Low or minimal layoff impact and more than 15 postings each count as a
/// positive factor; high impact and fewer than 5 postings as a caution.
/// The verdict follows whichever side has more factors.
pub fn assess_market(layoff_impact: Option<&str>, postings: usize) -> MarketAssessment {
    let mut factors = Vec::new();

    let impact = layoff_impact.unwrap_or_default().to_lowercase();
    if impact.contains("minimal") || impact.contains("low") {
        factors.push("Positive - Low layoff impact".to_string());
    } else if impact.contains("high") {
        factors.push("Caution - High layoff impact".to_string());
    }

    if postings > 15 {
        factors.push("Positive - Strong job posting activity".to_string());
    } else if postings < 5 {
        factors.push("Caution - Limited job postings".to_string());
    }

    let positive = factors.iter().filter(|f| f.starts_with("Positive")).count();
    let caution = factors.iter().filter(|f| f.starts_with("Caution")).count();
    let verdict = match positive.cmp(&caution) {
        std::cmp::Ordering::Greater => MarketVerdict::Positive,
        std::cmp::Ordering::Less => MarketVerdict::Cautious,
        std::cmp::Ordering::Equal => MarketVerdict::Neutral,
    };

    MarketAssessment {
        verdict,
        factors,
        recommendation: verdict.recommendation().to_string(),
    }
}

const TREND_POSITIVE: &[&str] = &["growth", "increasing", "demand", "expanding", "opportunity"];
const TREND_NEGATIVE: &[&str] = &["decline", "decreasing", "layoffs", "reduction", "challenging"];

/// Direction of market-trend articles, from which indicator words appear
/// anywhere in their snippets.
pub fn trend_signal<'a>(snippets: impl IntoIterator<Item = &'a str>) -> String {
    let snippets: Vec<&str> = snippets.into_iter().collect();
    if snippets.is_empty() {
        return "No trend data available".to_string();
    }

    let content = snippets.join(" ").to_lowercase();
    let present = |words: &[&str]| words.iter().filter(|w| content.contains(*w)).count();
    let positive = present(TREND_POSITIVE);
    let negative = present(TREND_NEGATIVE);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => format!(
            "Positive trend indicators (found {positive} positive vs {negative} negative signals)"
        ),
        std::cmp::Ordering::Less => format!(
            "Negative trend indicators (found {negative} negative vs {positive} positive signals)"
        ),
        std::cmp::Ordering::Equal => {
            "Mixed trend indicators (balanced positive/negative signals)".to_string()
        }
    }
}

const STANDARD_QUESTIONS: &[&str] = &[
    "Tell me about yourself",
    "Why do you want this position?",
    "What are your strengths and weaknesses?",
    "Describe a challenging project you worked on",
    "Where do you see yourself in 5 years?",
    "Why are you leaving your current job?",
    "What interests you about our company?",
    "Describe your experience with [relevant technology]",
    "How do you handle tight deadlines?",
    "Give an example of when you solved a complex problem",
];

const QUESTION_INDICATORS: &[&str] = &[
    "interview questions",
    "commonly asked",
    "prepare for",
    "expect to be asked",
];

const INTERVIEW_RECOMMENDATION: &str =
    "Review role-specific technical questions based on job requirements";

/// Interview preparation material for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPrep {
    /// Number of interview resources found.
    pub sources: usize,
    /// How many question indicators the resource snippets mention.
    pub indicators_found: usize,
    /// e.g. "2/4 question indicators found".
    pub relevance: String,
    pub standard_questions: Vec<String>,
    pub tips: Vec<String>,
    pub recommendation: String,
}

/// Build interview preparation material from interview-resource snippets.
pub fn interview_prep<'a>(
    subject: &str,
    sources: usize,
    snippets: impl IntoIterator<Item = &'a str>,
) -> InterviewPrep {
    let content = snippets.into_iter().join(" ").to_lowercase();
    let indicators_found = QUESTION_INDICATORS
        .iter()
        .filter(|i| content.contains(*i))
        .count();

    InterviewPrep {
        sources,
        indicators_found,
        relevance: format!(
            "{indicators_found}/{} question indicators found",
            QUESTION_INDICATORS.len()
        ),
        standard_questions: STANDARD_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        tips: vec![
            "Research the company's recent projects and initiatives".to_string(),
            format!("Prepare specific examples demonstrating {subject} skills"),
            "Practice explaining technical concepts in simple terms".to_string(),
            "Prepare questions about team structure and growth opportunities".to_string(),
            "Review your portfolio/projects and be ready to discuss them".to_string(),
            "Stay updated on industry trends and challenges".to_string(),
        ],
        recommendation: INTERVIEW_RECOMMENDATION.to_string(),
    }
}
