//! Research profiles: which sources to query and how.
//!
//! A [`Profile`] is the single knob that turns the pipeline into a general
//! subject-research tool or a job-market analyzer. Two profiles are built in
//! ([`Profile::research`] and [`Profile::jobs`]); any other can be loaded
//! from YAML:
//!
//! ```yaml
//! name: layoffs-only
//! timeout_secs: 5
//! sources:
//!   - key: layoffs
//!     title: Layoff Tracker
//!     kind: { type: layoffs, years: ["2025"] }
//!   - key: reddit_discussions
//!     title: Reddit Discussions
//!     limit: 5
//!     kind: { type: reddit, template: "{subject} {topic}" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// A named catalog of sources plus network settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub user_agent: String,
    /// Per-request socket timeout.
    pub timeout_secs: u64,
    /// Deadline shared by every fetch of one query.
    pub deadline_secs: u64,
    /// Maximum number of sources fetched at once.
    pub max_concurrency: usize,
    /// Year substituted into templates when the query leaves it blank.
    pub default_year: String,
    /// Sections whose record counts feed the market outlook.
    pub outlook_sections: Vec<String>,
    pub sources: Vec<SourceSpec>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::research()
    }
}

/// One configured source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub key: String,
    pub title: String,
    /// Maximum number of records kept.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Noun phrase for the key findings, e.g. "career opportunity articles".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finding: Option<String>,
    /// What the job-market assessments read this section as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SectionRole>,
    pub kind: SourceKind,
}

/// Job-market meaning of a section's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionRole {
    /// Job postings: hiring trend and market verdict.
    Postings,
    /// Professional-network opportunities: networking potential.
    Networking,
    /// Market-trend articles: trend signal.
    Trends,
    /// Interview resources: interview preparation.
    Interview,
}

/// Why a profile was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
    #[error("deadline_secs must be at least 1")]
    ZeroDeadline,
    #[error("source key must be non-empty and free of whitespace: {0:?}")]
    InvalidKey(String),
    #[error("duplicate source key: {0}")]
    DuplicateKey(String),
}

fn default_limit() -> usize {
    10
}

fn default_template() -> String {
    "{subject} {topic}".to_string()
}

fn default_layoff_years() -> Vec<String> {
    vec!["2025".to_string(), "2024".to_string()]
}

/// The source family, which selects the request URL and the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceKind {
    /// Google result page scraped by container class.
    WebSearch {
        #[serde(default = "default_template")]
        template: String,
        /// Restrict results to one domain via `site:`.
        #[serde(default)]
        site: Option<String>,
        /// Quote the subject for exact-match search.
        #[serde(default)]
        exact: bool,
    },
    BingNews {
        #[serde(default = "default_template")]
        template: String,
    },
    Layoffs {
        #[serde(default = "default_layoff_years")]
        years: Vec<String>,
    },
    Wikipedia,
    Reddit {
        #[serde(default = "default_template")]
        template: String,
    },
    Github {
        #[serde(default = "default_template")]
        template: String,
        #[serde(default)]
        target: GithubTarget,
    },
    StackOverflow {
        #[serde(default = "default_template")]
        template: String,
    },
    GoogleNews {
        #[serde(default = "default_template")]
        template: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GithubTarget {
    #[default]
    Issues,
    Repositories,
}

impl SourceSpec {
    fn new(key: &str, title: &str, limit: usize, kind: SourceKind) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            limit,
            finding: None,
            role: None,
            kind,
        }
    }

    fn finding(mut self, label: &str) -> Self {
        self.finding = Some(label.to_string());
        self
    }

    fn role(mut self, role: SectionRole) -> Self {
        self.role = Some(role);
        self
    }
}

fn web_search(template: &str, site: Option<&str>) -> SourceKind {
    SourceKind::WebSearch {
        template: template.to_string(),
        site: site.map(str::to_string),
        exact: false,
    }
}

impl Profile {
    /// General subject research across every source family.
    pub fn research() -> Self {
        Self {
            name: "research".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            deadline_secs: 30,
            max_concurrency: 4,
            default_year: "2025".to_string(),
            outlook_sections: vec![
                "career_opportunities".to_string(),
                "market_trends".to_string(),
                "google_news".to_string(),
            ],
            sources: vec![
                SourceSpec::new("layoffs", "Layoff Tracker", 10, SourceKind::Layoffs {
                    years: default_layoff_years(),
                })
                .finding("recent tech layoff entries"),
                SourceSpec::new("wikipedia", "Wikipedia", 1, SourceKind::Wikipedia),
                SourceSpec::new(
                    "career_opportunities",
                    "Career Opportunities",
                    10,
                    web_search("{subject} {topic} jobs hiring {year}", None),
                )
                .finding("career opportunity articles")
                .role(SectionRole::Postings),
                SourceSpec::new(
                    "market_trends",
                    "Market Trends",
                    10,
                    web_search("{subject} {topic} market trends {year}", None),
                )
                .finding("market trend articles")
                .role(SectionRole::Trends),
                SourceSpec::new("google_news", "Google News", 15, SourceKind::GoogleNews {
                    template: "{subject} {topic} {year}".to_string(),
                })
                .finding("news stories"),
                SourceSpec::new("bing_news", "Bing News", 10, SourceKind::BingNews {
                    template: "{subject} {topic}".to_string(),
                })
                .finding("Bing news results"),
                SourceSpec::new("reddit_discussions", "Reddit Discussions", 10, SourceKind::Reddit {
                    template: default_template(),
                })
                .finding("Reddit discussions"),
                SourceSpec::new("github", "GitHub Activity", 10, SourceKind::Github {
                    template: default_template(),
                    target: GithubTarget::Issues,
                })
                .finding("GitHub issues"),
                SourceSpec::new("stackoverflow", "Stack Overflow", 10, SourceKind::StackOverflow {
                    template: default_template(),
                })
                .finding("Stack Overflow questions"),
            ],
        }
    }

    /// Job-market analysis: layoffs, postings, skills, salaries, interviews.
    pub fn jobs() -> Self {
        Self {
            name: "jobs".to_string(),
            outlook_sections: vec![
                "indeed_postings".to_string(),
                "linkedin_opportunities".to_string(),
                "market_trends".to_string(),
            ],
            sources: vec![
                SourceSpec::new("layoffs", "Layoff Tracker", 10, SourceKind::Layoffs {
                    years: default_layoff_years(),
                })
                .finding("recent tech layoff entries"),
                SourceSpec::new(
                    "indeed_postings",
                    "Indeed Job Postings",
                    10,
                    web_search("{subject} {topic} jobs {location}", Some("indeed.com")),
                )
                .finding("Indeed job postings")
                .role(SectionRole::Postings),
                SourceSpec::new(
                    "linkedin_opportunities",
                    "LinkedIn Opportunities",
                    8,
                    web_search("{subject} jobs hiring {location}", Some("linkedin.com")),
                )
                .finding("LinkedIn professional opportunities")
                .role(SectionRole::Networking),
                SourceSpec::new(
                    "market_trends",
                    "Job Market Trends",
                    10,
                    web_search("{subject} job market trends {year} hiring", None),
                )
                .finding("market trend articles")
                .role(SectionRole::Trends),
                SourceSpec::new(
                    "skills_requirements",
                    "Skills & Qualifications",
                    10,
                    web_search("{subject} {topic} skills required qualifications", None),
                )
                .finding("skills requirement sources"),
                SourceSpec::new(
                    "salary_insights",
                    "Salary Insights",
                    8,
                    web_search("{subject} salary {year} {location}", None),
                )
                .finding("salary sources"),
                SourceSpec::new(
                    "interview_prep",
                    "Interview Preparation",
                    10,
                    web_search("{subject} interview questions common asked", None),
                )
                .finding("interview preparation resources")
                .role(SectionRole::Interview),
            ],
            ..Self::research()
        }
    }

    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "research" => Some(Self::research()),
            "jobs" => Some(Self::jobs()),
            _ => None,
        }
    }

    /// Load a profile from a YAML file. Missing fields take the
    /// [`Profile::research`] defaults.
    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(path).await?;
        let profile = Self::from_yaml(&raw)?;
        info!(name = %profile.name, sources = profile.sources.len(), "Loaded profile");
        Ok(profile)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let profile: Self = serde_yaml::from_str(raw)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reject settings that would make every fetch fail or make section
    /// lookups by key ambiguous.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.max_concurrency == 0 {
            return Err(ProfileError::ZeroConcurrency);
        }
        if self.timeout_secs == 0 {
            return Err(ProfileError::ZeroTimeout);
        }
        if self.deadline_secs == 0 {
            return Err(ProfileError::ZeroDeadline);
        }
        let mut seen = HashSet::new();
        for spec in &self.sources {
            if spec.key.is_empty() || spec.key.chars().any(char::is_whitespace) {
                return Err(ProfileError::InvalidKey(spec.key.clone()));
            }
            if !seen.insert(spec.key.as_str()) {
                return Err(ProfileError::DuplicateKey(spec.key.clone()));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}
