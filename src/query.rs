//! Parsing of the comma-delimited research query typed at the prompt.
//!
//! A query line looks like `subject, topic, year, location`. Only the
//! subject is required; every other field may be left blank or omitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of positional fields read from a query line.
const FIELD_COUNT: usize = 4;

/// Errors raised while parsing a query line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("the subject (first field) must not be empty")]
    EmptySubject,
}

/// A parsed research query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Primary subject, e.g. a company or a job title.
    pub subject: String,
    /// Optional topic or skill focus.
    #[serde(default)]
    pub topic: String,
    /// Optional year; left empty when not given.
    #[serde(default)]
    pub year: String,
    /// Optional location.
    #[serde(default)]
    pub location: String,
}

impl Query {
    /// Parse a comma-delimited line into a [`Query`].
    ///
    /// Fields are trimmed. Missing trailing fields become empty strings and
    /// fields past the fourth are ignored. The only rejected input is an
    /// empty subject.
    ///
    /// ```ignore
    /// let q = Query::parse("dell, layoff, 2025")?;
    /// assert_eq!(q.subject, "dell");
    /// ```
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let mut fields = input
            .split(',')
            .map(str::trim)
            .take(FIELD_COUNT)
            .map(str::to_string);

        let subject = fields.next().unwrap_or_default();
        if subject.is_empty() {
            return Err(QueryError::EmptySubject);
        }

        Ok(Self {
            subject,
            topic: fields.next().unwrap_or_default(),
            year: fields.next().unwrap_or_default(),
            location: fields.next().unwrap_or_default(),
        })
    }

    /// Join the fields back into a query line. Trailing empty fields are dropped.
    pub fn to_line(&self) -> String {
        let mut fields = vec![
            self.subject.as_str(),
            self.topic.as_str(),
            self.year.as_str(),
            self.location.as_str(),
        ];
        while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }
        fields.join(",")
    }

    /// The year to search for, falling back to `default_year` when blank.
    pub fn year_or<'a>(&'a self, default_year: &'a str) -> &'a str {
        if self.year.is_empty() {
            default_year
        } else {
            &self.year
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let q = Query::parse("dell,layoff,2025").unwrap();
        assert_eq!(q.subject, "dell");
        assert_eq!(q.topic, "layoff");
        assert_eq!(q.year, "2025");
        assert_eq!(q.location, "");
    }

    #[test]
    fn test_parse_trims_and_defaults() {
        let q = Query::parse("  Data Scientist  ,  python ").unwrap();
        assert_eq!(q.subject, "Data Scientist");
        assert_eq!(q.topic, "python");
        assert_eq!(q.year, "");
        assert_eq!(q.location, "");
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let q = Query::parse("a,b,c,d,e,f").unwrap();
        assert_eq!(q.location, "d");
        assert_eq!(q.to_line(), "a,b,c,d");
    }

    #[test]
    fn test_parse_rejects_empty_subject() {
        assert_eq!(Query::parse(""), Err(QueryError::EmptySubject));
        assert_eq!(Query::parse("   "), Err(QueryError::EmptySubject));
        assert_eq!(Query::parse(" ,layoff,2025"), Err(QueryError::EmptySubject));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let inputs = [
            "dell,layoff,2025",
            " rust , , 2024 , berlin ",
            "solo",
            "a,,,",
            "x, y ,z,w,extra",
            "software engineer,,,remote",
        ];
        for input in inputs {
            let first = Query::parse(input).unwrap();
            let second = Query::parse(&first.to_line()).unwrap();
            assert_eq!(first, second, "input: {input:?}");
        }
    }

    #[test]
    fn test_year_or() {
        let q = Query::parse("dell").unwrap();
        assert_eq!(q.year_or("2025"), "2025");
        let q = Query::parse("dell,,2023").unwrap();
        assert_eq!(q.year_or("2025"), "2023");
    }
}
