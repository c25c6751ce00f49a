use crate::errors::WidgetError;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReadingId(String);

impl ReadingId {
    pub fn parse(raw: &str) -> Result<Self, WidgetError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains(|c: char| c == '/' || c.is_whitespace()) {
            return Err(WidgetError::InvalidReadingId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ReadingId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl TryFrom<String> for ReadingId {
    type Error = WidgetError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<ReadingId> for String {
    fn from(id: ReadingId) -> Self {
        id.0
    }
}

impl fmt::Display for ReadingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Values the server renders a reading's widget from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSnapshot {
    pub reading: ReadingId,
    #[serde(default)]
    pub title: String,
    pub current_pages: u32,
    pub total_pages: u32,
    #[serde(default = "default_true")]
    pub deadline_controls: bool,
}

fn default_true() -> bool {
    true
}

impl ReadingSnapshot {
    pub fn new(reading: ReadingId, current_pages: u32, total_pages: u32) -> Self {
        Self {
            reading,
            title: String::new(),
            current_pages,
            total_pages,
            deadline_controls: true,
        }
    }
}

/// One request the widget can issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    MarkPages { reading: ReadingId, new_pages: i64 },
    MarkFinished { reading: ReadingId },
    SetDeadline { reading: ReadingId, deadline: String, percent: f64 },
    MarkDnf { reading: ReadingId },
}

impl Submission {
    pub fn reading(&self) -> &ReadingId {
        match self {
            Self::MarkPages { reading, .. }
            | Self::MarkFinished { reading }
            | Self::SetDeadline { reading, .. }
            | Self::MarkDnf { reading } => reading,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::MarkDnf { .. } => Method::GET,
            _ => Method::POST,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::MarkPages { reading, .. } => format!("/books/mark_reading_pages/{reading}"),
            Self::MarkFinished { reading } => format!("/books/mark_reading_finished/{reading}"),
            Self::SetDeadline { reading, .. } => format!("/readings/set_deadline/{reading}"),
            Self::MarkDnf { reading } => format!("/books/mark_reading_dnf_rest/{reading}"),
        }
    }

    /// Form fields, in wire order. `None` means no body at all.
    pub fn form_fields(&self) -> Option<Vec<(&'static str, String)>> {
        match self {
            Self::MarkPages { new_pages, .. } => Some(vec![("new_pages", new_pages.to_string())]),
            Self::MarkFinished { .. } => Some(Vec::new()),
            Self::SetDeadline {
                deadline, percent, ..
            } => Some(vec![
                ("deadline", deadline.clone()),
                ("percent", format_percent_field(*percent)),
            ]),
            Self::MarkDnf { .. } => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MarkPages { .. } => "mark_pages",
            Self::MarkFinished { .. } => "mark_finished",
            Self::SetDeadline { .. } => "set_deadline",
            Self::MarkDnf { .. } => "mark_dnf",
        }
    }
}

/// Integral percentages go out without a fraction (`100`, not `100.0`).
pub fn format_percent_field(percent: f64) -> String {
    if percent.fract() == 0.0 && percent.is_finite() {
        format!("{percent:.0}")
    } else {
        percent.to_string()
    }
}

/// Accepts the two formats the deadline input produces.
pub fn validate_deadline(raw: &str) -> Result<String, WidgetError> {
    let value = raw.trim();
    let valid = NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").is_ok();
    if valid {
        Ok(value.to_string())
    } else {
        Err(WidgetError::InvalidDeadline(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_id_rejects_path_breaking_input() {
        assert!(ReadingId::parse("").is_err());
        assert!(ReadingId::parse("1/2").is_err());
        assert!(ReadingId::parse("1 2").is_err());
        assert_eq!(ReadingId::parse(" 17 ").unwrap().as_str(), "17");
    }

    #[test]
    fn endpoints_match_backend_routes() {
        let reading = ReadingId::from(7);
        let pages = Submission::MarkPages {
            reading: reading.clone(),
            new_pages: 12,
        };
        assert_eq!(pages.method(), Method::POST);
        assert_eq!(pages.path(), "/books/mark_reading_pages/7");
        assert_eq!(pages.form_fields(), Some(vec![("new_pages", "12".to_string())]));

        let dnf = Submission::MarkDnf { reading };
        assert_eq!(dnf.method(), Method::GET);
        assert_eq!(dnf.path(), "/books/mark_reading_dnf_rest/7");
        assert_eq!(dnf.form_fields(), None);
    }

    #[test]
    fn finished_request_has_empty_form() {
        let finished = Submission::MarkFinished {
            reading: ReadingId::from(3),
        };
        assert_eq!(finished.path(), "/books/mark_reading_finished/3");
        assert_eq!(finished.form_fields(), Some(Vec::new()));
    }

    #[test]
    fn percent_field_drops_integral_fraction() {
        assert_eq!(format_percent_field(100.0), "100");
        assert_eq!(format_percent_field(50.0), "50");
        assert_eq!(format_percent_field(12.5), "12.5");
    }

    #[test]
    fn deadline_accepts_date_and_datetime() {
        assert_eq!(validate_deadline("2025-12-31").unwrap(), "2025-12-31");
        assert_eq!(
            validate_deadline(" 2025-12-31 18:30 ").unwrap(),
            "2025-12-31 18:30"
        );
        assert!(validate_deadline("next friday").is_err());
        assert!(validate_deadline("2025-02-30").is_err());
    }

    #[test]
    fn snapshot_deserializes_with_defaults() {
        let snapshot: ReadingSnapshot = serde_json::from_str(
            r#"{"reading":"12","current_pages":40,"total_pages":320}"#,
        )
        .unwrap();
        assert_eq!(snapshot.reading.as_str(), "12");
        assert!(snapshot.deadline_controls);
        assert!(snapshot.title.is_empty());
    }
}
