/// MCP tools for journaling
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to write, browse and analyze journal entries.

pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod list;
pub mod profile;
pub mod stats;
pub mod update;

// Re-export tool functions for easy access
pub use create::*;
pub use delete::*;
pub use export::*;
pub use get::*;
pub use list::*;
pub use profile::*;
pub use stats::*;
pub use update::*;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{DomainError, EmotionScore, EntryId, JournalEntry};
use crate::storage::StorageError;

/// Errors a tool call can end with
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Could not encode result: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Parse an entry ID argument
pub(crate) fn parse_entry_id(raw: &str) -> Result<EntryId, ToolError> {
    EntryId::from_string(raw.trim())
        .map_err(|_| ToolError::InvalidParams(format!("'{}' is not a valid entry ID", raw)))
}

/// Where in the day a bare `YYYY-MM-DD` lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayAnchor {
    StartOfDay,
    Noon,
    EndOfDay,
}

impl DayAnchor {
    fn time(&self) -> NaiveTime {
        match self {
            DayAnchor::StartOfDay => NaiveTime::MIN,
            DayAnchor::Noon => NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            DayAnchor::EndOfDay => {
                NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or(NaiveTime::MIN)
            }
        }
    }
}

/// Parse a date argument
///
/// Accepts a full RFC 3339 timestamp, a local `YYYY-MM-DDTHH:MM:SS` or a bare
/// local date, which is placed in the day according to `anchor`.
pub(crate) fn parse_date_param(raw: &str, anchor: DayAnchor) -> Result<DateTime<Utc>, ToolError> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        dt
    } else if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        day.and_time(anchor.time())
    } else {
        return Err(ToolError::InvalidParams(format!(
            "Invalid date '{}'. Use YYYY-MM-DD or an ISO 8601 timestamp",
            raw
        )));
    };

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| ToolError::InvalidParams(format!("'{}' does not exist in the local timezone", raw)))
}

/// Entry as returned by the tools
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub date: DateTime<Utc>,
    pub text: String,
    pub word_count: u32,
    pub mood: String,
    pub confidence: f64,
    pub sentiment: String,
    pub sentiment_score: f64,
    pub emotions: Vec<EmotionScore>,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&JournalEntry> for EntryView {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date,
            text: entry.text.clone(),
            word_count: entry.word_count,
            mood: entry.mood.as_str().to_string(),
            confidence: entry.confidence,
            sentiment: entry.sentiment.as_str().to_string(),
            sentiment_score: entry.sentiment_score,
            emotions: entry.emotions.clone(),
            keywords: entry.keywords.clone(),
            suggestions: entry.suggestions.clone(),
            summary: entry.summary.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}
