/// Tool for editing entries
///
/// This module implements the journal_update MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::MoodAnalyzer;
use crate::clock::Clock;
use crate::domain::{DomainError, UserId, MIN_TEXT_CHARS};
use crate::storage::{refresh_user_stats, JournalStorage};
use crate::tools::{parse_date_param, parse_entry_id, DayAnchor, EntryView, ToolError};

/// Parameters for editing an entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateEntryParams {
    /// ID of the entry to edit
    pub entry_id: String,
    /// Replacement text; the entry is analyzed again when this changes
    #[serde(default)]
    pub text: Option<String>,
    /// New date for the entry (YYYY-MM-DD or ISO 8601)
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateEntryResponse {
    pub success: bool,
    pub entry: EntryView,
    pub reanalyzed: bool,
    pub message: String,
}

/// Apply text and date changes to one of the caller's entries
pub async fn update_entry<S: JournalStorage>(
    storage: &S,
    analyzer: &MoodAnalyzer,
    clock: &dyn Clock,
    user_id: &UserId,
    params: UpdateEntryParams,
) -> Result<UpdateEntryResponse, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;

    let text = params.text.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let date = params
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_date_param(d, DayAnchor::Noon))
        .transpose()?;

    if text.is_none() && date.is_none() {
        return Err(ToolError::InvalidParams(
            "Provide new text or a new date to update".to_string(),
        ));
    }

    let mut entry = storage.get_entry(user_id, &entry_id)?;
    let mut reanalyzed = false;

    if let Some(text) = text.filter(|t| *t != entry.text) {
        if text.chars().count() < MIN_TEXT_CHARS {
            return Err(DomainError::InvalidText(format!(
                "Journal entry must be at least {} characters long",
                MIN_TEXT_CHARS
            ))
            .into());
        }
        let analysis = analyzer.analyze(text).await;
        entry.set_text(text, analysis, clock.now())?;
        reanalyzed = true;
    }

    if let Some(date) = date {
        entry.set_date(date, clock.now())?;
    }

    storage.update_entry(&entry)?;
    refresh_user_stats(storage, user_id, clock.now())?;

    Ok(UpdateEntryResponse {
        success: true,
        message: if reanalyzed {
            format!("Journal entry updated. New mood: {}", entry.mood.display_name())
        } else {
            "Journal entry updated successfully".to_string()
        },
        entry: EntryView::from(&entry),
        reanalyzed,
    })
}
