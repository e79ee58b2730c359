/// Tool for writing new journal entries
///
/// This module implements the journal_create MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::MoodAnalyzer;
use crate::clock::Clock;
use crate::domain::{DomainError, JournalEntry, UserId, MIN_TEXT_CHARS};
use crate::storage::{refresh_user_stats, JournalStorage};
use crate::tools::{parse_date_param, DayAnchor, EntryView, ToolError};

/// Parameters for writing a journal entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateEntryParams {
    /// What happened today and how it felt (at least 10 characters)
    pub text: String,
    /// Day the entry is about (YYYY-MM-DD or ISO 8601, defaults to now)
    #[serde(default)]
    pub date: Option<String>,
}

/// Response from writing an entry
#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub success: bool,
    pub entry: EntryView,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_entries: u32,
    pub message: String,
}

/// Analyze, store and count a new entry
pub async fn create_entry<S: JournalStorage>(
    storage: &S,
    analyzer: &MoodAnalyzer,
    clock: &dyn Clock,
    user_id: &UserId,
    params: CreateEntryParams,
) -> Result<CreateEntryResponse, ToolError> {
    let date = params
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| parse_date_param(d, DayAnchor::Noon))
        .transpose()?;

    // Reject short text before spending a delegate call on it
    if params.text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(DomainError::InvalidText(format!(
            "Journal entry must be at least {} characters long",
            MIN_TEXT_CHARS
        ))
        .into());
    }

    tracing::info!("Analyzing journal entry for user {}", user_id);
    let analysis = analyzer.analyze(params.text.trim()).await;

    let now = clock.now();
    let entry = JournalEntry::new(user_id.clone(), &params.text, date, analysis, now)?;
    storage.create_entry(&entry)?;

    let stats = refresh_user_stats(storage, user_id, now)?;

    Ok(CreateEntryResponse {
        success: true,
        entry: EntryView::from(&entry),
        current_streak: stats.current_streak,
        longest_streak: stats.longest_streak,
        total_entries: stats.total_entries,
        message: format!(
            "Journal entry saved. Mood: {} ({}). {}",
            entry.mood.display_name(),
            entry.sentiment.as_str(),
            stats.motivational_message()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryId;
    use crate::tools::testing::{fixture, noon};
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn params(text: &str, date: Option<&str>) -> CreateEntryParams {
        CreateEntryParams {
            text: text.to_string(),
            date: date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_entry_persists_and_counts() {
        let fx = fixture(today());

        let response = create_entry(
            &fx.storage,
            &fx.analyzer,
            &fx.clock,
            &fx.user,
            params("Today was a wonderful day with friends in the park.", None),
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.total_entries, 1);
        assert_eq!(response.current_streak, 1);
        assert!(response.message.contains("Great start!"));

        let id = EntryId::from_string(&response.entry.id).unwrap();
        let stored = fx.storage.get_entry(&fx.user, &id).unwrap();
        assert_eq!(stored.word_count, 10);
        assert_eq!(stored.text, "Today was a wonderful day with friends in the park.");
    }

    #[tokio::test]
    async fn test_create_entry_with_past_date_builds_streak() {
        let fx = fixture(today());
        let yesterday = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();

        create_entry(
            &fx.storage,
            &fx.analyzer,
            &fx.clock,
            &fx.user,
            params("Quiet evening reading a book at home.", Some(&yesterday)),
        )
        .await
        .unwrap();

        let response = create_entry(
            &fx.storage,
            &fx.analyzer,
            &fx.clock,
            &fx.user,
            params("Another calm day, went for a long walk.", None),
        )
        .await
        .unwrap();

        assert_eq!(response.current_streak, 2);
        assert_eq!(response.longest_streak, 2);
        assert_eq!(response.entry.date, noon(today()));
    }

    #[tokio::test]
    async fn test_create_entry_rejects_short_text() {
        let fx = fixture(today());

        let result = create_entry(&fx.storage, &fx.analyzer, &fx.clock, &fx.user, params("  too short ", None)).await;

        assert!(matches!(result, Err(ToolError::Domain(DomainError::InvalidText(_)))));
        assert!(fx.storage.find_all_entries_by_user(&fx.user).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_entry_rejects_future_and_garbage_dates() {
        let fx = fixture(today());
        let future = (today() + Duration::days(5)).format("%Y-%m-%d").to_string();

        let result = create_entry(
            &fx.storage,
            &fx.analyzer,
            &fx.clock,
            &fx.user,
            params("Planning ahead for next week already.", Some(&future)),
        )
        .await;
        assert!(matches!(result, Err(ToolError::Domain(DomainError::InvalidDate(_)))));

        let result = create_entry(
            &fx.storage,
            &fx.analyzer,
            &fx.clock,
            &fx.user,
            params("Planning ahead for next week already.", Some("someday")),
        )
        .await;
        assert!(matches!(result, Err(ToolError::InvalidParams(_))));
    }

    #[tokio::test]
    async fn test_tomorrow_rejected_and_streak_kept() {
        let fx = fixture(today());
        let yesterday = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();
        let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();

        for (text, date) in [
            ("Long walk along the river at dusk.", Some(yesterday.as_str())),
            ("Cooked dinner for the whole family.", None),
        ] {
            create_entry(&fx.storage, &fx.analyzer, &fx.clock, &fx.user, params(text, date))
                .await
                .unwrap();
        }

        let result = create_entry(
            &fx.storage,
            &fx.analyzer,
            &fx.clock,
            &fx.user,
            params("Looking forward to the trip tomorrow.", Some(&tomorrow)),
        )
        .await;
        assert!(matches!(result, Err(ToolError::Domain(DomainError::InvalidDate(_)))));

        let stats = fx.storage.get_user_stats(&fx.user).unwrap();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.longest_streak, 2);
    }
}
