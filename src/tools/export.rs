/// Tool for exporting a user's whole journal
///
/// This module implements the journal_export MCP tool.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::Clock;
use crate::domain::UserId;
use crate::storage::JournalStorage;
use crate::tools::{EntryView, ToolError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub success: bool,
    pub count: usize,
    pub exported_at: DateTime<Utc>,
    pub entries: Vec<EntryView>,
}

/// Every entry the caller has, newest first, with its analysis
pub fn export_entries<S: JournalStorage>(
    storage: &S,
    clock: &dyn Clock,
    user_id: &UserId,
) -> Result<ExportResponse, ToolError> {
    let entries: Vec<EntryView> = storage
        .find_all_entries_by_user(user_id)?
        .iter()
        .map(EntryView::from)
        .collect();

    tracing::info!("Exporting {} journal entries for {}", entries.len(), user_id);

    Ok(ExportResponse {
        success: true,
        count: entries.len(),
        exported_at: clock.now(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::fixture;
    use crate::tools::{create_entry, CreateEntryParams};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_export_lists_everything_newest_first() {
        let fx = fixture(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        for date in ["2024-01-03", "2024-06-10", "2024-03-20"] {
            create_entry(
                &fx.storage,
                &fx.analyzer,
                &fx.clock,
                &fx.user,
                CreateEntryParams {
                    text: "Notes on a fairly ordinary day.".to_string(),
                    date: Some(date.to_string()),
                },
            )
            .await
            .unwrap();
        }

        let export = export_entries(&fx.storage, &fx.clock, &fx.user).unwrap();

        assert_eq!(export.count, 3);
        assert_eq!(export.exported_at, fx.clock.now());
        assert!(export.entries[0].date > export.entries[1].date);
        assert!(export.entries[1].date > export.entries[2].date);

        let json = serde_json::to_value(&export).unwrap();
        let first = &json["entries"][0];
        for field in ["id", "date", "text", "mood", "confidence", "sentiment", "sentimentScore", "emotions", "keywords", "suggestions", "summary", "createdAt", "updatedAt"] {
            assert!(first.get(field).is_some(), "missing {}", field);
        }
        assert!(json.get("exportedAt").is_some());
    }

    #[test]
    fn test_export_empty_journal() {
        let fx = fixture(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let export = export_entries(&fx.storage, &fx.clock, &fx.user).unwrap();
        assert_eq!(export.count, 0);
        assert!(export.entries.is_empty());
    }
}
