/// Tool for windowed journal statistics
///
/// This module implements the journal_stats MCP tool.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::analytics::{AggregateStats, AnalyticsEngine, StatsRange};
use crate::clock::{end_of_local_day, Clock};
use crate::domain::UserId;
use crate::storage::JournalStorage;
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatsParams {
    /// Window to summarize: "week", "month" or "year" (default "week")
    #[serde(default)]
    pub range: Option<String>,
}

/// Aggregate the caller's entries for the requested window
///
/// The window runs from the range start through the end of today, so entries
/// dated later today are counted.
pub fn journal_stats<S: JournalStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    clock: &dyn Clock,
    user_id: &UserId,
    params: StatsParams,
) -> Result<AggregateStats, ToolError> {
    let range = match params.range.as_deref().map(str::trim) {
        None | Some("") => StatsRange::default(),
        Some(raw) => StatsRange::parse(raw).ok_or_else(|| {
            ToolError::InvalidParams("Range must be week, month, or year".to_string())
        })?,
    };

    let now = clock.now();
    let entries = storage.find_entries_by_user_and_range(user_id, range.start(now), end_of_local_day(clock.today()))?;
    let stats = storage.get_user_stats(user_id)?;

    Ok(analytics.window_stats(&entries, range, &stats, now))
}
