/// Analytics engine for journal statistics and reflections
///
/// This module turns a user's stored entries into windowed statistics: mood
/// distribution, a seven-day mood trend, word counts and a short narrative
/// reflection. Streaks come from the persisted UserStats.

pub mod aggregate;
pub mod reflection;

pub use aggregate::{aggregate, AggregateStats, MoodShare, TrendPoint};
pub use reflection::{reflect, EMPTY_REFLECTION};

use std::fmt;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{JournalEntry, UserStats};

/// Time window for stats requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
    #[default]
    Week,
    Month,
    Year,
}

impl StatsRange {
    pub fn parse(s: &str) -> Option<StatsRange> {
        match s.trim().to_lowercase().as_str() {
            "week" => Some(StatsRange::Week),
            "month" => Some(StatsRange::Month),
            "year" => Some(StatsRange::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatsRange::Week => "week",
            StatsRange::Month => "month",
            StatsRange::Year => "year",
        }
    }

    /// Start of the window ending at `now`
    ///
    /// Month and year step back by calendar months, clamping to the last
    /// day of a shorter month.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            StatsRange::Week => now - Duration::days(7),
            StatsRange::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now - Duration::days(30)),
            StatsRange::Year => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(now - Duration::days(365)),
        }
    }
}

impl fmt::Display for StatsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analytics engine for processing journal data
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build the stats response for a window of entries
    pub fn window_stats(
        &self,
        entries: &[JournalEntry],
        range: StatsRange,
        stats: &UserStats,
        now: DateTime<Utc>,
    ) -> AggregateStats {
        let today = crate::clock::local_day(&now);
        let result = aggregate(entries, range, stats, today);

        tracing::debug!(
            "Aggregated {} entries for {} ({} range)",
            result.total_entries,
            stats.user_id,
            range
        );

        result
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
