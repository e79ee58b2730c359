/// Streak calculation and per-user journaling stats
///
/// This module defines the UserStats struct that holds calculated streak
/// information for a user, and the pure `compute_streaks` function that
/// derives current and longest streaks from entry timestamps.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::local_day;
use crate::domain::UserId;

/// Current and longest run of consecutive journaling days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}

/// Compute streaks from entry timestamps
///
/// Timestamps are normalized to local calendar days, so several entries on
/// the same day count once. Input order does not matter. The current streak
/// only survives if the most recent entry is from `today` or the day before.
pub fn compute_streaks(dates: &[DateTime<Utc>], today: NaiveDate) -> StreakSummary {
    let mut days: Vec<NaiveDate> = dates.iter().map(local_day).collect();
    days.sort_unstable();
    days.dedup();

    if days.is_empty() {
        return StreakSummary::default();
    }

    let current = current_streak(&days, today);
    let longest = longest_streak(&days);

    StreakSummary {
        current,
        longest: longest.max(current),
    }
}

/// Walk distinct days (sorted ascending) backwards from the most recent one
fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let most_recent = match days.last() {
        Some(day) => *day,
        None => return 0,
    };

    let yesterday = today - Duration::days(1);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 0;
    let mut expected = most_recent;
    for day in days.iter().rev() {
        if *day == expected {
            streak += 1;
            expected = expected - Duration::days(1);
        } else {
            break;
        }
    }

    streak
}

/// Longest run of consecutive days anywhere in the history
fn longest_streak(days: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut running = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        running = match previous {
            Some(prev) if (*day - prev).num_days() == 1 => running + 1,
            _ => 1,
        };
        longest = longest.max(running);
        previous = Some(*day);
    }

    longest
}

/// Journaling statistics kept for each user
///
/// These are recalculated from the user's full entry history whenever an
/// entry is added, removed or moved to a different day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Which user these stats are for
    pub user_id: UserId,
    /// Total number of entries written
    pub total_entries: u32,
    /// Consecutive days journaled, ending today or yesterday
    pub current_streak: u32,
    /// Best streak ever achieved
    pub longest_streak: u32,
    /// Date of the most recent entry (None if the user never wrote one)
    pub last_entry_date: Option<DateTime<Utc>>,
}

impl UserStats {
    /// Create an empty stats record for a user who hasn't written yet
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            total_entries: 0,
            current_streak: 0,
            longest_streak: 0,
            last_entry_date: None,
        }
    }

    /// Recalculate stats from every entry date the user has
    pub fn recompute(user_id: UserId, entry_dates: &[DateTime<Utc>], today: NaiveDate) -> Self {
        let streaks = compute_streaks(entry_dates, today);

        Self {
            user_id,
            total_entries: entry_dates.len() as u32,
            current_streak: streaks.current,
            longest_streak: streaks.longest,
            last_entry_date: entry_dates.iter().max().copied(),
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Every journey begins with a single entry.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. Reflection is becoming a habit.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. Journaling is becoming second nature.", self.current_streak),
            30..=99 => format!("Incredible! {} days of consistency. Your self-awareness is growing every day!", self.current_streak),
            _ => format!("Legendary! {} days of unwavering reflection. You're an inspiration!", self.current_streak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// Noon local time, `days_ago` days before `today()`
    fn at(days_ago: i64) -> DateTime<Utc> {
        let day = today() - Duration::days(days_ago);
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_no_entries() {
        assert_eq!(compute_streaks(&[], today()), StreakSummary { current: 0, longest: 0 });
    }

    #[test]
    fn test_single_entry_today() {
        assert_eq!(compute_streaks(&[at(0)], today()), StreakSummary { current: 1, longest: 1 });
    }

    #[test]
    fn test_three_consecutive_days() {
        let dates = [at(0), at(1), at(2)];
        assert_eq!(compute_streaks(&dates, today()), StreakSummary { current: 3, longest: 3 });
    }

    #[test]
    fn test_old_entry_breaks_current_streak() {
        assert_eq!(compute_streaks(&[at(3)], today()), StreakSummary { current: 0, longest: 1 });
    }

    #[test]
    fn test_longest_streak_in_history() {
        let dates = [at(0), at(1), at(5), at(6), at(7)];
        assert_eq!(compute_streaks(&dates, today()), StreakSummary { current: 2, longest: 3 });
    }

    #[test]
    fn test_same_day_entries_count_once() {
        let dates = [at(0), at(0), at(1)];
        assert_eq!(compute_streaks(&dates, today()), StreakSummary { current: 2, longest: 2 });
    }

    #[test]
    fn test_streak_ending_yesterday_and_unsorted_input() {
        let dates = [at(3), at(1), at(2)];
        assert_eq!(compute_streaks(&dates, today()), StreakSummary { current: 3, longest: 3 });
    }

    #[test]
    fn test_recompute_user_stats() {
        let dates = [at(2), at(0), at(1), at(10)];
        let stats = UserStats::recompute(UserId::new("u1"), &dates, today());

        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.last_entry_date, Some(at(0)));
        assert!(stats.longest_streak >= stats.current_streak);
    }

    #[test]
    fn test_motivational_messages() {
        let mut stats = UserStats::new(UserId::new("u1"));
        assert!(stats.motivational_message().contains("Ready to start"));

        stats.current_streak = 1;
        assert!(stats.motivational_message().contains("Great start"));

        stats.current_streak = 7;
        assert!(stats.motivational_message().contains("Excellent"));

        stats.current_streak = 100;
        assert!(stats.motivational_message().contains("Legendary"));
    }
}
