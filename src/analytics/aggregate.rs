/// Windowed statistics over a user's journal entries
///
/// Turns the entries of one stats window into counts, a mood distribution,
/// a seven-day mood trend and the narrative reflection. Streak numbers are
/// copied from the persisted UserStats rather than recalculated here.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analytics::reflection::reflect;
use crate::analytics::StatsRange;
use crate::domain::{JournalEntry, Mood, UserStats};

/// Number of days covered by the mood trend
pub const TREND_DAYS: i64 = 7;

/// How often a mood appeared in the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodShare {
    pub mood: Mood,
    /// Display name (e.g. "Happy")
    pub name: String,
    pub count: u32,
    /// Share of entries, rounded to a whole percent
    pub percentage: u32,
    pub color: String,
}

/// Average mood for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Average sentiment mapped onto 0..=10 (0 when the day has no entries)
    pub mood_score: u32,
    pub entries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_entries: u32,
    pub total_words: u32,
    pub average_words_per_entry: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub mood_distribution: Vec<MoodShare>,
    pub mood_trend: Vec<TrendPoint>,
    /// Mean of the trend scores, one decimal place
    pub average_mood: f64,
    pub weekly_reflection: String,
    pub range: StatsRange,
}

/// Aggregate entries that are already filtered to one user and window
pub fn aggregate(
    entries: &[JournalEntry],
    range: StatsRange,
    stats: &UserStats,
    today: NaiveDate,
) -> AggregateStats {
    let total_entries = entries.len() as u32;
    let total_words: u32 = entries.iter().map(|e| e.word_count).sum();
    let average_words_per_entry = if total_entries > 0 {
        (total_words as f64 / total_entries as f64).round() as u32
    } else {
        0
    };

    let mood_distribution = mood_distribution(entries);
    let mood_trend = mood_trend(entries, today);
    let average_mood = average_trend_score(&mood_trend);
    let weekly_reflection = reflect(entries, &mood_distribution);

    AggregateStats {
        total_entries,
        total_words,
        average_words_per_entry,
        current_streak: stats.current_streak,
        longest_streak: stats.longest_streak,
        mood_distribution,
        mood_trend,
        average_mood,
        weekly_reflection,
        range,
    }
}

/// Count moods in first-encountered order
pub fn mood_distribution(entries: &[JournalEntry]) -> Vec<MoodShare> {
    let total = entries.len();
    let mut order: Vec<(Mood, u32)> = Vec::new();
    let mut index: HashMap<Mood, usize> = HashMap::new();

    for entry in entries {
        match index.get(&entry.mood) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(entry.mood, order.len());
                order.push((entry.mood, 1));
            }
        }
    }

    order
        .into_iter()
        .map(|(mood, count)| MoodShare {
            mood,
            name: mood.display_name(),
            count,
            percentage: percentage(count as usize, total),
            color: mood.color().to_string(),
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// One point per day for the seven days ending `today`, oldest first
pub fn mood_trend(entries: &[JournalEntry], today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            let scores: Vec<f64> = entries
                .iter()
                .filter(|e| e.day() == date)
                .map(|e| e.sentiment_score)
                .collect();

            let mood_score = if scores.is_empty() {
                0
            } else {
                let avg = scores.iter().sum::<f64>() / scores.len() as f64;
                ((avg + 1.0) * 5.0).round().clamp(0.0, 10.0) as u32
            };

            TrendPoint {
                date,
                mood_score,
                entries: scores.len() as u32,
            }
        })
        .collect()
}

fn average_trend_score(trend: &[TrendPoint]) -> f64 {
    if trend.is_empty() {
        return 0.0;
    }
    let sum: u32 = trend.iter().map(|p| p.mood_score).sum();
    (sum as f64 / trend.len() as f64 * 10.0).round() / 10.0
}
