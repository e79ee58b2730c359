/// Weekly summary mail content

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{JournalEntry, UserProfile};
use crate::notifications::OutgoingMail;

const TOP_EMOTIONS: usize = 3;
const DEFAULT_EMOTIONS: [&str; 2] = ["reflective", "thoughtful"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub entries_this_week: u32,
    /// Mean entry score on the 0-10 scale, one decimal
    pub average_mood: f64,
    pub top_emotions: Vec<String>,
    pub insight: String,
}

/// Summarize a week of entries (None when there are none)
pub fn weekly_summary(entries: &[JournalEntry]) -> Option<WeeklySummary> {
    if entries.is_empty() {
        return None;
    }

    let count = entries.len() as u32;
    let mean = entries
        .iter()
        .map(|e| (e.sentiment_score + 1.0) * 5.0)
        .sum::<f64>()
        / entries.len() as f64;
    let average_mood = (mean * 10.0).round() / 10.0;

    Some(WeeklySummary {
        entries_this_week: count,
        average_mood,
        top_emotions: top_emotions(entries),
        insight: format!(
            "This week you wrote {} entries with an average mood of {}/10. Keep up the great work with your self-reflection journey!",
            count, average_mood
        ),
    })
}

/// Most frequent emotion names, ties kept in first-seen order
fn top_emotions(entries: &[JournalEntry]) -> Vec<String> {
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for emotion in entries.iter().flat_map(|e| e.emotions.iter()) {
        let name = emotion.emotion.trim().to_lowercase();
        if name.is_empty() {
            continue;
        }
        match index.get(&name) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(name.clone(), order.len());
                order.push((name, 1));
            }
        }
    }

    if order.is_empty() {
        return DEFAULT_EMOTIONS.iter().map(|e| e.to_string()).collect();
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().take(TOP_EMOTIONS).map(|(name, _)| name).collect()
}

pub fn summary_mail(profile: &UserProfile, summary: &WeeklySummary, week_of: NaiveDate) -> Option<OutgoingMail> {
    let to = profile.email.clone()?;
    Some(OutgoingMail {
        to,
        subject: format!(
            "📊 Your Weekly Mental Wellness Summary - Week of {}",
            week_of.format("%Y-%m-%d")
        ),
        body: format!(
            "Hi {}! Weekly Summary: {} entries, {}/10 average mood. Top emotions: {}. {}",
            profile.name,
            summary.entries_this_week,
            summary.average_mood,
            summary.top_emotions.join(", "),
            summary.insight
        ),
    })
}
