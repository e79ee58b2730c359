/// Narrative reflection over a stats window

use crate::analytics::aggregate::MoodShare;
use crate::domain::{JournalEntry, Mood};

pub const EMPTY_REFLECTION: &str =
    "Start journaling to get personalized insights about your emotional patterns and well-being trends.";

/// Compose the reflection paragraph for a window of entries
///
/// The dominant mood is the distribution entry with the highest count; on a
/// tie the one encountered first wins.
pub fn reflect(entries: &[JournalEntry], distribution: &[MoodShare]) -> String {
    if entries.is_empty() {
        return EMPTY_REFLECTION.to_string();
    }

    let total = entries.len();
    let avg_sentiment = entries.iter().map(|e| e.sentiment_score).sum::<f64>() / total as f64;

    let mut reflection = format!(
        "Over the past period, you've made {} journal entries. ",
        total
    );

    reflection.push_str(if avg_sentiment > 0.2 {
        "Your overall emotional tone has been quite positive, showing good mental wellness. "
    } else if avg_sentiment < -0.2 {
        "You've been processing some challenging emotions. Remember that difficult periods are part of growth. "
    } else {
        "Your emotional state has been balanced, showing good emotional regulation. "
    });

    let dominant = distribution
        .iter()
        .fold(None::<&MoodShare>, |best, share| match best {
            Some(b) if b.count >= share.count => Some(b),
            _ => Some(share),
        });

    if let Some(dominant) = dominant {
        reflection.push_str(&format!(
            "Your most frequent mood was {}, appearing in {}% of your entries. ",
            dominant.name.to_lowercase(),
            dominant.percentage
        ));
        reflection.push_str(closing_clause(dominant.mood));
    }

    reflection
}

fn closing_clause(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy | Mood::Grateful => {
            "Keep nurturing the activities and mindset that support your positive well-being."
        }
        Mood::Stressed | Mood::Anxious => {
            "Consider incorporating more stress-relief techniques and self-care practices into your routine."
        }
        _ => "Continue this reflective practice to maintain your emotional awareness and growth.",
    }
}
