/// Keyword-scan fallback analyzer
///
/// Classifies an entry by counting how many words from three small affect
/// vocabularies appear in it, then fills the remaining fields from the
/// canned tables. The randomness source and the current time are passed in
/// so tests can pin both.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::analysis::tables::{
    self, EntryLength, CALM_WORDS, NEGATIVE_MOODS, NEGATIVE_WORDS, NEUTRAL_MOODS, POSITIVE_MOODS,
    POSITIVE_WORDS, STOP_WORDS,
};
use crate::domain::{count_words, Analysis, EmotionScore, Mood, Sentiment};

/// Maximum number of keywords the heuristic extracts
pub const HEURISTIC_KEYWORDS: usize = 8;

/// Vocabulary hits for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AffectCounts {
    pub positive: usize,
    pub negative: usize,
    pub calm: usize,
}

impl AffectCounts {
    /// Count vocabulary words contained anywhere in the lower-cased text
    pub fn scan(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            positive: count_hits(&lower, POSITIVE_WORDS),
            negative: count_hits(&lower, NEGATIVE_WORDS),
            calm: count_hits(&lower, CALM_WORDS),
        }
    }
}

fn count_hits(lower: &str, vocabulary: &[&str]) -> usize {
    vocabulary.iter().filter(|word| lower.contains(*word)).count()
}

/// Stateless fallback analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Produce a complete analysis from keyword counts and table lookups
    pub fn analyze<R: Rng + ?Sized>(&self, text: &str, now: DateTime<Utc>, rng: &mut R) -> Analysis {
        let counts = AffectCounts::scan(text);
        let (mood, sentiment, base_score) = classify(&counts, rng);

        let length_term = (text.chars().count() % 7) as f64 / 10.0;
        let time_term = now.timestamp_millis().rem_euclid(11) as f64 / 20.0;

        let sentiment_score = round2((base_score + time_term - 0.25).clamp(-1.0, 1.0));
        let confidence = round2(0.65 + rng.gen::<f64>() * 0.25 + length_term).min(0.95);

        let emotions = vec![
            EmotionScore::new(mood.as_str(), round2(0.7 + rng.gen::<f64>() * 0.2)),
            EmotionScore::new("reflective", round2(0.5 + rng.gen::<f64>() * 0.3)),
        ];

        let suggestions = pick_suggestions(mood, rng);
        let summary = compose_summary(mood, count_words(text) as usize, rng);

        tracing::debug!(
            "Heuristic analysis: mood={}, positive={}, negative={}, calm={}, score={}",
            mood,
            counts.positive,
            counts.negative,
            counts.calm,
            sentiment_score
        );

        Analysis {
            mood,
            confidence,
            emotions,
            sentiment,
            sentiment_score,
            keywords: extract_keywords(text),
            suggestions,
            summary,
        }
    }
}

/// Decide mood, polarity and the unperturbed score from vocabulary hits
fn classify<R: Rng + ?Sized>(counts: &AffectCounts, rng: &mut R) -> (Mood, Sentiment, f64) {
    let AffectCounts { positive, negative, calm } = *counts;

    if positive > negative && positive > calm && positive > 0 {
        let mood = POSITIVE_MOODS.choose(rng).copied().unwrap_or(Mood::Happy);
        let score = (0.3 + positive as f64 * 0.15).min(0.8);
        (mood, Sentiment::Positive, score)
    } else if negative > positive && negative > 0 {
        let mood = NEGATIVE_MOODS.choose(rng).copied().unwrap_or(Mood::Stressed);
        let score = (-0.3 - negative as f64 * 0.15).max(-0.8);
        (mood, Sentiment::Negative, score)
    } else if calm > 0 {
        (Mood::Calm, Sentiment::Positive, 0.2 + calm as f64 * 0.1)
    } else {
        let mood = NEUTRAL_MOODS.choose(rng).copied().unwrap_or_default();
        let score = (rng.gen::<f64>() - 0.5) * 0.4;
        (mood, Sentiment::Neutral, score)
    }
}

/// Most frequent content words, ties kept in first-seen order
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let tokens = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() > 3 && !STOP_WORDS.contains(&token));

    for token in tokens {
        match index.get(token) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.to_string(), order.len());
                order.push((token.to_string(), 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(HEURISTIC_KEYWORDS)
        .map(|(word, _)| word)
        .collect()
}

fn pick_suggestions<R: Rng + ?Sized>(mood: Mood, rng: &mut R) -> Vec<String> {
    tables::suggestions_for(mood)
        .choose(rng)
        .map(|set| set.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

fn compose_summary<R: Rng + ?Sized>(mood: Mood, word_count: usize, rng: &mut R) -> String {
    let opener = tables::summaries_for(mood).choose(rng).copied().unwrap_or_default();
    let clause = EntryLength::from_word_count(word_count)
        .clauses()
        .choose(rng)
        .copied()
        .unwrap_or_default();
    format!("{}{}", opener, clause)
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
