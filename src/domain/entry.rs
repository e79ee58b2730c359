/// JournalEntry entity and the analysis attached to it
///
/// This module defines the JournalEntry struct that represents a single diary
/// entry written by a user, along with the Analysis record the mood analyzer
/// produces for it. An entry can only be built from an Analysis, so a saved
/// entry never lacks its mood, sentiment and confidence.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::local_day;
use crate::domain::{DomainError, EmotionScore, EntryId, Mood, Sentiment, UserId};

/// Minimum number of characters of trimmed journal text
pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_EMOTIONS: usize = 5;
pub const MAX_KEYWORDS: usize = 10;
pub const MAX_SUGGESTIONS: usize = 4;
pub const MAX_SUMMARY_CHARS: usize = 500;

/// Mood and sentiment metadata derived from an entry's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub mood: Mood,
    /// Analyzer confidence in the mood label (0.0 to 1.0)
    pub confidence: f64,
    pub emotions: Vec<EmotionScore>,
    pub sentiment: Sentiment,
    /// Polarity score (-1.0 to 1.0)
    pub sentiment_score: f64,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

impl Analysis {
    /// Clamp numeric fields and truncate lists to their allowed sizes
    pub fn sanitized(mut self) -> Self {
        self.confidence = clamp_or(self.confidence, 0.0, 1.0, 0.0);
        self.sentiment_score = clamp_or(self.sentiment_score, -1.0, 1.0, 0.0);
        self.emotions.truncate(MAX_EMOTIONS);
        self.keywords.truncate(MAX_KEYWORDS);
        self.suggestions.truncate(MAX_SUGGESTIONS);
        if self.summary.chars().count() > MAX_SUMMARY_CHARS {
            self.summary = self.summary.chars().take(MAX_SUMMARY_CHARS).collect();
        }
        self
    }
}

fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// A diary entry written by a user
///
/// Each time a user writes about their day we create a JournalEntry. The
/// `date` is the day being described, which may differ from `created_at`
/// when writing about the past.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Which user wrote this entry
    pub user_id: UserId,
    /// The moment the entry describes
    pub date: DateTime<Utc>,
    /// Trimmed entry text
    pub text: String,
    /// Whitespace-delimited token count of `text`
    pub word_count: u32,
    pub mood: Mood,
    pub confidence: f64,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub emotions: Vec<EmotionScore>,
    pub keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create a new journal entry with validation
    ///
    /// The text is trimmed and must be at least `MIN_TEXT_CHARS` long. When no
    /// date is given the entry describes `now`.
    pub fn new(
        user_id: UserId,
        text: &str,
        date: Option<DateTime<Utc>>,
        analysis: Analysis,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let text = Self::validate_text(text)?;
        let date = date.unwrap_or(now);
        Self::validate_date(&date, &now)?;

        let mut entry = Self {
            id: EntryId::new(),
            user_id,
            date,
            word_count: count_words(&text),
            text,
            mood: Mood::default(),
            confidence: 0.0,
            sentiment: Sentiment::default(),
            sentiment_score: 0.0,
            emotions: Vec::new(),
            keywords: Vec::new(),
            suggestions: Vec::new(),
            summary: String::new(),
            created_at: now,
            updated_at: now,
        };
        entry.apply_analysis(analysis);
        Ok(entry)
    }

    /// Replace the text together with the analysis computed for it
    pub fn set_text(
        &mut self,
        text: &str,
        analysis: Analysis,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let text = Self::validate_text(text)?;
        self.word_count = count_words(&text);
        self.text = text;
        self.apply_analysis(analysis);
        self.updated_at = now;
        Ok(())
    }

    /// Move the entry to a different moment
    pub fn set_date(&mut self, date: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), DomainError> {
        Self::validate_date(&date, &now)?;
        self.date = date;
        self.updated_at = now;
        Ok(())
    }

    /// Copy the analysis fields onto this entry
    pub fn apply_analysis(&mut self, analysis: Analysis) {
        let analysis = analysis.sanitized();
        self.mood = analysis.mood;
        self.confidence = analysis.confidence;
        self.sentiment = analysis.sentiment;
        self.sentiment_score = analysis.sentiment_score;
        self.emotions = analysis.emotions;
        self.keywords = analysis.keywords;
        self.suggestions = analysis.suggestions;
        self.summary = analysis.summary;
    }

    /// Local calendar day this entry belongs to
    pub fn day(&self) -> NaiveDate {
        local_day(&self.date)
    }

    // Validation helper methods

    /// Trim the text and check it is long enough
    fn validate_text(text: &str) -> Result<String, DomainError> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidText(
                "Journal text is required".to_string(),
            ));
        }

        if trimmed.chars().count() < MIN_TEXT_CHARS {
            return Err(DomainError::InvalidText(format!(
                "Journal entry must be at least {} characters long",
                MIN_TEXT_CHARS
            )));
        }

        Ok(trimmed.to_string())
    }

    /// Entries may not describe a local calendar day after today
    fn validate_date(date: &DateTime<Utc>, now: &DateTime<Utc>) -> Result<(), DomainError> {
        if local_day(date) > local_day(now) {
            return Err(DomainError::InvalidDate(
                "Cannot write journal entries for future dates".to_string(),
            ));
        }
        Ok(())
    }
}

/// Whitespace-delimited token count
pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}
