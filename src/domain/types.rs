/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like Mood, Sentiment, and ID types
/// that are used by JournalEntry, UserStats, and the analysis pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a journal entry
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass an entry ID where a user ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user owning entries and stats
///
/// Accounts live outside this crate, so the ID is an opaque string handed
/// to us by whoever authenticated the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dominant emotional tone of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Grateful,
    Excited,
    Calm,
    Stressed,
    #[default]
    Thoughtful,
    Content,
    Overwhelmed,
    Other,
}

/// Fallback display color for moods without a dedicated one
pub const DEFAULT_MOOD_COLOR: &str = "#6B7280";

impl Mood {
    /// Every mood in declaration order
    pub const ALL: [Mood; 11] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Grateful,
        Mood::Excited,
        Mood::Calm,
        Mood::Stressed,
        Mood::Thoughtful,
        Mood::Content,
        Mood::Overwhelmed,
        Mood::Other,
    ];

    /// Lower-case name used for storage and the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Grateful => "grateful",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Stressed => "stressed",
            Mood::Thoughtful => "thoughtful",
            Mood::Content => "content",
            Mood::Overwhelmed => "overwhelmed",
            Mood::Other => "other",
        }
    }

    /// Parse a mood name, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Mood> {
        let needle = s.trim().to_lowercase();
        Mood::ALL.iter().copied().find(|m| m.as_str() == needle)
    }

    /// Capitalized name for display (e.g. "Happy")
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Hex color used when charting this mood
    pub fn color(&self) -> &'static str {
        match self {
            Mood::Happy => "#10B981",
            Mood::Grateful => "#8B5CF6",
            Mood::Excited => "#F59E0B",
            Mood::Calm => "#3B82F6",
            Mood::Content => "#06D6A0",
            Mood::Thoughtful => "#6B7280",
            Mood::Stressed => "#EF4444",
            Mood::Anxious => "#F97316",
            Mood::Sad => "#8B5A7D",
            Mood::Overwhelmed => "#DC2626",
            Mood::Other => DEFAULT_MOOD_COLOR,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse polarity of an entry, independent of the specific mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn parse(s: &str) -> Option<Sentiment> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "negative" => Some(Sentiment::Negative),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected emotion with the analyzer's confidence in it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub emotion: String,
    pub confidence: f64,
}

impl EmotionScore {
    pub fn new(emotion: impl Into<String>, confidence: f64) -> Self {
        Self {
            emotion: emotion.into(),
            confidence,
        }
    }
}
