/// Coerce loosely-typed delegate output into a well-formed Analysis
///
/// Model output is corrected rather than rejected: unknown labels fall back
/// to defaults, numbers are clamped, and lists are truncated.

use serde_json::Value;

use crate::domain::{
    Analysis, EmotionScore, Mood, Sentiment, MAX_EMOTIONS, MAX_KEYWORDS, MAX_SUGGESTIONS,
    MAX_SUMMARY_CHARS,
};

pub const DEFAULT_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_EMOTION_CONFIDENCE: f64 = 0.5;
pub const FALLBACK_SUMMARY: &str = "Journal entry processed successfully.";

/// Build an Analysis from a parsed JSON object
pub fn analysis_from_value(value: &Value) -> Analysis {
    let mood = value
        .get("mood")
        .and_then(Value::as_str)
        .and_then(Mood::parse)
        .unwrap_or(Mood::Thoughtful);

    let confidence = match number(value.get("confidence")) {
        Some(c) if c != 0.0 => c,
        _ => DEFAULT_CONFIDENCE,
    }
    .clamp(0.0, 1.0);

    let sentiment = value
        .get("sentiment")
        .and_then(Value::as_str)
        .and_then(Sentiment::parse)
        .unwrap_or(Sentiment::Neutral);

    let sentiment_score = number(value.get("sentimentScore"))
        .unwrap_or(0.0)
        .clamp(-1.0, 1.0);

    let emotions = value
        .get("emotions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(emotion).take(MAX_EMOTIONS).collect())
        .unwrap_or_default();

    let summary = match value.get("summary").and_then(Value::as_str) {
        Some(text) => text.chars().take(MAX_SUMMARY_CHARS).collect(),
        None => FALLBACK_SUMMARY.to_string(),
    };

    Analysis {
        mood,
        confidence,
        emotions,
        sentiment,
        sentiment_score,
        keywords: strings(value.get("keywords"), MAX_KEYWORDS),
        suggestions: strings(value.get("suggestions"), MAX_SUGGESTIONS),
        summary,
    }
}

/// Accept JSON numbers and numeric strings; NaN and infinities are discarded
fn number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn emotion(item: &Value) -> Option<EmotionScore> {
    match item {
        Value::String(name) if !name.trim().is_empty() => {
            Some(EmotionScore::new(name.trim(), DEFAULT_EMOTION_CONFIDENCE))
        }
        Value::Object(_) => {
            let name = item.get("emotion").and_then(Value::as_str)?.trim();
            if name.is_empty() {
                return None;
            }
            let confidence = number(item.get("confidence"))
                .unwrap_or(DEFAULT_EMOTION_CONFIDENCE)
                .clamp(0.0, 1.0);
            Some(EmotionScore::new(name, confidence))
        }
        _ => None,
    }
}

fn strings(value: Option<&Value>, limit: usize) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .take(limit)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_well_formed_output() {
        let analysis = analysis_from_value(&json!({
            "mood": "grateful",
            "confidence": 0.9,
            "emotions": [{"emotion": "grateful", "confidence": 0.85}, {"emotion": "warm", "confidence": 0.6}],
            "sentiment": "positive",
            "sentimentScore": 0.7,
            "keywords": ["family", "dinner"],
            "suggestions": ["Call your sister", "Write it down", "Savor it"],
            "summary": "A warm, thankful evening."
        }));

        assert_eq!(analysis.mood, Mood::Grateful);
        assert_eq!(analysis.confidence, 0.9);
        assert_eq!(analysis.emotions.len(), 2);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.sentiment_score, 0.7);
        assert_eq!(analysis.keywords, vec!["family", "dinner"]);
        assert_eq!(analysis.suggestions.len(), 3);
        assert_eq!(analysis.summary, "A warm, thankful evening.");
    }

    #[test]
    fn test_invalid_labels_fall_back() {
        let analysis = analysis_from_value(&json!({
            "mood": "ecstatic",
            "sentiment": "mixed",
            "summary": 42
        }));

        assert_eq!(analysis.mood, Mood::Thoughtful);
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(analysis.sentiment_score, 0.0);
        assert!(analysis.emotions.is_empty());
        assert_eq!(analysis.summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn test_numbers_are_clamped_and_strings_accepted() {
        let analysis = analysis_from_value(&json!({
            "mood": "Stressed",
            "confidence": "1.4",
            "sentimentScore": -2.5
        }));

        assert_eq!(analysis.mood, Mood::Stressed);
        assert_eq!(analysis.confidence, 1.0);
        assert_eq!(analysis.sentiment_score, -1.0);
    }

    #[test]
    fn test_zero_confidence_uses_default() {
        let analysis = analysis_from_value(&json!({"confidence": 0}));
        assert_eq!(analysis.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_lists_truncated_and_non_strings_dropped() {
        let analysis = analysis_from_value(&json!({
            "emotions": ["a", "b", {"emotion": "c"}, "d", "e", "f", "g"],
            "keywords": (0..15).map(|i| format!("k{}", i)).collect::<Vec<_>>(),
            "suggestions": ["one", 2, "three", null, "four", "five", "six"],
            "summary": "x".repeat(700)
        }));

        assert_eq!(analysis.emotions.len(), MAX_EMOTIONS);
        assert_eq!(analysis.emotions[2].confidence, DEFAULT_EMOTION_CONFIDENCE);
        assert_eq!(analysis.keywords.len(), MAX_KEYWORDS);
        assert_eq!(analysis.suggestions, vec!["one", "three", "four", "five"]);
        assert_eq!(analysis.summary.chars().count(), MAX_SUMMARY_CHARS);
    }
}
