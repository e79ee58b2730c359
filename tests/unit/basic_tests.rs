/// Basic unit tests to verify core functionality
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mood_journal_mcp::analysis::{parse_response, HeuristicAnalyzer};
use mood_journal_mcp::analytics::{aggregate, reflect, EMPTY_REFLECTION};
use mood_journal_mcp::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn noon(day: NaiveDate) -> DateTime<Utc> {
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn canned(mood: Mood, score: f64) -> Analysis {
        Analysis {
            mood,
            confidence: 0.8,
            emotions: vec![EmotionScore::new(mood.as_str(), 0.8)],
            sentiment: if score > 0.0 { Sentiment::Positive } else { Sentiment::Negative },
            sentiment_score: score,
            keywords: Vec::new(),
            suggestions: Vec::new(),
            summary: String::new(),
        }
    }

    fn entry_on(days_ago: i64, mood: Mood, score: f64) -> JournalEntry {
        let date = noon(today() - Duration::days(days_ago));
        JournalEntry::new(
            UserId::new("unit"),
            "An ordinary entry about the day.",
            Some(date),
            canned(mood, score),
            noon(today()),
        )
        .unwrap()
    }

    #[test]
    fn test_entry_creation() {
        let entry = entry_on(0, Mood::Happy, 0.6);
        assert_eq!(entry.word_count, 6);
        assert_eq!(entry.mood, Mood::Happy);
        assert_eq!(entry.day(), today());
    }

    #[test]
    fn test_entry_validation() {
        let result = JournalEntry::new(UserId::new("unit"), "short", None, canned(Mood::Calm, 0.2), noon(today()));
        assert!(matches!(result, Err(DomainError::InvalidText(_))));

        let next_week = noon(today() + Duration::days(7));
        let result = JournalEntry::new(
            UserId::new("unit"),
            "Writing about something that has not happened.",
            Some(next_week),
            canned(Mood::Calm, 0.2),
            noon(today()),
        );
        assert!(matches!(result, Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_streaks_from_history() {
        let dates: Vec<DateTime<Utc>> = [0, 1, 2, 5, 6, 7, 8]
            .iter()
            .map(|d| noon(today() - Duration::days(*d)))
            .collect();

        let summary = compute_streaks(&dates, today());
        assert_eq!(summary.current, 3);
        assert_eq!(summary.longest, 4);
    }

    #[test]
    fn test_streak_broken_after_missed_day() {
        let dates = vec![noon(today() - Duration::days(2)), noon(today() - Duration::days(3))];

        let summary = compute_streaks(&dates, today());
        assert_eq!(summary.current, 0);
        assert_eq!(summary.longest, 2);
    }

    #[test]
    fn test_parse_delegate_response() {
        let raw = r#"Here is the analysis:
```json
{"mood": "grateful", "confidence": 0.9, "emotions": ["joy", {"emotion": "warmth", "confidence": 0.6}],
 "sentiment": "positive", "sentimentScore": 1.7, "keywords": ["family"], "suggestions": [], "summary": "A warm day."}
```"#;

        let analysis = parse_response(raw).unwrap();
        assert_eq!(analysis.mood, Mood::Grateful);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.sentiment_score, 1.0);
        assert_eq!(analysis.emotions.len(), 2);
        assert_eq!(analysis.emotions[0].confidence, 0.5);
        assert_eq!(analysis.keywords, vec!["family".to_string()]);
    }

    #[test]
    fn test_parse_delegate_response_without_json() {
        assert!(parse_response("I could not analyze that entry.").is_err());
    }

    #[test]
    fn test_heuristic_analysis_is_complete() {
        let mut rng = StdRng::seed_from_u64(7);
        let analysis = HeuristicAnalyzer::new().analyze(
            "I felt sad and anxious after a stressful, frustrating meeting.",
            noon(today()),
            &mut rng,
        );

        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert!(analysis.sentiment_score < 0.0);
        assert!(!analysis.suggestions.is_empty());
        assert!(!analysis.summary.is_empty());
        assert!((0.0..=1.0).contains(&analysis.confidence));
    }

    #[test]
    fn test_analyzer_without_delegate_falls_back() {
        let clock = std::sync::Arc::new(FixedClock(noon(today())));
        let analyzer = MoodAnalyzer::from_config(&AnalyzerConfig::mock(), clock);
        assert!(!analyzer.has_delegate());

        let analysis = tokio_test::block_on(analyzer.analyze("Such a peaceful, quiet and calm evening."));
        assert_eq!(analysis.mood, Mood::Calm);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert!(analysis.keywords.contains(&"peaceful".to_string()));
    }

    #[test]
    fn test_aggregate_window() {
        let entries = vec![
            entry_on(0, Mood::Happy, 0.8),
            entry_on(1, Mood::Happy, 0.4),
            entry_on(2, Mood::Sad, -0.6),
        ];
        let dates: Vec<DateTime<Utc>> = entries.iter().map(|e| e.date).collect();
        let stats = UserStats::recompute(UserId::new("unit"), &dates, today());

        let result = aggregate(&entries, StatsRange::Week, &stats, today());
        assert_eq!(result.total_entries, 3);
        assert_eq!(result.total_words, 18);
        assert_eq!(result.current_streak, 3);
        assert_eq!(result.mood_trend.len(), 7);
        assert_eq!(result.mood_distribution[0].mood, Mood::Happy);
        assert_eq!(result.mood_distribution[0].count, 2);
        assert_eq!(result.mood_distribution[0].percentage, 67);
    }

    #[test]
    fn test_reflection_for_empty_window() {
        assert_eq!(reflect(&[], &[]), EMPTY_REFLECTION);
    }
}
