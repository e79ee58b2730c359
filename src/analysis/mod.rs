/// Mood analysis for journal text
///
/// `MoodAnalyzer` tries the configured generative delegate first and falls
/// back to the keyword heuristic whenever the delegate is disabled, errors,
/// times out or returns something that cannot be parsed. Callers always get
/// a complete, in-range `Analysis` back.

pub mod delegate;
pub mod extract;
pub mod heuristic;
pub mod tables;
pub mod validate;

pub use delegate::GeminiDelegate;
pub use heuristic::HeuristicAnalyzer;

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::AnalyzerConfig;
use crate::domain::Analysis;

/// Reasons the delegate path did not produce an analysis
///
/// These never leave the analyzer; they only decide what gets logged
/// before the heuristic takes over.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis delegate is disabled")]
    Disabled,

    #[error("delegate request timed out")]
    Timeout,

    #[error("delegate transport error: {0}")]
    Http(String),

    #[error("delegate returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("delegate response has no text")]
    MissingText,

    #[error("no JSON object found in delegate response")]
    NoJson,

    #[error("invalid JSON from delegate: {0}")]
    Json(#[from] serde_json::Error),

    #[error("delegate JSON is not an object")]
    NotAnObject,
}

/// An external text-generation backend
#[async_trait]
pub trait AnalysisDelegate: Send + Sync {
    /// Send a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Parse raw delegate output into a validated analysis
pub fn parse_response(raw: &str) -> Result<Analysis, AnalysisError> {
    let object = extract::first_json_object(raw).ok_or(AnalysisError::NoJson)?;
    let value: serde_json::Value = serde_json::from_str(object)?;
    if !value.is_object() {
        return Err(AnalysisError::NotAnObject);
    }
    Ok(validate::analysis_from_value(&value).sanitized())
}

pub struct MoodAnalyzer {
    delegate: Option<Box<dyn AnalysisDelegate>>,
    heuristic: HeuristicAnalyzer,
    clock: Arc<dyn Clock>,
}

impl MoodAnalyzer {
    /// Build an analyzer from configuration
    ///
    /// When the delegate is disabled, or the HTTP client cannot be built,
    /// the analyzer runs on the heuristic alone.
    pub fn from_config(config: &AnalyzerConfig, clock: Arc<dyn Clock>) -> Self {
        if !config.delegate_enabled() {
            debug!("Mood analysis delegate disabled, using heuristic analysis");
            return Self::heuristic_only(clock);
        }

        match GeminiDelegate::new(config) {
            Ok(delegate) => {
                debug!("Mood analysis delegate enabled (model: {})", config.model);
                Self::with_delegate(Box::new(delegate), clock)
            }
            Err(e) => {
                warn!("Could not initialise analysis delegate: {}", e);
                Self::heuristic_only(clock)
            }
        }
    }

    pub fn heuristic_only(clock: Arc<dyn Clock>) -> Self {
        Self {
            delegate: None,
            heuristic: HeuristicAnalyzer::new(),
            clock,
        }
    }

    pub fn with_delegate(delegate: Box<dyn AnalysisDelegate>, clock: Arc<dyn Clock>) -> Self {
        Self {
            delegate: Some(delegate),
            heuristic: HeuristicAnalyzer::new(),
            clock,
        }
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Analyze text; never fails
    pub async fn analyze(&self, text: &str) -> Analysis {
        match self.try_delegate(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                self.log_fallback(&e);
                self.heuristic
                    .analyze(text, self.clock.now(), &mut rand::thread_rng())
            }
        }
    }

    /// Analyze text with an explicit randomness source for the fallback
    pub async fn analyze_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Analysis {
        match self.try_delegate(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                self.log_fallback(&e);
                self.heuristic.analyze(text, self.clock.now(), rng)
            }
        }
    }

    async fn try_delegate(&self, text: &str) -> Result<Analysis, AnalysisError> {
        let delegate = self.delegate.as_ref().ok_or(AnalysisError::Disabled)?;
        let raw = delegate.complete(&delegate::build_prompt(text)).await?;
        let analysis = parse_response(&raw)?;
        debug!("Delegate analysis succeeded: mood={}", analysis.mood);
        Ok(analysis)
    }

    fn log_fallback(&self, error: &AnalysisError) {
        match error {
            AnalysisError::Disabled => debug!("Using heuristic mood analysis"),
            AnalysisError::Status { code: 429, .. } => {
                warn!("Delegate rate limited, falling back to heuristic analysis")
            }
            other => warn!("Delegate analysis failed, falling back to heuristic: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::domain::{Mood, Sentiment};
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Delegate returning a fixed response, or a fixed failure
    struct CannedDelegate {
        response: Option<String>,
        status: u16,
    }

    impl CannedDelegate {
        fn ok(text: &str) -> Box<Self> {
            Box::new(Self {
                response: Some(text.to_string()),
                status: 200,
            })
        }

        fn failing(status: u16) -> Box<Self> {
            Box::new(Self {
                response: None,
                status,
            })
        }
    }

    #[async_trait]
    impl AnalysisDelegate for CannedDelegate {
        async fn complete(&self, _prompt: &str) -> Result<String, AnalysisError> {
            match &self.response {
                Some(text) => Ok(text.clone()),
                None => Err(AnalysisError::Status {
                    code: self.status,
                    body: "error".to_string(),
                }),
            }
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap()))
    }

    fn is_heuristic(analysis: &Analysis) -> bool {
        analysis.emotions.len() == 2 && analysis.emotions[1].emotion == "reflective"
    }

    #[tokio::test]
    async fn test_delegate_result_is_used() {
        let raw = "Here you go:\n{\"mood\": \"grateful\", \"confidence\": 0.88, \"sentiment\": \"positive\", \"sentimentScore\": 0.6, \"summary\": \"Thankful.\"}";
        let analyzer = MoodAnalyzer::with_delegate(CannedDelegate::ok(raw), clock());

        let analysis = analyzer.analyze("I am thankful for my friends today.").await;
        assert_eq!(analysis.mood, Mood::Grateful);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.summary, "Thankful.");
    }

    #[tokio::test]
    async fn test_rate_limit_falls_back() {
        let analyzer = MoodAnalyzer::with_delegate(CannedDelegate::failing(429), clock());
        let mut rng = StdRng::seed_from_u64(1);

        let analysis = analyzer
            .analyze_with_rng("Stressed and tired after a difficult week.", &mut rng)
            .await;
        assert!(is_heuristic(&analysis));
        assert_eq!(analysis.sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back() {
        for raw in ["I cannot help with that.", "{\"mood\": \"happy\"", "{not json}"] {
            let analyzer = MoodAnalyzer::with_delegate(CannedDelegate::ok(raw), clock());
            let analysis = analyzer.analyze("A quiet and peaceful afternoon.").await;
            assert!(is_heuristic(&analysis), "raw: {}", raw);
            assert_eq!(analysis.mood, Mood::Calm);
        }
    }

    #[tokio::test]
    async fn test_disabled_config_uses_heuristic() {
        let analyzer = MoodAnalyzer::from_config(&AnalyzerConfig::mock(), clock());
        assert!(!analyzer.has_delegate());

        let analysis = analyzer.analyze("Nothing special happened at all.").await;
        assert!(is_heuristic(&analysis));
        assert!((0.0..=1.0).contains(&analysis.confidence));
        assert!((-1.0..=1.0).contains(&analysis.sentiment_score));
    }

    #[test]
    fn test_parse_response_sanitizes() {
        let analysis = parse_response("{\"mood\": \"happy\", \"confidence\": 3}").unwrap();
        assert_eq!(analysis.confidence, 1.0);
        assert!(matches!(parse_response("[1, 2]"), Err(AnalysisError::NoJson)));
    }
}
