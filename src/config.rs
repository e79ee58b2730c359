/// Runtime configuration for the analyzer and the server
///
/// Values come from command-line flags with environment-variable fallbacks
/// (see `main.rs`). Everything has a usable default, so an empty environment
/// runs the journal with heuristic analysis only.

use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 15;

/// Settings for the generative-model delegate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Gemini API key; no key means the delegate is never called
    pub api_key: Option<String>,
    /// Force the heuristic even when a key is present
    pub force_mock: bool,
    pub model: String,
    /// Base URL of the Generative Language API
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            force_mock: false,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
        }
    }
}

impl AnalyzerConfig {
    /// Heuristic-only configuration
    pub fn mock() -> Self {
        Self {
            force_mock: true,
            ..Self::default()
        }
    }

    /// True when a delegate call should be attempted
    pub fn delegate_enabled(&self) -> bool {
        !self.force_mock
            && self
                .api_key
                .as_deref()
                .map(|k| !k.trim().is_empty())
                .unwrap_or(false)
    }

    /// Request timeout, never shorter than one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Interpret the `USE_MOCK_AI` style flag values
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
