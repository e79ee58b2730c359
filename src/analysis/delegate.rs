/// Gemini-backed analysis delegate
///
/// Sends the analysis prompt to the Generative Language API
/// `generateContent` endpoint and returns the text of the first candidate.
/// The HTTP client carries the configured timeout, and every failure is
/// reported as an `AnalysisError` for the analyzer to recover from.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::analysis::{AnalysisDelegate, AnalysisError};
use crate::config::AnalyzerConfig;

/// Build the prompt asking the model for a JSON analysis of `text`
pub fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following journal entry and provide insights:

"{text}"

Please provide a JSON response with the following structure:
{{
  "mood": "primary emotion (happy, sad, anxious, grateful, excited, calm, stressed, thoughtful, content, overwhelmed)",
  "confidence": "confidence level from 0 to 1",
  "emotions": [
    {{"emotion": "emotion name", "confidence": 0.8}}
  ],
  "sentiment": "positive, negative, or neutral",
  "sentimentScore": "score from -1 to 1",
  "keywords": ["important", "keywords", "from", "text"],
  "suggestions": [
    "personalized wellness suggestion 1",
    "personalized wellness suggestion 2",
    "personalized wellness suggestion 3"
  ],
  "summary": "brief summary of the journal entry and emotional state"
}}

Focus on being helpful, empathetic, and providing actionable wellness suggestions based on the emotional content."#
    )
}

pub struct GeminiDelegate {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiDelegate {
    /// Build a delegate from config; fails if no API key is configured
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AnalysisError::Disabled)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AnalysisError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl AnalysisDelegate for GeminiDelegate {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let resp = self
            .http
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::Timeout
                } else {
                    AnalysisError::Http(format!("gemini request failed: {e}"))
                }
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AnalysisError::Http(format!("gemini read body failed: {e}")))?;

        if !status.is_success() {
            return Err(AnalysisError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let json: Value = serde_json::from_str(&body)?;
        candidate_text(&json)
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
pub fn candidate_text(json: &Value) -> Result<String, AnalysisError> {
    json.get("candidates")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or(AnalysisError::MissingText)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::Arc;

    use crate::analysis::MoodAnalyzer;
    use crate::clock::SystemClock;

    /// Consume one HTTP request: headers plus a Content-Length body
    fn read_request(stream: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = match stream.read(&mut chunk) {
                Ok(0) | Err(_) => return,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    /// Answer a single request on a local port; `None` never answers
    fn serve_once(reply: Option<(&'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                read_request(&mut stream);
                match reply {
                    Some((status, body)) => {
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = stream.write_all(response.as_bytes());
                    }
                    None => std::thread::sleep(std::time::Duration::from_secs(3)),
                }
            }
        });
        format!("http://{}/v1beta", addr)
    }

    fn delegate_for(endpoint: String) -> GeminiDelegate {
        GeminiDelegate::new(&AnalyzerConfig {
            api_key: Some("test-key".to_string()),
            endpoint,
            timeout_secs: 1,
            ..AnalyzerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_candidate_text() {
        let endpoint = serve_once(Some((
            "200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"mood\":\"calm\"}"}]}}]}"#,
        )));
        let text = delegate_for(endpoint).complete("prompt").await.unwrap();
        assert_eq!(text, r#"{"mood":"calm"}"#);
    }

    #[tokio::test]
    async fn test_complete_maps_error_status() {
        let endpoint = serve_once(Some(("429 Too Many Requests", r#"{"error":"quota"}"#)));
        let result = delegate_for(endpoint).complete("prompt").await;
        assert!(matches!(result, Err(AnalysisError::Status { code: 429, .. })));
    }

    #[tokio::test]
    async fn test_complete_rejects_non_json_body() {
        let endpoint = serve_once(Some(("200 OK", "<html>maintenance</html>")));
        let result = delegate_for(endpoint).complete("prompt").await;
        assert!(matches!(result, Err(AnalysisError::Json(_))));
    }

    #[tokio::test]
    async fn test_complete_times_out() {
        let endpoint = serve_once(None);
        let result = delegate_for(endpoint).complete("prompt").await;
        assert!(matches!(result, Err(AnalysisError::Timeout)));
    }

    #[tokio::test]
    async fn test_analyzer_falls_back_when_backend_fails() {
        let endpoint = serve_once(Some(("500 Internal Server Error", "oops")));
        let analyzer = MoodAnalyzer::with_delegate(Box::new(delegate_for(endpoint)), Arc::new(SystemClock));

        let analysis = analyzer.analyze("A calm and peaceful afternoon in the garden.").await;
        assert_eq!(analysis.mood, crate::domain::Mood::Calm);
        assert!(!analysis.suggestions.is_empty());
    }

    #[test]
    fn test_prompt_embeds_text_and_schema() {
        let prompt = build_prompt("Long day at the office.");
        assert!(prompt.contains("\"Long day at the office.\""));
        assert!(prompt.contains("\"sentimentScore\""));
        assert!(prompt.contains("{\"emotion\": \"emotion name\", \"confidence\": 0.8}"));
    }

    #[test]
    fn test_candidate_text() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "{\"mood\":\"calm\"}"}]}}]
        });
        assert_eq!(candidate_text(&body).unwrap(), "{\"mood\":\"calm\"}");

        let empty = json!({"candidates": []});
        assert!(matches!(candidate_text(&empty), Err(AnalysisError::MissingText)));
    }

    #[test]
    fn test_new_requires_key() {
        assert!(matches!(
            GeminiDelegate::new(&AnalyzerConfig::default()),
            Err(AnalysisError::Disabled)
        ));

        let config = AnalyzerConfig {
            api_key: Some("k".to_string()),
            endpoint: "https://example.test/v1beta/".to_string(),
            ..AnalyzerConfig::default()
        };
        let delegate = GeminiDelegate::new(&config).unwrap();
        assert_eq!(
            delegate.url(),
            "https://example.test/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
