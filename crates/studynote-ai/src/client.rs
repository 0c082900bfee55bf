//! Typed HTTP client for the generative-language API.
//!
//! One endpoint (`models/{model}:generateContent`), two prompts: a
//! summarization prompt over note text and a study-guide prompt over a
//! topic. Generation parameters mirror what each prompt was tuned for.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use studynote_core::StudyGuide;

use crate::error::{AiError, AiResult};
use crate::extract::extract_json_object;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Upper-bound duration for a single request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 40;

/// Default summary length in words when the caller gives none.
pub const DEFAULT_SUMMARY_WORDS: usize = 100;

/// Largest summary length a caller may request.
pub const MAX_SUMMARY_WORDS: usize = 500;

/// Configuration for the AI client.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the generative-language backend (secret).
    pub api_key: String,
    /// API base URL. Overridable for tests.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Build a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: API key
    ///
    /// Optional:
    /// - `GEMINI_BASE_URL`: API base URL
    /// - `GEMINI_MODEL`: model name (default: "gemini-2.0-flash")
    /// - `AI_TIMEOUT_SECS`: request timeout (default: 40)
    pub fn from_env() -> AiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(timeout) = std::env::var("AI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout_secs = timeout;
        }

        Ok(config)
    }
}

// ============================================================================
// Wire types (external API contract)
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the generative-language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: AiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a client from configuration.
    pub fn new(mut config: AiConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Summarize `text` in roughly `max_words` words.
    ///
    /// `max_words` of zero means the default (100); requests above the
    /// model-safe limit are clamped.
    pub async fn summarize(&self, text: &str, max_words: usize) -> AiResult<String> {
        if text.trim().is_empty() {
            return Err(AiError::EmptyInput("no text provided for summarization"));
        }

        let words = effective_summary_words(max_words);
        let prompt = summary_prompt(text, words);
        let generated = self
            .generate(
                prompt,
                GenerationConfig {
                    temperature: 0.4,
                    top_k: 32,
                    top_p: 0.95,
                    max_output_tokens: 1024,
                },
            )
            .await?;

        Ok(generated.trim().to_string())
    }

    /// Generate a study guide (summary, flashcards, quiz) for a topic.
    ///
    /// The model is prompted for JSON but not trusted to emit it cleanly:
    /// the response goes through extraction, parsing, and shape validation,
    /// failing closed with [`AiError::Parse`] at each step.
    pub async fn generate_study_guide(&self, topic: &str) -> AiResult<StudyGuide> {
        if topic.trim().is_empty() {
            return Err(AiError::EmptyInput("no topic provided"));
        }

        let prompt = study_guide_prompt(topic);
        let generated = self
            .generate(
                prompt,
                GenerationConfig {
                    temperature: 0.7,
                    top_k: 32,
                    top_p: 0.95,
                    max_output_tokens: 2048,
                },
            )
            .await?;

        parse_study_guide(&generated)
    }

    /// Send one generateContent request and return the candidate text.
    async fn generate(&self, prompt: String, generation_config: GenerationConfig) -> AiResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "generative-language API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message: truncate(&message, 300),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        candidate_text(parsed)
    }
}

// ============================================================================
// Prompts and response handling
// ============================================================================

fn summary_prompt(text: &str, max_words: usize) -> String {
    format!(
        "Please provide a concise summary of the following text in about {} words:\n\n{}",
        max_words, text
    )
}

fn study_guide_prompt(topic: &str) -> String {
    format!(
        r#"Create a comprehensive study guide for the topic: "{topic}"
Please provide the response in the following JSON format:
{{
  "summary": "A brief overview of the topic (about 150 words)",
  "flashcards": [
    {{ "front": "Question/term", "back": "Answer/definition" }}
  ],
  "quizQuestions": [
    {{
      "question": "The question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": "The correct option"
    }}
  ]
}}
Include at least 5 flashcards and at least 3 quiz questions."#
    )
}

/// Resolve the requested summary length: zero means default, everything
/// is clamped to the model-safe maximum.
fn effective_summary_words(max_words: usize) -> usize {
    if max_words == 0 {
        DEFAULT_SUMMARY_WORDS
    } else {
        max_words.min(MAX_SUMMARY_WORDS)
    }
}

/// Pull the first candidate's text out of a generateContent response.
fn candidate_text(response: GenerateContentResponse) -> AiResult<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(AiError::MalformedResponse(
            "response contained no candidate text".to_string(),
        ));
    }
    Ok(text)
}

/// Turn free-form model output into a validated study guide.
fn parse_study_guide(generated: &str) -> AiResult<StudyGuide> {
    let span = extract_json_object(generated)
        .ok_or_else(|| AiError::Parse("no JSON object in model output".to_string()))?;

    let guide: StudyGuide = serde_json::from_str(span)
        .map_err(|e| AiError::Parse(format!("embedded JSON invalid: {}", e)))?;

    guide
        .validate()
        .map_err(|e| AiError::Parse(e.to_string()))?;

    Ok(guide)
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
