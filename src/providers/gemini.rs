//! Gemini provider implementation for Fitbot
//!
//! This module implements [`CompletionProvider`] for the Google Gemini
//! `generateContent` endpoint. One request is sent per user turn, carrying
//! the system instruction, the most recent history entries, fixed sampling
//! parameters, and safety thresholds for four harm categories. Whatever comes
//! back is classified into a [`CompletionOutcome`].

use crate::config::{GeminiConfig, GenerationConfig};
use crate::error::{FitbotError, Result};
use crate::prompts;
use crate::providers::{CompletionOutcome, CompletionProvider, Message};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Harm categories that receive the configured safety threshold
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

const SAFETY_FINISH_REASON: &str = "SAFETY";
const MISSING_ERROR_MESSAGE: &str = "No specific error message provided by API.";

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use fitbot::config::GeminiConfig;
/// use fitbot::providers::{CompletionProvider, GeminiProvider, Message};
///
/// # async fn example() -> fitbot::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config, 10)?;
/// let outcome = provider.complete(&[Message::user("What is HIIT?")]).await;
/// println!("{}", outcome.label());
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    request_history_limit: usize,
    system_instruction: String,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
    safety_settings: Vec<GeminiSafetySetting>,
}

/// Role-tagged content block
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

/// Text part of a content block
#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl From<GenerationConfig> for GeminiGenerationConfig {
    fn from(config: GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiSafetySetting {
    category: String,
    threshold: String,
}

/// Successful response body
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Error response body
#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, credential, and generation settings
    /// * `request_history_limit` - Most recent history entries sent per request
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::config::GeminiConfig;
    /// use fitbot::providers::{CompletionProvider, GeminiProvider};
    ///
    /// let provider = GeminiProvider::new(GeminiConfig::default(), 10).unwrap();
    /// assert!(!provider.is_configured());
    /// assert_eq!(provider.model(), "gemini-2.0-flash");
    /// ```
    pub fn new(config: GeminiConfig, request_history_limit: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("fitbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FitbotError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: model={}, configured={}",
            config.model,
            config.is_configured()
        );

        Ok(Self {
            client,
            config,
            request_history_limit,
            system_instruction: prompts::build_system_instruction(),
        })
    }

    /// Full `generateContent` URL, without the key query parameter
    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Build the request body from the most recent history entries
    fn build_request(&self, history: &[Message]) -> GeminiRequest {
        let start = history.len().saturating_sub(self.request_history_limit);

        let mut contents = Vec::with_capacity(history.len() - start + 1);
        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: self.system_instruction.clone(),
            }],
        });
        contents.extend(history[start..].iter().map(|m| GeminiContent {
            role: m.role.api_name().to_string(),
            parts: vec![GeminiPart {
                text: m.text.clone(),
            }],
        }));

        let safety_settings = HARM_CATEGORIES
            .iter()
            .map(|category| GeminiSafetySetting {
                category: (*category).to_string(),
                threshold: self.config.safety_threshold.clone(),
            })
            .collect();

        GeminiRequest {
            contents,
            generation_config: self.config.generation.into(),
            safety_settings,
        }
    }

    /// Send one request and classify the result
    async fn send_once(&self, api_key: &str, request: &GeminiRequest) -> CompletionOutcome {
        let response = match self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            // Strip the URL so the key never reaches the logs.
            Err(e) => return CompletionOutcome::TransportError(e.without_url().to_string()),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => classify_response(status, &body),
            Err(e) => CompletionOutcome::TransportError(e.without_url().to_string()),
        }
    }
}

/// Classify a raw HTTP status and body into a [`CompletionOutcome`]
///
/// A candidate whose finish reason is `SAFETY` is reported as
/// `SafetyModified` even when it carries partial text.
fn classify_response(status: u16, body: &str) -> CompletionOutcome {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<GeminiErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| MISSING_ERROR_MESSAGE.to_string());
        return CompletionOutcome::ApiError { status, message };
    }

    let parsed: GeminiResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return CompletionOutcome::UnexpectedShape(format!("invalid JSON: {}", e)),
    };

    if let Some(candidate) = parsed.candidates.into_iter().next() {
        let first_text = candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        if candidate.finish_reason.as_deref() == Some(SAFETY_FINISH_REASON) {
            let text = match first_text {
                Some(partial) if !partial.is_empty() => format!("{}{}", partial, prompts::SAFETY_NOTE),
                _ => prompts::SAFETY_WITHHELD.to_string(),
            };
            return CompletionOutcome::SafetyModified(text);
        }

        return match first_text {
            Some(text) => CompletionOutcome::Success(text),
            None => CompletionOutcome::UnexpectedShape(format!(
                "candidate without text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("none")
            )),
        };
    }

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return CompletionOutcome::BlockedPrompt(reason);
    }

    CompletionOutcome::UnexpectedShape(format!("no candidates: {}", body))
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, history: &[Message]) -> CompletionOutcome {
        let Some(api_key) = self.config.api_key() else {
            tracing::warn!("Gemini API key not configured; skipping request");
            return CompletionOutcome::Unconfigured;
        };

        let request = self.build_request(history);
        tracing::debug!(
            "Sending Gemini request: model={}, {} contents",
            self.config.model,
            request.contents.len()
        );

        let mut outcome = self.send_once(api_key, &request).await;
        if let CompletionOutcome::TransportError(message) = &outcome {
            tracing::warn!("Gemini request failed ({}), retrying once", message);
            outcome = self.send_once(api_key, &request).await;
        }

        match &outcome {
            CompletionOutcome::ApiError { status, message } => {
                tracing::error!("Gemini returned error {}: {}", status, message);
            }
            CompletionOutcome::TransportError(message) => {
                tracing::error!("Gemini request failed after retry: {}", message);
            }
            CompletionOutcome::UnexpectedShape(detail) => {
                tracing::error!("Unexpected Gemini response structure: {}", detail);
            }
            other => {
                tracing::debug!("Gemini response classified as {}", other.label());
            }
        }

        outcome
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
