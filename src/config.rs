//! Configuration management for Fitbot
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! The Gemini API key is the only setting without a usable default. Its
//! absence is not a validation error: the chat shell reports it and the
//! completion client answers `Unconfigured` instead of calling out.

use anyhow::Context;
use crate::error::{FitbotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main configuration structure for Fitbot
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Completion provider settings
    #[serde(default)]
    pub provider: GeminiConfig,
    /// Dialogue loop and shell settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Gemini completion endpoint configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; prefer the `GEMINI_API_KEY` environment variable
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (useful for tests and local mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Model used for `generateContent`
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Sampling parameters sent with every request
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Threshold applied to every harm category
    #[serde(default = "default_safety_threshold")]
    pub safety_threshold: String,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("generation", &self.generation)
            .field("safety_threshold", &self.safety_threshold)
            .finish()
    }
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    90
}

fn default_safety_threshold() -> String {
    "BLOCK_MEDIUM_AND_ABOVE".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            generation: GenerationConfig::default(),
            safety_threshold: default_safety_threshold(),
        }
    }
}

impl GeminiConfig {
    /// Returns the API key when one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether a usable API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

/// Generation parameters for the completion request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling probability mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Maximum number of tokens generated per reply
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.75
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    1500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Dialogue loop and shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum entries kept in the outbound history after each turn
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of most recent history entries sent with each request
    #[serde(default = "default_request_history_limit")]
    pub request_history_limit: usize,

    /// First assistant turn of every session
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Placeholder shown while a completion is in flight
    #[serde(default = "default_thinking_text")]
    pub thinking_text: String,
}

fn default_history_limit() -> usize {
    12
}

fn default_request_history_limit() -> usize {
    10
}

fn default_greeting() -> String {
    "Hello! I'm your Fitness Chatbot Pro. Ask me anything about fitness, or select a common question below!".to_string()
}

fn default_thinking_text() -> String {
    "Fitness bot is thinking... 🧠".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            request_history_limit: default_request_history_limit(),
            greeting: default_greeting(),
            thinking_text: default_thinking_text(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(FitbotError::Io)
            .with_context(|| format!("Failed to read config file {}", path))?;
        serde_yaml::from_str(&contents)
            .map_err(FitbotError::Yaml)
            .with_context(|| format!("Failed to parse config {}", path))
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            if !api_key.trim().is_empty() {
                self.provider.api_key = Some(api_key);
                tracing::debug!("Env override: {}", API_KEY_ENV);
            }
        }

        if let Ok(api_base) = std::env::var("FITBOT_API_BASE") {
            tracing::debug!(api_base = %api_base, "Env override: FITBOT_API_BASE");
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("FITBOT_MODEL") {
            tracing::debug!(model = %model, "Env override: FITBOT_MODEL");
            self.provider.model = model;
        }

        if let Ok(timeout) = std::env::var("FITBOT_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid FITBOT_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(limit) = std::env::var("FITBOT_HISTORY_LIMIT") {
            if let Ok(value) = limit.parse() {
                self.chat.history_limit = value;
            } else {
                tracing::warn!("Invalid FITBOT_HISTORY_LIMIT: {}", limit);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(model) = cli.model_override() {
            tracing::debug!("Using model override: {}", model);
            self.provider.model = model.to_string();
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all values are within acceptable ranges. A missing API key is
    /// accepted here; it is reported by the chat shell instead.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider;

        if provider.model.trim().is_empty() {
            return Err(FitbotError::Config("provider.model cannot be empty".to_string()).into());
        }

        if provider.api_base.trim().is_empty() {
            return Err(
                FitbotError::Config("provider.api_base cannot be empty".to_string()).into(),
            );
        }

        if provider.timeout_seconds == 0 {
            return Err(FitbotError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        let generation = &provider.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(FitbotError::Config(
                "provider.generation.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if generation.top_p <= 0.0 || generation.top_p > 1.0 {
            return Err(FitbotError::Config(
                "provider.generation.top_p must be between 0.0 and 1.0".to_string(),
            )
            .into());
        }

        if generation.top_k == 0 {
            return Err(FitbotError::Config(
                "provider.generation.top_k must be greater than 0".to_string(),
            )
            .into());
        }

        if generation.max_output_tokens == 0 {
            return Err(FitbotError::Config(
                "provider.generation.max_output_tokens must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.history_limit == 0 {
            return Err(FitbotError::Config(
                "chat.history_limit must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.request_history_limit == 0 {
            return Err(FitbotError::Config(
                "chat.request_history_limit must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.request_history_limit > self.chat.history_limit {
            return Err(FitbotError::Config(format!(
                "chat.request_history_limit ({}) must not exceed chat.history_limit ({})",
                self.chat.request_history_limit, self.chat.history_limit
            ))
            .into());
        }

        Ok(())
    }
}
