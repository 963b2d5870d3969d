//! Base provider trait and common types for Fitbot
//!
//! This module defines the message type shared by the transcript and the
//! outbound history, the classified outcome of a completion call, and the
//! `CompletionProvider` trait implemented by the Gemini client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person chatting
    User,
    /// The chatbot
    Assistant,
}

impl Role {
    /// Role name used by the Gemini API (`user` or `model`)
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::providers::Role;
    ///
    /// assert_eq!(Role::Assistant.api_name(), "model");
    /// ```
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One role-tagged turn of a conversation
///
/// Immutable once created. The id and timestamp are display metadata only and
/// are never sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id of this turn
    pub id: Uuid,
    /// Author of the turn
    pub role: Role,
    /// Markdown text of the turn
    pub text: String,
    /// When the turn was created
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello!");
    /// assert_eq!(msg.role, Role::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::providers::{Message, Role};
    ///
    /// let msg = Message::assistant("Hi, ready to train?");
    /// assert_eq!(msg.role, Role::Assistant);
    /// ```
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }
}

/// Classified result of one completion call
///
/// Every way a call can end maps to exactly one variant; the provider never
/// returns an error past its boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Generated text
    Success(String),
    /// Text cut short or withheld by the output safety filter; carries the
    /// display text with the safety note already applied
    SafetyModified(String),
    /// The prompt itself was blocked before generation
    BlockedPrompt(String),
    /// No API key configured; no request was made
    Unconfigured,
    /// The endpoint answered with a non-success status
    ApiError {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body
        message: String,
    },
    /// No response was received (DNS, connect, timeout, body read)
    TransportError(String),
    /// The response matched none of the recognized shapes
    UnexpectedShape(String),
}

impl CompletionOutcome {
    /// Short label used for logs and metrics
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::providers::CompletionOutcome;
    ///
    /// assert_eq!(CompletionOutcome::Unconfigured.label(), "unconfigured");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::SafetyModified(_) => "safety_modified",
            Self::BlockedPrompt(_) => "blocked_prompt",
            Self::Unconfigured => "unconfigured",
            Self::ApiError { .. } => "api_error",
            Self::TransportError(_) => "transport_error",
            Self::UnexpectedShape(_) => "unexpected_shape",
        }
    }

    /// Whether this outcome is a technical failure rather than a reply
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Unconfigured
                | Self::ApiError { .. }
                | Self::TransportError(_)
                | Self::UnexpectedShape(_)
        )
    }

    /// Diagnostic detail for logs; never shown to the user
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::providers::CompletionOutcome;
    ///
    /// let outcome = CompletionOutcome::ApiError {
    ///     status: 429,
    ///     message: "quota exceeded".to_string(),
    /// };
    /// assert!(outcome.diagnostic().contains("quota exceeded"));
    /// ```
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Success(text) => format!("success ({} chars)", text.len()),
            Self::SafetyModified(text) => format!("safety modified ({} chars)", text.len()),
            Self::BlockedPrompt(reason) => format!("prompt blocked: {}", reason),
            Self::Unconfigured => "API key not configured".to_string(),
            Self::ApiError { status, message } => {
                format!("API error (status {}): {}", status, message)
            }
            Self::TransportError(message) => format!("transport error: {}", message),
            Self::UnexpectedShape(detail) => format!("unexpected response shape: {}", detail),
        }
    }
}

/// Completion provider trait
///
/// Implementations send the history (whose last entry is the new user turn)
/// to a remote model and classify whatever comes back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a completion for the given history
    ///
    /// # Arguments
    ///
    /// * `history` - Outbound history, oldest first; the provider sends only
    ///   its most recent entries
    async fn complete(&self, history: &[Message]) -> CompletionOutcome;

    /// Whether a credential is available for remote calls
    fn is_configured(&self) -> bool;

    /// Name of the model used for completions
    fn model(&self) -> String {
        String::from("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text, "Hello");
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::assistant("same");
        let b = Message::assistant("same");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_role_api_names() {
        assert_eq!(Role::User.api_name(), "user");
        assert_eq!(Role::Assistant.api_name(), "model");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_outcome_labels_are_distinct() {
        let outcomes = [
            CompletionOutcome::Success(String::new()),
            CompletionOutcome::SafetyModified(String::new()),
            CompletionOutcome::BlockedPrompt(String::new()),
            CompletionOutcome::Unconfigured,
            CompletionOutcome::ApiError {
                status: 500,
                message: String::new(),
            },
            CompletionOutcome::TransportError(String::new()),
            CompletionOutcome::UnexpectedShape(String::new()),
        ];
        let labels: std::collections::HashSet<&str> =
            outcomes.iter().map(|o| o.label()).collect();
        assert_eq!(labels.len(), outcomes.len());
    }

    #[test]
    fn test_is_failure() {
        assert!(!CompletionOutcome::Success("ok".to_string()).is_failure());
        assert!(!CompletionOutcome::BlockedPrompt("SAFETY".to_string()).is_failure());
        assert!(CompletionOutcome::Unconfigured.is_failure());
        assert!(CompletionOutcome::TransportError("timeout".to_string()).is_failure());
    }

    #[test]
    fn test_diagnostic_includes_status_and_message() {
        let outcome = CompletionOutcome::ApiError {
            status: 429,
            message: "quota exceeded".to_string(),
        };
        let diagnostic = outcome.diagnostic();
        assert!(diagnostic.contains("429"));
        assert!(diagnostic.contains("quota exceeded"));
    }
}
