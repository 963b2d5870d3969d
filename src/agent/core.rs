//! Dialogue loop
//!
//! This module implements the per-turn decision between a canned FAQ answer
//! and a remote completion, maps every completion outcome to a user-visible
//! reply plus at most one advisory, and keeps the session logs bounded.

use crate::agent::metrics::{self, CompletionTimer};
use crate::faq::FaqTable;
use crate::prompts;
use crate::providers::{CompletionOutcome, CompletionProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::Conversation;

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Canned answer from the FAQ table
    Faq,
    /// Remote completion (successful or not)
    Completion,
}

/// Notice shown once alongside a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The reply is usable but incomplete or refused
    Warning(String),
    /// The reply is a fallback for a technical failure
    Error(String),
}

impl Advisory {
    /// Advisory text
    pub fn message(&self) -> &str {
        match self {
            Self::Warning(message) | Self::Error(message) => message,
        }
    }
}

/// Result of handling one user turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// Markdown text recorded as the assistant turn
    pub text: String,
    /// Optional notice for the shell to display once
    pub advisory: Option<Advisory>,
    /// Where the reply came from
    pub source: ReplySource,
}

/// The dialogue loop
///
/// Holds the shared, read-only collaborators; per-session state lives in
/// [`Conversation`] and is passed in by the caller, so one agent can serve
/// any number of sessions.
///
/// # Examples
///
/// ```
/// use fitbot::agent::{Agent, Conversation, ReplySource};
/// use fitbot::config::Config;
/// use fitbot::faq::FaqTable;
/// use fitbot::providers::create_provider;
///
/// # #[tokio::main]
/// # async fn main() -> fitbot::error::Result<()> {
/// let config = Config::default();
/// let agent = Agent::new_boxed(create_provider(&config)?, FaqTable::builtin());
/// let mut session = Conversation::new(&config.chat.greeting, config.chat.history_limit);
///
/// let reply = agent.handle_turn(&mut session, "How to lose weight").await;
/// assert_eq!(reply.source, ReplySource::Faq);
/// # Ok(())
/// # }
/// ```
pub struct Agent {
    provider: Arc<dyn CompletionProvider>,
    faq: Arc<FaqTable>,
}

impl Agent {
    /// Creates a new agent
    ///
    /// # Arguments
    ///
    /// * `provider` - The completion provider
    /// * `faq` - The FAQ table consulted before any remote call
    pub fn new(provider: impl CompletionProvider + 'static, faq: FaqTable) -> Self {
        Self {
            provider: Arc::new(provider),
            faq: Arc::new(faq),
        }
    }

    /// Creates a new agent with a boxed provider
    ///
    /// Useful when the provider comes from [`crate::providers::create_provider`].
    pub fn new_boxed(provider: Box<dyn CompletionProvider>, faq: FaqTable) -> Self {
        Self {
            provider: Arc::from(provider),
            faq: Arc::new(faq),
        }
    }

    /// The FAQ table used for short-circuiting
    pub fn faq(&self) -> &FaqTable {
        &self.faq
    }

    /// Whether the provider has a credential for remote calls
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Name of the provider's model
    pub fn model(&self) -> String {
        self.provider.model()
    }

    /// Handles one user turn
    ///
    /// Records the user turn, answers it from the FAQ table or the provider,
    /// records the reply, then evicts old history entries.
    ///
    /// # Arguments
    ///
    /// * `session` - The session's conversation state
    /// * `user_message` - Raw user input; empty input is passed through
    pub async fn handle_turn(&self, session: &mut Conversation, user_message: &str) -> TurnReply {
        session.add_user_message(user_message);

        let reply = match self.faq.lookup(user_message) {
            Some(answer) => {
                info!("Answered from FAQ table");
                metrics::record_faq_turn();
                TurnReply {
                    text: answer.to_string(),
                    advisory: None,
                    source: ReplySource::Faq,
                }
            }
            None => {
                let timer = CompletionTimer::start();
                let outcome = self.provider.complete(session.api_history()).await;
                let elapsed = timer.finish(&outcome);
                debug!(
                    outcome = outcome.label(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Completion finished"
                );
                reply_for_outcome(outcome)
            }
        };

        session.add_assistant_message(reply.text.clone());
        metrics::record_evictions(session.enforce_history_limit());

        reply
    }
}

/// Maps a completion outcome to the reply text and advisory shown to the user
///
/// Remote failure detail goes to the log only and is never copied into the reply.
fn reply_for_outcome(outcome: CompletionOutcome) -> TurnReply {
    let (text, advisory) = match outcome {
        CompletionOutcome::Success(text) => (text, None),
        CompletionOutcome::SafetyModified(text) => {
            warn!("Reply adjusted by safety filter");
            (
                text,
                Some(Advisory::Warning(prompts::SAFETY_ADVISORY.to_string())),
            )
        }
        CompletionOutcome::BlockedPrompt(reason) => {
            warn!(reason = %reason, "Prompt blocked by safety filter");
            (
                prompts::BLOCKED_REPLY.to_string(),
                Some(Advisory::Warning(prompts::blocked_advisory(&reason))),
            )
        }
        CompletionOutcome::Unconfigured => (
            prompts::APOLOGY_REPLY.to_string(),
            Some(Advisory::Error(prompts::unconfigured_advisory())),
        ),
        failure => {
            debug!("Completion failed: {}", failure.diagnostic());
            let advisory = match failure {
                CompletionOutcome::TransportError(_) => {
                    "I'm having trouble connecting to my knowledge base. Please check your internet or try again later."
                }
                CompletionOutcome::ApiError { .. } => {
                    "There was an issue with the API. Please try again later."
                }
                _ => "I'm sorry, I couldn't generate a response at this time.",
            };
            (
                prompts::APOLOGY_REPLY.to_string(),
                Some(Advisory::Error(advisory.to_string())),
            )
        }
    };

    TurnReply {
        text,
        advisory,
        source: ReplySource::Completion,
    }
}
