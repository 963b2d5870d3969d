//! Per-session conversation state
//!
//! This module implements the two logs a chat session keeps:
//!
//! - the transcript, an unbounded append-only list of every turn shown on
//!   screen (starting with the greeting), and
//! - the outbound history, which mirrors the transcript's user and assistant
//!   turns but is bounded to the most recent `history_limit` entries.
//!
//! Turns are always appended to both logs in the same call, so the two stay
//! parallel except for the history's FIFO eviction.

use crate::providers::{Message, Role};

/// Conversation state for one chat session
///
/// # Eviction
///
/// [`Conversation::enforce_history_limit`] drops the oldest history entries
/// until at most `history_limit` remain. The dialogue loop calls it once per
/// turn, after both halves of the turn are recorded. The transcript is never
/// trimmed.
#[derive(Debug, Clone)]
pub struct Conversation {
    transcript: Vec<Message>,
    api_history: Vec<Message>,
    history_limit: usize,
    greeting: String,
    started: bool,
}

impl Conversation {
    /// Creates a new conversation holding only the greeting
    ///
    /// # Arguments
    ///
    /// * `greeting` - First assistant turn shown in the transcript
    /// * `history_limit` - Maximum entries kept in the outbound history
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::agent::Conversation;
    ///
    /// let conversation = Conversation::new("Hello!", 12);
    /// assert_eq!(conversation.transcript().len(), 1);
    /// assert!(conversation.api_history().is_empty());
    /// ```
    pub fn new(greeting: impl Into<String>, history_limit: usize) -> Self {
        let greeting = greeting.into();
        Self {
            transcript: vec![Message::assistant(greeting.clone())],
            api_history: Vec::new(),
            history_limit,
            greeting,
            started: false,
        }
    }

    /// Records a user turn in both logs
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::agent::Conversation;
    ///
    /// let mut conversation = Conversation::new("Hello!", 12);
    /// conversation.add_user_message("How to lose weight");
    /// assert!(conversation.has_started());
    /// assert_eq!(conversation.api_history().len(), 1);
    /// ```
    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.push(Message::user(text));
        self.started = true;
    }

    /// Records an assistant turn in both logs
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.push(Message::assistant(text));
    }

    fn push(&mut self, message: Message) {
        self.api_history.push(message.clone());
        self.transcript.push(message);
    }

    /// Drops the oldest history entries until at most `history_limit` remain
    ///
    /// # Returns
    ///
    /// The number of entries evicted
    pub fn enforce_history_limit(&mut self) -> usize {
        let excess = self.api_history.len().saturating_sub(self.history_limit);
        if excess > 0 {
            self.api_history.drain(..excess);
            tracing::debug!(
                evicted = excess,
                retained = self.api_history.len(),
                "Evicted oldest history entries"
            );
        }
        excess
    }

    /// Every turn shown on screen, oldest first
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// The bounded history sent to the completion endpoint, oldest first
    pub fn api_history(&self) -> &[Message] {
        &self.api_history
    }

    /// Maximum number of history entries retained after a turn
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Whether the user has submitted at least one turn
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Number of user turns in the transcript
    pub fn user_turns(&self) -> usize {
        self.transcript
            .iter()
            .filter(|m| m.role == Role::User)
            .count()
    }

    /// Resets the session to the greeting only
    pub fn clear(&mut self) {
        self.transcript = vec![Message::assistant(self.greeting.clone())];
        self.api_history.clear();
        self.started = false;
    }
}
