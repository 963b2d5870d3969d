//! Fitbot - Fitness chatbot library
//!
//! This library provides the core functionality for the Fitbot fitness
//! chatbot: a canned-answer FAQ table, a Gemini completion client that
//! classifies every response, and the dialogue loop that ties them together.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agent`: Dialogue loop, conversation state, and turn metrics
//! - `providers`: Completion provider abstraction and the Gemini client
//! - `faq`: Built-in quick questions and their answers
//! - `prompts`: Persona instruction and user-facing fallback texts
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Handlers for the CLI commands
//!
//! # Example
//!
//! ```no_run
//! use fitbot::{Agent, Config};
//! use fitbot::agent::Conversation;
//! use fitbot::faq::FaqTable;
//! use fitbot::providers::create_provider;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let agent = Agent::new_boxed(create_provider(&config)?, FaqTable::builtin());
//!     let mut session = Conversation::new(&config.chat.greeting, config.chat.history_limit);
//!     let reply = agent.handle_turn(&mut session, "Suggest some cardio exercises").await;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod faq;
pub mod prompts;
pub mod providers;

// Re-export commonly used types
pub use agent::{Advisory, Agent, Conversation, ReplySource, TurnReply};
pub use config::Config;
pub use error::{FitbotError, Result};
pub use faq::FaqTable;

#[cfg(test)]
pub mod test_utils;
