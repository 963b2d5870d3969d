//! Provider module for Fitbot
//!
//! This module contains the completion provider abstraction and the Gemini
//! implementation.

pub mod base;
pub mod gemini;

pub use base::{CompletionOutcome, CompletionProvider, Message, Role};
pub use gemini::GeminiProvider;

use crate::config::Config;
use crate::error::Result;

/// Create the completion provider described by the configuration
///
/// # Arguments
///
/// * `config` - Full application configuration
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized
///
/// # Examples
///
/// ```
/// use fitbot::config::Config;
/// use fitbot::providers::{create_provider, CompletionProvider};
///
/// let provider = create_provider(&Config::default()).unwrap();
/// assert!(!provider.is_configured());
/// ```
pub fn create_provider(config: &Config) -> Result<Box<dyn CompletionProvider>> {
    Ok(Box::new(GeminiProvider::new(
        config.provider.clone(),
        config.chat.request_history_limit,
    )?))
}
