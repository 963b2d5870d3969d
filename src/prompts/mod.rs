//! System instruction and canned reply texts
//!
//! This module provides the persona sent with every completion request and
//! the fixed user-visible texts the dialogue loop substitutes when a
//! completion does not succeed.

pub mod fitness_prompt;

/// Suffix appended to partial replies cut short by the safety filter
pub const SAFETY_NOTE: &str =
    "\n\n*[Note: This response may have been modified due to safety settings.]*";

/// Reply used when the safety filter withheld the whole answer
pub const SAFETY_WITHHELD: &str =
    "I'm unable to provide a complete response to that specific query due to safety guidelines.";

/// Advisory shown once when a reply was adjusted by the safety filter
pub const SAFETY_ADVISORY: &str =
    "The response was adjusted due to safety guidelines. Some information might be missing.";

/// Reply shown when the prompt itself was blocked
pub const BLOCKED_REPLY: &str =
    "I cannot respond to that query. Please rephrase or ask something else.";

/// Reply shown for every technical failure
pub const APOLOGY_REPLY: &str = "Sorry, I encountered a technical problem. Please try again.";

/// Builds the system instruction sent ahead of the conversation history
///
/// # Examples
///
/// ```
/// use fitbot::prompts::build_system_instruction;
///
/// let instruction = build_system_instruction();
/// assert!(instruction.contains("Fitness Chatbot"));
/// ```
pub fn build_system_instruction() -> String {
    fitness_prompt::generate_fitness_prompt()
}

/// Advisory text for a blocked prompt
///
/// # Examples
///
/// ```
/// use fitbot::prompts::blocked_advisory;
///
/// assert!(blocked_advisory("SAFETY").contains("blocked: SAFETY"));
/// ```
pub fn blocked_advisory(reason: &str) -> String {
    format!(
        "Your request could not be processed because it was blocked: {}. Please rephrase your message.",
        reason
    )
}

/// Advisory text shown when no API key is configured
pub fn unconfigured_advisory() -> String {
    format!(
        "API key for Gemini is not configured. Please set the {} environment variable.",
        crate::config::API_KEY_ENV
    )
}
