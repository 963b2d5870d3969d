//! Special commands parser for interactive chat mode
//!
//! This module parses the commands that can be entered during an interactive
//! chat session instead of a question. Special commands allow users to:
//! - Show the quick questions or pick one by number
//! - Review or clear the conversation
//! - View session status
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands inspect or reset the session rather than being answered
/// by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// List the numbered quick questions
    ShowFaq,

    /// Print the full transcript
    History,

    /// Reset the conversation to the greeting
    Clear,

    /// Display model, credential and history status
    ShowStatus,

    /// Submit the quick question with this one-based number
    ///
    /// Only honored before the conversation has started; afterwards the
    /// digits are treated as a regular message.
    QuickQuestion(usize),

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be processed as a regular question.
    None,
}

/// Parse a user input string into a special command
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None for non-commands.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an argument it does not take.
///
/// # Examples
///
/// ```
/// use fitbot::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/FAQ").unwrap(), SpecialCommand::ShowFaq);
/// assert_eq!(parse_special_command("3").unwrap(), SpecialCommand::QuickQuestion(3));
/// assert_eq!(parse_special_command("how to eat healthier").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Ok(match trimmed.parse::<usize>() {
            Ok(number) => SpecialCommand::QuickQuestion(number),
            Err(_) => SpecialCommand::None,
        });
    }

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/faq" | "/questions" => Ok(SpecialCommand::ShowFaq),
        "/history" => Ok(SpecialCommand::History),
        "/clear" | "/reset" => Ok(SpecialCommand::Clear),
        "/status" => Ok(SpecialCommand::ShowStatus),

        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        input if input.contains(char::is_whitespace) => {
            let mut parts = input.splitn(2, char::is_whitespace);
            let command = parts.next().unwrap_or(input);
            let arg = parts.next().unwrap_or_default().trim();
            match command {
                "/help" | "/?" | "/faq" | "/questions" | "/history" | "/clear" | "/reset"
                | "/status" | "/exit" | "/quit" => Err(CommandError::UnsupportedArgument {
                    command: command.to_string(),
                    arg: arg.to_string(),
                }),
                _ => Err(CommandError::UnknownCommand(command.to_string())),
            }
        }

        input => Err(CommandError::UnknownCommand(input.to_string())),
    }
}

/// Display help text for special commands
///
/// # Examples
///
/// ```
/// use fitbot::commands::special_commands::print_help;
///
/// print_help();
/// ```
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

QUICK QUESTIONS:
  /faq            - List the numbered quick questions
  /questions      - Same as /faq
  <number>        - Ask that quick question (before your first message)

SESSION INFORMATION:
  /history        - Show the conversation so far
  /status         - Show model, API key and history status
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  /clear          - Start over from the greeting
  /reset          - Same as /clear
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the bot
  - Common questions are answered instantly without contacting the API
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/faq").unwrap(), SpecialCommand::ShowFaq);
        assert_eq!(
            parse_special_command("/questions").unwrap(),
            SpecialCommand::ShowFaq
        );
        assert_eq!(
            parse_special_command("/history").unwrap(),
            SpecialCommand::History
        );
        assert_eq!(parse_special_command("/clear").unwrap(), SpecialCommand::Clear);
        assert_eq!(parse_special_command("/reset").unwrap(), SpecialCommand::Clear);
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_special_command("/HELP").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("  /Faq  ").unwrap(), SpecialCommand::ShowFaq);
    }

    #[test]
    fn test_parse_exit_aliases() {
        for input in ["exit", "quit", "/exit", "/quit", "EXIT", " Quit "] {
            assert_eq!(
                parse_special_command(input).unwrap(),
                SpecialCommand::Exit,
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_parse_quick_question_numbers() {
        assert_eq!(
            parse_special_command("1").unwrap(),
            SpecialCommand::QuickQuestion(1)
        );
        assert_eq!(
            parse_special_command(" 8 ").unwrap(),
            SpecialCommand::QuickQuestion(8)
        );
        assert_eq!(
            parse_special_command("0").unwrap(),
            SpecialCommand::QuickQuestion(0)
        );
    }

    #[test]
    fn test_parse_overflowing_number_is_regular_text() {
        assert_eq!(
            parse_special_command("99999999999999999999999999").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_parse_regular_text() {
        assert_eq!(
            parse_special_command("How to lose weight").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(
            parse_special_command("3 sets of squats?").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(parse_special_command("").unwrap(), SpecialCommand::None);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_special_command("/foo").unwrap_err(),
            CommandError::UnknownCommand("/foo".to_string())
        );
        assert_eq!(
            parse_special_command("/foo bar").unwrap_err(),
            CommandError::UnknownCommand("/foo".to_string())
        );
    }

    #[test]
    fn test_parse_unsupported_argument() {
        let err = parse_special_command("/clear everything").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnsupportedArgument {
                command: "/clear".to_string(),
                arg: "everything".to_string(),
            }
        );
        assert!(err.to_string().contains("/help"));
    }
}
