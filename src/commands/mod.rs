/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat` for the interactive chat shell
- `ask` for a single question on a fresh session
- `faq` for listing the built-in quick questions

Handlers stay small; the dialogue itself lives in [`crate::agent`].
*/

use crate::agent::{Advisory, Agent, Conversation, TurnReply};
use crate::config::{Config, API_KEY_ENV};
use crate::error::{FitbotError, Result};
use crate::faq::FaqTable;
use crate::providers::{create_provider, Message, Role};
use colored::Colorize;

// Special commands parser for the chat shell
pub mod special_commands;

use special_commands::{parse_special_command, SpecialCommand};

/// Shown when free text is entered without an API key
pub const FREE_TEXT_REFUSAL: &str =
    "Free-form questions need an API key. Try a quick question or /faq.";

/// What the chat shell should do with one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Send this text as the user turn
    Submit(String),
    /// Run a session command (never `QuickQuestion` or `None`)
    Command(SpecialCommand),
    /// Reject the line with an error message
    Refuse(String),
    /// Submit nothing and show a hint
    Hint(String),
}

/// Build the agent described by the configuration
///
/// # Errors
///
/// Returns error if the provider cannot be created
pub fn build_agent(config: &Config) -> Result<Agent> {
    let provider = create_provider(config)?;
    Ok(Agent::new_boxed(provider, FaqTable::builtin()))
}

/// Numbered quick-question lines, one-based
///
/// # Examples
///
/// ```
/// use fitbot::commands::quick_question_lines;
/// use fitbot::faq::FaqTable;
///
/// let lines = quick_question_lines(&FaqTable::builtin());
/// assert_eq!(lines[0], "  1. How to lose weight");
/// ```
pub fn quick_question_lines(faq: &FaqTable) -> Vec<String> {
    faq.questions()
        .enumerate()
        .map(|(i, q)| format!("  {}. {}", i + 1, q))
        .collect()
}

/// Text shown when remote questions are unavailable
pub fn unconfigured_banner() -> String {
    format!(
        "API key not configured. Set {} to ask your own questions; quick questions still work.",
        API_KEY_ENV
    )
}

/// Decide how the chat shell handles a non-empty input line
///
/// Numbers pick a quick question only while the conversation has not
/// started; afterwards they are plain text. Without an API key, free text is
/// refused unless it is exactly one of the quick questions.
///
/// # Examples
///
/// ```
/// use fitbot::agent::Conversation;
/// use fitbot::commands::{build_agent, resolve_input, InputAction};
/// use fitbot::config::Config;
///
/// let agent = build_agent(&Config::default()).unwrap();
/// let session = Conversation::new("Hello!", 12);
/// assert_eq!(
///     resolve_input(&agent, &session, "1"),
///     InputAction::Submit("How to lose weight".to_string())
/// );
/// ```
pub fn resolve_input(agent: &Agent, session: &Conversation, line: &str) -> InputAction {
    let trimmed = line.trim();

    match parse_special_command(trimmed) {
        Err(e) => InputAction::Refuse(e.to_string()),
        Ok(SpecialCommand::QuickQuestion(number)) if !session.has_started() => {
            match number.checked_sub(1).and_then(|i| agent.faq().get(i)) {
                Some(entry) => InputAction::Submit(entry.question.clone()),
                None => InputAction::Hint(format!(
                    "No quick question numbered {}. Pick 1-{}.",
                    number,
                    agent.faq().len()
                )),
            }
        }
        Ok(SpecialCommand::QuickQuestion(_)) | Ok(SpecialCommand::None) => {
            if !agent.is_configured() && agent.faq().lookup(trimmed).is_none() {
                InputAction::Refuse(FREE_TEXT_REFUSAL.to_string())
            } else {
                InputAction::Submit(trimmed.to_string())
            }
        }
        Ok(command) => InputAction::Command(command),
    }
}

/// Timestamp and short id shown above a transcript entry
///
/// # Examples
///
/// ```
/// use fitbot::commands::transcript_header;
/// use fitbot::providers::Message;
///
/// let header = transcript_header(&Message::user("hi"));
/// assert!(header.starts_with('['));
/// ```
pub fn transcript_header(message: &Message) -> String {
    let id = message.id.simple().to_string();
    format!("[{} #{}]", message.created_at.format("%H:%M:%S"), &id[..8])
}

fn print_advisory(advisory: &Advisory, to_stderr: bool) {
    let line = match advisory {
        Advisory::Warning(message) => format!("⚠ {}", message).yellow(),
        Advisory::Error(message) => format!("✖ {}", message).red(),
    };
    if to_stderr {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn role_label(role: Role) -> colored::ColoredString {
    match role {
        Role::User => "You:".green().bold(),
        Role::Assistant => "Fitness bot:".cyan().bold(),
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat shell.
    //!
    //! Creates an `Agent` and a `Conversation`, then runs a readline loop
    //! that turns each line into a special command, a quick question, or a
    //! free-text turn.

    use super::special_commands::print_help;
    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::io::Write;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::commands::chat;
    /// use fitbot::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let agent = build_agent(&config)?;
        let mut session = Conversation::new(&config.chat.greeting, config.chat.history_limit);
        let mut rl = DefaultEditor::new().map_err(FitbotError::Readline)?;

        print_welcome_banner(&agent);
        print_transcript(&session);
        if !agent.is_configured() {
            println!("{}\n", unconfigured_banner().red().bold());
        }
        print_quick_questions(agent.faq());

        loop {
            if !agent.is_configured() {
                println!("{}", unconfigured_banner().red());
            }

            match rl.readline("fitbot> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(trimmed).map_err(FitbotError::Readline)?;

                    let question = match resolve_input(&agent, &session, trimmed) {
                        InputAction::Submit(question) => question,
                        InputAction::Command(SpecialCommand::Exit) => break,
                        InputAction::Command(command) => {
                            run_command(&command, &agent, &mut session);
                            continue;
                        }
                        InputAction::Hint(hint) => {
                            println!("{}\n", hint.yellow());
                            continue;
                        }
                        InputAction::Refuse(message) => {
                            eprintln!("{}\n", message.red());
                            continue;
                        }
                    };

                    println!("{} {}", role_label(Role::User), question);
                    let reply = submit(&agent, &mut session, &question, &config).await;
                    print_reply(&reply);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn run_command(command: &SpecialCommand, agent: &Agent, session: &mut Conversation) {
        match command {
            SpecialCommand::Help => print_help(),
            SpecialCommand::ShowFaq => print_quick_questions(agent.faq()),
            SpecialCommand::History => print_transcript(session),
            SpecialCommand::Clear => {
                session.clear();
                println!("{}\n", "Conversation cleared.".green());
                print_transcript(session);
                print_quick_questions(agent.faq());
            }
            SpecialCommand::ShowStatus => print_status_display(agent, session),
            SpecialCommand::Exit | SpecialCommand::QuickQuestion(_) | SpecialCommand::None => {}
        }
    }

    /// Runs one turn behind the thinking placeholder
    async fn submit(
        agent: &Agent,
        session: &mut Conversation,
        question: &str,
        config: &Config,
    ) -> TurnReply {
        print!("{}", config.chat.thinking_text.dimmed());
        let _ = std::io::stdout().flush();

        let reply = agent.handle_turn(session, question).await;

        // Erase the placeholder line
        print!("\r\x1b[2K");
        let _ = std::io::stdout().flush();
        reply
    }

    fn print_reply(reply: &TurnReply) {
        println!("{}\n{}\n", role_label(Role::Assistant), reply.text);
        if let Some(advisory) = &reply.advisory {
            print_advisory(advisory, false);
            println!();
        }
    }

    fn print_transcript(session: &Conversation) {
        for message in session.transcript() {
            println!(
                "{} {}\n{}\n",
                transcript_header(message).dimmed(),
                role_label(message.role),
                message.text
            );
        }
    }

    fn print_quick_questions(faq: &FaqTable) {
        println!("{}", "Quick questions (type the number):".bold());
        for line in quick_question_lines(faq) {
            println!("{}", line);
        }
        println!();
    }

    /// Display welcome banner at the start of interactive chat mode
    fn print_welcome_banner(agent: &Agent) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║          Fitness Chatbot Pro - Interactive Chat              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model: {}", agent.model().cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    /// Display status information about the current session
    fn print_status_display(agent: &Agent, session: &Conversation) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Fitbot Session Status                    ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model:             {}", agent.model());
        println!(
            "API Key:           {}",
            if agent.is_configured() {
                "configured".green()
            } else {
                "missing".red()
            }
        );
        println!("User Turns:        {}", session.user_turns());
        println!("Transcript Size:   {} messages", session.transcript().len());
        println!(
            "History Window:    {}/{} messages",
            session.api_history().len(),
            session.history_limit()
        );
        println!();
    }
}

// Ask command handler
pub mod ask {
    //! Single question on a fresh session.

    use super::*;

    /// Ask one question and print the reply
    ///
    /// The reply goes to stdout; an advisory, if any, goes to stderr.
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `message` - The question to ask
    pub async fn run_ask(config: Config, message: String) -> Result<()> {
        tracing::info!("Answering a single question");

        let agent = build_agent(&config)?;
        let mut session = Conversation::new(&config.chat.greeting, config.chat.history_limit);

        let reply = agent.handle_turn(&mut session, &message).await;
        tracing::debug!(source = ?reply.source, "Reply ready");

        println!("{}", reply.text);
        if let Some(advisory) = &reply.advisory {
            print_advisory(advisory, true);
        }
        Ok(())
    }
}

// FAQ listing handler
pub mod faq {
    //! Lists the built-in quick questions.

    use super::*;

    /// Print the quick questions, optionally with their answers
    pub fn list_faq(answers: bool) -> Result<()> {
        let table = FaqTable::builtin();
        if answers {
            for (i, entry) in table.entries().iter().enumerate() {
                println!("{}. {}\n", i + 1, entry.question.bold());
                println!("{}\n", entry.answer);
            }
        } else {
            for line in quick_question_lines(&table) {
                println!("{}", line);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    #[test]
    fn test_quick_question_lines_are_one_based() {
        let table = FaqTable::builtin();
        let lines = quick_question_lines(&table);
        assert_eq!(lines.len(), table.len());
        assert_eq!(lines[0], "  1. How to lose weight");
        assert!(lines[table.len() - 1].starts_with(&format!("  {}. ", table.len())));
    }

    #[test]
    fn test_unconfigured_banner_names_env_var() {
        assert!(unconfigured_banner().contains(API_KEY_ENV));
    }

    #[test]
    fn test_build_agent_without_key() {
        let agent = build_agent(&Config::default()).unwrap();
        assert!(!agent.is_configured());
        assert_eq!(agent.faq().len(), FaqTable::builtin().len());
    }

    fn unconfigured_agent() -> Agent {
        build_agent(&Config::default()).unwrap()
    }

    fn configured_agent() -> Agent {
        build_agent(&test_config()).unwrap()
    }

    fn started_session() -> Conversation {
        let mut session = Conversation::new("Hello!", 12);
        session.add_user_message("first question");
        session.add_assistant_message("first answer");
        session
    }

    #[test]
    fn test_resolve_number_before_start_picks_quick_question() {
        let agent = configured_agent();
        let session = Conversation::new("Hello!", 12);

        assert_eq!(
            resolve_input(&agent, &session, "1"),
            InputAction::Submit("How to lose weight".to_string())
        );
        assert_eq!(
            resolve_input(&agent, &session, " 8 "),
            InputAction::Submit("Suggest some cardio exercises".to_string())
        );
    }

    #[test]
    fn test_resolve_number_after_start_is_plain_text() {
        let agent = configured_agent();
        let session = started_session();

        assert_eq!(
            resolve_input(&agent, &session, "3"),
            InputAction::Submit("3".to_string())
        );
    }

    #[test]
    fn test_resolve_out_of_range_numbers_submit_nothing() {
        let agent = configured_agent();
        let session = Conversation::new("Hello!", 12);

        for input in ["0", "9"] {
            match resolve_input(&agent, &session, input) {
                InputAction::Hint(hint) => assert!(hint.contains("Pick 1-8"), "hint: {}", hint),
                other => panic!("Expected hint for {}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_resolve_unconfigured_free_text_is_refused() {
        let agent = unconfigured_agent();

        assert_eq!(
            resolve_input(&agent, &Conversation::new("Hello!", 12), "tell me a joke"),
            InputAction::Refuse(FREE_TEXT_REFUSAL.to_string())
        );
        // After the first turn digits are free text too
        assert_eq!(
            resolve_input(&agent, &started_session(), "2"),
            InputAction::Refuse(FREE_TEXT_REFUSAL.to_string())
        );
    }

    #[test]
    fn test_resolve_unconfigured_exact_faq_text_is_accepted() {
        let agent = unconfigured_agent();
        let session = started_session();

        assert_eq!(
            resolve_input(&agent, &session, "  what to eat AFTER a workout "),
            InputAction::Submit("what to eat AFTER a workout".to_string())
        );
    }

    #[test]
    fn test_resolve_configured_free_text_is_submitted() {
        let agent = configured_agent();
        assert_eq!(
            resolve_input(&agent, &started_session(), "Is creatine safe?"),
            InputAction::Submit("Is creatine safe?".to_string())
        );
    }

    #[test]
    fn test_resolve_commands() {
        let agent = unconfigured_agent();
        let session = Conversation::new("Hello!", 12);

        assert_eq!(
            resolve_input(&agent, &session, "/history"),
            InputAction::Command(SpecialCommand::History)
        );
        assert_eq!(
            resolve_input(&agent, &session, "quit"),
            InputAction::Command(SpecialCommand::Exit)
        );
        match resolve_input(&agent, &session, "/lift") {
            InputAction::Refuse(message) => assert!(message.contains("Unknown command")),
            other => panic!("Expected refusal, got {:?}", other),
        }
    }

    #[test]
    fn test_transcript_header_shows_time_and_short_id() {
        let message = Message::assistant("Hello!");
        let header = transcript_header(&message);

        let expected_time = message.created_at.format("%H:%M:%S").to_string();
        let expected_id = message.id.simple().to_string()[..8].to_string();
        assert_eq!(header, format!("[{} #{}]", expected_time, expected_id));
    }

    #[test]
    fn test_transcript_headers_differ_per_entry() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(transcript_header(&a), transcript_header(&b));
    }

    #[test]
    fn test_list_faq_succeeds() {
        assert!(faq::list_faq(false).is_ok());
        assert!(faq::list_faq(true).is_ok());
    }
}
