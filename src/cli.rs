//! Command-line interface definition for Fitbot
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot questions, and
//! listing the built-in quick questions.

use clap::{Parser, Subcommand};

/// Fitbot - Fitness chatbot CLI
///
/// Answers common fitness questions instantly and forwards everything else
/// to a Gemini completion endpoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "fitbot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "FITBOT_CONFIG", default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Fitbot
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the Gemini model from config
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Ask a single question and print the reply
    Ask {
        /// The message to send
        message: String,

        /// Override the Gemini model from config
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the built-in quick questions
    Faq {
        /// Print the canned answers as well
        #[arg(short, long)]
        answers: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Model override supplied on the command line, if any
    pub fn model_override(&self) -> Option<&str> {
        match &self.command {
            Commands::Chat { model } | Commands::Ask { model, .. } => model.as_deref(),
            Commands::Faq { .. } => None,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat { model: None },
        }
    }
}
