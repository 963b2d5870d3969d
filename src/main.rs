//! Fitbot - Fitness chatbot CLI
//!
#![doc = "Fitbot - Fitness chatbot CLI"]
#![doc = "Main entry point for the Fitbot application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fitbot::agent::metrics::init_metrics_exporter;
use fitbot::cli::{Cli, Commands};
use fitbot::commands;
use fitbot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);
    init_metrics_exporter();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { .. } => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { message, .. } => {
            commands::ask::run_ask(config, message).await?;
            Ok(())
        }
        Commands::Faq { answers } => {
            commands::faq::list_faq(answers)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with replies on stdout.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "fitbot=debug" } else { "fitbot=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
