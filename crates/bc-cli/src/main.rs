mod cli;
mod commands;

use anyhow::Result;
use bc_config::Config;
use clap::Parser;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load config, using defaults");
            Config::default()
        }),
    };

    match cli.command {
        cli::Commands::Annotate { case, overrides } => {
            commands::case::annotate(&case, &overrides, &config)
        }
        cli::Commands::Redact { case, overrides } => {
            commands::case::redact(&case, &overrides, &config)
        }
        cli::Commands::Apply {
            narrative,
            annotations,
        } => commands::case::apply(&narrative, &annotations),
        cli::Commands::Preload => commands::preload::handle(),
        cli::Commands::Config => commands::config::handle(cli.config.as_deref(), &config),
    }
}
