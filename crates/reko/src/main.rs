mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use reko_core::Config;
use reko_telemetry::Paths;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Paths::new()?.config_file(),
    };
    let config = Config::load(&config_path)?;

    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    tracing::debug!(
        path = %config_path.display(),
        exists = config_path.exists(),
        "using config"
    );

    match cli.command {
        Commands::Stats { dir, json } => commands::stats::run(&config, &dir, json),
        Commands::Predict { dir, context } => {
            commands::predict::run(&config, &dir, &context.join(" "))
        }
        Commands::Reply {
            dir,
            query,
            max_length,
            seed,
        } => commands::reply::run(&config, &dir, &query, max_length, seed),
        Commands::Chat { dir, seed } => commands::chat::run(&config, &dir, seed),
        Commands::Config { init, force } => commands::config::run(&config, &config_path, init, force),
        Commands::Feedback { stats } => commands::feedback::run(stats),
        Commands::Version => commands::version::run(),
    }
}
