//! goaltrack CLI - Entry point
//!
//! Usage: goaltrack <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use goaltrack::cli::{Cli, Commands};
use goaltrack::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GEMINI_API_KEY and friends from ./.env
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("goaltrack=info,tower_http=info")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let load_config = || Config::load_with(cli.config.as_deref());

    // Run command; `config` edits the file itself so it never loads it
    match cli.command {
        Commands::Serve(args) => goaltrack::cli::serve::run(args, &load_config()?).await,
        Commands::Ls(args) => goaltrack::cli::goals::run_ls(args, &load_config()?),
        Commands::Add(args) => goaltrack::cli::goals::run_add(args, &load_config()?),
        Commands::Rm(args) => goaltrack::cli::goals::run_rm(args, &load_config()?),
        Commands::Ask(args) => goaltrack::cli::ask::run(args, &load_config()?).await,
        Commands::Models => goaltrack::cli::models::run(&load_config()?).await,
        Commands::Config(args) => goaltrack::cli::config::run(args),
    }
}
