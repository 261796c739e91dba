//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod ask;
pub mod config;
pub mod goals;
pub mod models;
pub mod serve;
pub mod utils;

/// goaltrack - savings goal tracker
///
/// Keeps savings goals in a JSON file, serves them over HTTP and answers
/// questions about them with a generative model.
#[derive(Parser, Debug)]
#[command(name = "goaltrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "GOALTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// List goals
    Ls(goals::LsArgs),

    /// Add a goal
    Add(goals::AddArgs),

    /// Delete a goal by index
    Rm(goals::RmArgs),

    /// Ask the assistant about your goals
    Ask(ask::AskArgs),

    /// List models available for chat
    Models,

    /// Get or set configuration
    Config(config::ConfigArgs),
}
