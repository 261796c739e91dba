//! CLI utility functions
//!
//! Helpers shared across commands:
//! - Opening the goal store named by config
//! - Building the model client (fails when the API key is absent)

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;
use crate::core::store::GoalStore;
use crate::model::GeminiClient;

/// Open the goal store, preferring an explicit path over config
pub fn open_store(config: &Config, explicit: Option<PathBuf>) -> GoalStore {
    GoalStore::open(explicit.unwrap_or_else(|| config.store.path.clone()))
}

/// Build the model client from config and environment
pub fn model_client(config: &Config) -> Result<GeminiClient> {
    GeminiClient::from_config(&config.model)
}

/// Ask a yes/no question on stderr; anything but "y" is no
pub fn confirm(prompt: &str) -> Result<bool> {
    use std::io::{self, Write};

    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
