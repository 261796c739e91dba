//! `goaltrack serve` command
//!
//! Start the HTTP API.
//!
//! # Usage
//! ```bash
//! goaltrack serve                         # 127.0.0.1:5000, ./goals.json
//! goaltrack serve --port 8080 --data-file ~/goals.json
//! goaltrack serve --list-models           # log available models first
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use super::utils::{model_client, open_store};
use crate::config::Config;
use crate::server::{run_server, AppState};

/// Start the goal tracker API server
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Goal file (overrides config)
    #[arg(long, env = "GOALTRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Log models supporting generateContent before serving
    #[arg(long)]
    pub list_models: bool,
}

pub async fn run(args: ServeArgs, config: &Config) -> Result<()> {
    // Missing credentials are fatal before anything is bound
    let client = model_client(config)?;
    info!(model = client.model(), "Model client configured");

    if args.list_models {
        for model in client.list_models().await? {
            debug!(model = %model.name, "Available model");
        }
    }

    let store = open_store(config, args.data_file);
    info!(path = %store.path().display(), "Using goal file");

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let state = AppState::new(store, Arc::new(client));
    run_server(&host, port, state).await
}
