//! `goaltrack ask` command
//!
//! Ask the model a question about the stored goals from the terminal.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use super::utils::{model_client, open_store};
use crate::config::Config;
use crate::core::prompt::build_prompt;
use crate::model::GenerativeModel;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question for the assistant
    #[arg(required = true, trailing_var_arg = true)]
    pub question: Vec<String>,

    /// Goal file (overrides config)
    #[arg(long, env = "GOALTRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

pub async fn run(args: AskArgs, config: &Config) -> Result<()> {
    let client = model_client(config)?;
    let goals = open_store(config, args.data_file).load()?;

    let prompt = build_prompt(&args.question.join(" "), &goals)?;
    debug!(prompt = %prompt, "Sending prompt to model");

    let answer = client.generate(&prompt).await?;
    println!("{}", answer.trim_end());
    Ok(())
}
