//! `goaltrack models` command - list models usable for chat

use anyhow::Result;
use colored::Colorize;

use super::utils::model_client;
use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = model_client(config)?;
    let models = client.list_models().await?;

    if models.is_empty() {
        println!("No models support generateContent for this key.");
        return Ok(());
    }

    for model in &models {
        let name = model.name.trim_start_matches("models/");
        let marker = if name == client.model() {
            " ★".yellow().to_string()
        } else {
            String::new()
        };
        match &model.display_name {
            Some(display) => println!("{}{}  {}", name.cyan(), marker, display.dimmed()),
            None => println!("{}{}", name.cyan(), marker),
        }
    }

    println!("\n{} model(s)", models.len());
    Ok(())
}
