//! `goaltrack ls`, `goaltrack add` and `goaltrack rm` commands
//!
//! Work on the goal file directly, without a running server.
//!
//! # Usage
//! ```bash
//! goaltrack ls
//! goaltrack ls --json
//! goaltrack add "Trip" 200 --current 50 --deadline 2025-01-01
//! goaltrack rm 0
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::{confirm, open_store};
use crate::config::Config;
use crate::core::goal::{Goal, FIELD_DEADLINE};

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Print the raw goal list as JSON
    #[arg(long)]
    pub json: bool,

    /// Goal file (overrides config)
    #[arg(long, env = "GOALTRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

pub fn run_ls(args: LsArgs, config: &Config) -> Result<()> {
    let store = open_store(config, args.data_file);
    let goals = store.load()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
        return Ok(());
    }

    if goals.is_empty() {
        println!("No goals yet.");
        println!("\nAdd one with: goaltrack add <name> <target>");
        return Ok(());
    }

    println!("{}", "Savings Goals".bold());
    println!("{}", "═".repeat(60));

    for (index, goal) in goals.iter().enumerate() {
        print_goal(index, goal);
    }

    println!("\n{} goal(s)", goals.len());
    Ok(())
}

fn print_goal(index: usize, goal: &Goal) {
    let name = goal.name().unwrap_or("(unnamed)");
    let amounts = match (goal.current_amount(), goal.target_amount()) {
        (Some(current), Some(target)) => format!("${} of ${}", current, target),
        _ => "amounts missing".dimmed().to_string(),
    };
    let progress = match goal.progress() {
        Some(p) if p >= 100.0 => format!("{:.1}%", p).green().bold().to_string(),
        Some(p) => format!("{:.1}%", p),
        None => "?".dimmed().to_string(),
    };

    println!("[{}] {}  {}  ({})", index, name.cyan().bold(), amounts, progress);
    if let Some(deadline) = goal.get(FIELD_DEADLINE).and_then(|d| d.as_str()) {
        if !deadline.is_empty() {
            println!("    Target date: {}", deadline);
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Goal name
    pub name: String,

    /// Target amount
    pub target: f64,

    /// Amount saved so far
    #[arg(long, default_value = "0")]
    pub current: f64,

    /// Target date (free text, e.g. 2025-01-01)
    #[arg(short, long, default_value = "")]
    pub deadline: String,

    /// Goal file (overrides config)
    #[arg(long, env = "GOALTRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

pub fn run_add(args: AddArgs, config: &Config) -> Result<()> {
    if !args.target.is_finite() || !args.current.is_finite() {
        anyhow::bail!("Amounts must be finite numbers");
    }
    if args.target < 0.0 || args.current < 0.0 {
        anyhow::bail!("Amounts must not be negative");
    }

    let store = open_store(config, args.data_file);
    let goal = Goal::new(&args.name, args.target, args.current, &args.deadline);
    let index = store.append(goal)?;

    println!("{} Added goal [{}] {}", "✓".green(), index, args.name.cyan());
    Ok(())
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Index of the goal to delete
    pub index: usize,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Goal file (overrides config)
    #[arg(long, env = "GOALTRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

pub fn run_rm(args: RmArgs, config: &Config) -> Result<()> {
    let store = open_store(config, args.data_file);

    if !args.yes {
        let goals = store.load()?;
        let name = goals
            .get(args.index)
            .map(|g| g.name().unwrap_or("(unnamed)").to_string())
            .ok_or_else(|| anyhow::anyhow!("Goal not found: {}", args.index))?;

        if !confirm(&format!("Delete goal [{}] '{}'?", args.index, name.red()))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = store.remove(args.index)?;
    println!(
        "{} Deleted goal [{}] {}",
        "✓".green(),
        args.index,
        removed.name().unwrap_or("(unnamed)")
    );
    Ok(())
}
