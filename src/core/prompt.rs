//! Chat prompt building
//!
//! Turns a goal snapshot plus the user's question into the single text
//! prompt sent to the model:
//!
//! ```text
//! Here are the user's current saving goals:
//! - Trip: $50 of $200 (25.0%)
//!   Target date: 2025-01-01
//!
//!
//! User question: How am I doing?
//! ```

use serde_json::Value;
use thiserror::Error;

use super::goal::{Goal, FIELD_CURRENT, FIELD_DEADLINE, FIELD_NAME, FIELD_TARGET};

const PREAMBLE: &str = "Here are the user's current saving goals:\n";

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("goal {index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("goal {index} field '{field}' is not a number")]
    NotANumber { index: usize, field: &'static str },

    #[error("goal {index} has a targetAmount of zero; progress is undefined")]
    ZeroTarget { index: usize },
}

/// Context block describing the goals, empty when there are none
pub fn goals_context(goals: &[Goal]) -> Result<String, PromptError> {
    if goals.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::from(PREAMBLE);
    for (index, goal) in goals.iter().enumerate() {
        let name = field(goal, index, FIELD_NAME)?;
        let current = field(goal, index, FIELD_CURRENT)?;
        let target = field(goal, index, FIELD_TARGET)?;
        let deadline = field(goal, index, FIELD_DEADLINE)?;

        let current_n = amount(current, index, FIELD_CURRENT)?;
        let target_n = amount(target, index, FIELD_TARGET)?;
        if target_n == 0.0 {
            return Err(PromptError::ZeroTarget { index });
        }
        let progress = current_n / target_n * 100.0;

        out.push_str(&format!(
            "- {}: ${} of ${} ({:.1}%)\n",
            text(name),
            current,
            target,
            progress
        ));
        out.push_str(&format!("  Target date: {}\n", text(deadline)));
    }

    Ok(out)
}

/// Full prompt: goal context, a blank line, then the question
pub fn build_prompt(message: &str, goals: &[Goal]) -> Result<String, PromptError> {
    let context = goals_context(goals)?;
    Ok(format!("{}\n\nUser question: {}", context, message))
}

fn field<'a>(goal: &'a Goal, index: usize, field: &'static str) -> Result<&'a Value, PromptError> {
    goal.get(field)
        .ok_or(PromptError::MissingField { index, field })
}

fn amount(value: &Value, index: usize, field: &'static str) -> Result<f64, PromptError> {
    value
        .as_f64()
        .ok_or(PromptError::NotANumber { index, field })
}

/// Strings print bare, anything else as JSON
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
