//! External model module
//!
//! The chat endpoint only needs "text in, text out". `GenerativeModel`
//! captures that contract; `GeminiClient` implements it over HTTP.

mod gemini;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use types::*;

/// A text-in, text-out generative model
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate a reply for a single prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
