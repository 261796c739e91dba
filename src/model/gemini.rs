//! Generative Language API client
//!
//! Async client for Gemini `generateContent`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::types::*;
use super::GenerativeModel;
use crate::config::ModelConfig;

/// HTTP client for one Gemini model
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: Url,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl GeminiClient {
    /// Create client from model config, reading the key from the environment
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "{} not found in environment variables",
                    config.api_key_env
                )
            })?;

        Self::new(&config.base_url, &config.name, api_key, config.timeout_secs)
    }

    /// Create client with explicit parameters.
    ///
    /// `timeout_secs == 0` waits indefinitely for the model.
    pub fn new(base_url: &str, model: &str, api_key: String, timeout_secs: u64) -> Result<Self> {
        if api_key.is_empty() {
            anyhow::bail!("Gemini API key is empty");
        }
        if model.is_empty() {
            anyhow::bail!("Model name is empty");
        }

        // A trailing slash keeps `join` from dropping the last path segment
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url =
            Url::parse(&base).with_context(|| format!("Invalid model API URL: {}", base_url))?;

        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        debug!(model, base_url = %base_url, "Created Gemini client");

        Ok(Self {
            client,
            base_url,
            model: model.trim_start_matches("models/").to_string(),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build a URL for an endpoint
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }

    // ============== Content ==============

    /// Send one prompt and return the generated text
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = self.url(&format!("models/{}:generateContent", self.model))?;

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::text(prompt))
            .send()
            .await
            .context("Failed to reach model API")?;

        let body: GenerateContentResponse = self.handle_response(resp).await?;

        match body.text() {
            Some(text) => Ok(text),
            None => {
                let reason = body
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .unwrap_or_else(|| "no candidates returned".to_string());
                anyhow::bail!("Model returned no text: {}", reason)
            }
        }
    }

    // ============== Models ==============

    /// List models that support `generateContent`
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.url("models")?;
            if let Some(token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", token);
            }

            let resp = self
                .client
                .get(url)
                .header("x-goog-api-key", &self.api_key)
                .send()
                .await
                .context("Failed to list models")?;

            let page: ModelListResponse = self.handle_response(resp).await?;
            models.extend(
                page.models
                    .into_iter()
                    .filter(ModelInfo::supports_generate_content),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(models)
    }

    // ============== Helpers ==============

    /// Handle response and deserialize
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T> {
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            anyhow::bail!("Model '{}' not found", self.model);
        }

        if !status.is_success() {
            let err = self.extract_error(resp).await;
            anyhow::bail!("Model API error ({}): {}", status, err);
        }

        resp.json().await.context("Failed to parse model response")
    }

    /// Extract error message from response
    async fn extract_error(&self, resp: reqwest::Response) -> String {
        match resp.json::<ApiErrorResponse>().await {
            Ok(err) if !err.error.message.is_empty() => err.error.message,
            _ => "Unknown error".to_string(),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}
