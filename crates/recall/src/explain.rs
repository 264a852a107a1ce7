//! HTTP client for the explanation service
//!
//! The service takes a prompt and answers with an explanation plus a few
//! optional extras. Only the explanation is ever stored.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::error::{RecallError, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
  pub explanation: String,
  #[serde(default)]
  pub analogy: Option<String>,
  #[serde(default)]
  pub code_snippet: Option<String>,
  #[serde(default)]
  pub difficulty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
  pub status: String,
  #[serde(default)]
  pub api_key_configured: bool,
}

pub struct ExplanationClient {
  client: Client,
  base_url: String,
}

impl ExplanationClient {
  pub fn new(config: &ServiceConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| RecallError::service_unavailable(format!("failed to create HTTP client: {e}")))?;

    Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Ask the service to explain `prompt`
  pub async fn explain(&self, prompt: &str) -> Result<Explanation> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
      return Err(RecallError::validation("prompt"));
    }

    let url = format!("{}/api/chat", self.base_url);
    tracing::debug!(%url, "requesting explanation");

    let response = self.client.post(&url).json(&ChatRequest { message: prompt }).send().await?;

    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(RecallError::service_unavailable(format!("POST {url} returned {status}: {body}")));
    }

    let explanation: Explanation = response.json().await?;
    if explanation.explanation.trim().is_empty() {
      return Err(RecallError::invalid_service_response("explanation was empty"));
    }

    Ok(explanation)
  }

  pub async fn health(&self) -> Result<ServiceHealth> {
    let url = format!("{}/api/health", self.base_url);
    let response = self.client.get(&url).send().await?;

    if !response.status().is_success() {
      return Err(RecallError::service_unavailable(format!(
        "GET {url} returned {}",
        response.status()
      )));
    }

    Ok(response.json().await?)
  }
}
