//! Transcript retrieval

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::config::Settings;

/// Source of raw transcript text, keyed by URL.
///
/// The trait seam keeps the pipeline testable without a live HTTP server.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Production source: plain HTTP GET of the transcript resource.
pub struct HttpTranscriptSource {
    http: Client,
}

impl HttpTranscriptSource {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(settings.fetch.timeout_secs))
                .build()
                .context("Failed to build transcript HTTP client")?,
        })
    }
}

#[async_trait]
impl TranscriptSource for HttpTranscriptSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Transcript request failed: {}", url))?;

        let response = response
            .error_for_status()
            .context("Transcript server returned an error status")?;

        let text = response
            .text()
            .await
            .context("Failed to read transcript body")?;

        Ok(text)
    }
}
