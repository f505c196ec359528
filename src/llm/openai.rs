use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::Summarizer;
use crate::llm::prompts::{build_summary_request, SUMMARIZER_SYSTEM_PROMPT};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!(
                "OpenAI API key is missing. Set llm.api_key in config or RECAP_OPENAI_API_KEY."
            );
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_OPENAI_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_OPENAI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .context("Failed to build OpenAI HTTP client")?,
            api_key,
            model,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl Summarizer for OpenAiClient {
    async fn summarize(&self, transcript_json: &str) -> Result<String> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SUMMARIZER_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_summary_request(transcript_json),
                },
            ],
        };

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("OpenAI request failed")?;

        let response = response
            .error_for_status()
            .context("OpenAI returned an error status")?;

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;

        let summary = payload
            .choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .find(|text| !text.is_empty())
            .context("OpenAI response did not contain summary text")?;

        Ok(summary)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
