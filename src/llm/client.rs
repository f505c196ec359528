//! Summarizer provider trait and construction

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::openai::OpenAiClient;

/// A generative-text backend that turns an enriched transcript (as JSON)
/// into a markdown summary. Single request/response, no streaming.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript_json: &str) -> Result<String>;
}

/// Build a summarizer from runtime settings.
pub fn build_summarizer(settings: &Settings) -> Result<Box<dyn Summarizer>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: openai",
            other
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn unsupported_provider_returns_error() {
        let mut settings = Settings::default();
        settings.llm.provider = "unknown".to_string();

        let err = match build_summarizer(&settings) {
            Ok(_) => panic!("expected summarizer creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("Unsupported llm.provider"));
    }

    #[test]
    fn openai_provider_requires_api_key() {
        let settings = Settings::default();

        let err = match build_summarizer(&settings) {
            Ok(_) => panic!("expected summarizer creation to fail"),
            Err(e) => e.to_string(),
        };
        assert!(err.contains("OpenAI API key is missing"));
    }
}
