//! LLM module for recap
//!
//! Generates structured meeting summaries through a provider trait.

mod client;
mod openai;
mod prompts;

pub use client::{build_summarizer, Summarizer};
pub use openai::OpenAiClient;
pub use prompts::{build_summary_request, SUMMARIZER_SYSTEM_PROMPT};
