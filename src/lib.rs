//! recap - A CLI worker that turns meeting transcripts into AI-generated summaries
//!
//! The core of the crate is the `meetings/processing` job: fetch a JSONL
//! transcript, resolve speaker identities, ask an LLM for a structured
//! summary, and persist it on the meeting record.

pub mod cli;
pub mod config;
pub mod job;
pub mod llm;
pub mod store;
pub mod transcript;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "recap";
