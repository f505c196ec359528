//! Summarization prompts
//!
//! The system prompt pins the exact two-section markdown contract the
//! rest of the product renders, so it must not drift.

/// Fixed system instruction for the summarizer.
pub const SUMMARIZER_SYSTEM_PROMPT: &str = r#"You are an expert summarizer. You write readable, concise, simple content. You are given a transcript of a meeting and you need to summarize it.

Use the following markdown structure for every output:

### Overview
Provide a detailed, engaging summary of the session's content. Focus on major features, user workflows, and any key takeaways. Write in a narrative style, using full sentences. Highlight unique or powerful aspects of the product, platform, or discussion.

### Notes
Break down key content into thematic sections with timestamp ranges. Each section should summarize key points, actions, or demos in bullet format.

Example:
#### Section Name
- Main point or demo shown here
- Another key insight or interaction
- Follow-up tool or explanation provided

#### Next Section
- Feature X automatically does Y
- Mention of integration with Z"#;

/// Build the user message carrying the JSON-serialized enriched transcript.
pub fn build_summary_request(transcript_json: &str) -> String {
    format!(
        "Summarize the following meeting transcript: {}",
        transcript_json
    )
}
