//! Inbound event payload

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Event name the orchestrator delivers this payload under.
pub const EVENT_NAME: &str = "meetings/processing";

/// Payload of a `meetings/processing` event.
///
/// Field names stay camelCase on the wire to match the emitting side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingEvent {
    pub meeting_id: String,
    pub transcript_url: String,
}

impl ProcessingEvent {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse processing event payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_payload() {
        let event =
            ProcessingEvent::from_json(r#"{"meetingId":"m1","transcriptUrl":"https://x/t.jsonl"}"#)
                .unwrap();
        assert_eq!(event.meeting_id, "m1");
        assert_eq!(event.transcript_url, "https://x/t.jsonl");
    }

    #[test]
    fn rejects_payload_missing_fields() {
        assert!(ProcessingEvent::from_json(r#"{"meetingId":"m1"}"#).is_err());
    }

    #[test]
    fn event_name_matches_the_emitting_side() {
        assert_eq!(EVENT_NAME, "meetings/processing");
    }
}
