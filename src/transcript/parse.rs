//! JSONL transcript parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One utterance as delivered by the call provider's transcript export.
///
/// Unknown fields on a line are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTurn {
    /// Identifier of whoever spoke; matches either identity pool
    pub speaker_id: String,

    /// Offset from the start of the call, in seconds
    pub start_ts: f64,

    /// Spoken text
    pub text: String,
}

/// Parse a line-delimited JSON transcript into turns.
///
/// Blank lines are skipped. Any malformed line fails the whole parse;
/// there is no partial-success mode.
pub fn parse_transcript(raw: &str) -> Result<Vec<RawTurn>> {
    let mut turns = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let turn: RawTurn = serde_json::from_str(line)
            .with_context(|| format!("Malformed transcript line {}", index + 1))?;
        turns.push(turn);
    }

    Ok(turns)
}
