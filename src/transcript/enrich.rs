//! Speaker enrichment
//!
//! Attaches a resolved display name to every transcript turn. Pure over
//! (turns, name map); order- and count-preserving.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::transcript::parse::RawTurn;

/// Fallback name for speakers present in neither identity pool
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Resolved speaker identity attached to a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
}

/// A raw turn plus its resolved speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedTurn {
    pub speaker_id: String,
    pub start_ts: f64,
    pub text: String,
    pub user: Speaker,
}

/// Distinct speaker ids across all turns, in first-seen order.
pub fn speaker_ids(turns: &[RawTurn]) -> Vec<String> {
    let mut seen = Vec::new();
    for turn in turns {
        if !seen.contains(&turn.speaker_id) {
            seen.push(turn.speaker_id.clone());
        }
    }
    seen
}

/// Attach display names to every turn, defaulting to [`UNKNOWN_SPEAKER`]
/// when the id resolves against neither identity pool.
pub fn enrich_turns(turns: Vec<RawTurn>, names: &HashMap<String, String>) -> Vec<EnrichedTurn> {
    turns
        .into_iter()
        .map(|turn| {
            let name = names
                .get(&turn.speaker_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());
            EnrichedTurn {
                speaker_id: turn.speaker_id,
                start_ts: turn.start_ts,
                text: turn.text,
                user: Speaker { name },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(speaker_id: &str, start_ts: f64, text: &str) -> RawTurn {
        RawTurn {
            speaker_id: speaker_id.to_string(),
            start_ts,
            text: text.to_string(),
        }
    }

    #[test]
    fn resolves_names_from_the_map() {
        let names = HashMap::from([
            ("u1".to_string(), "Alice".to_string()),
            ("a1".to_string(), "Bot".to_string()),
        ]);

        let enriched = enrich_turns(
            vec![turn("u1", 0.0, "hello"), turn("a1", 5.0, "hi there")],
            &names,
        );

        assert_eq!(enriched[0].user.name, "Alice");
        assert_eq!(enriched[1].user.name, "Bot");
    }

    #[test]
    fn unresolved_speaker_falls_back_to_unknown() {
        let names = HashMap::new();
        let enriched = enrich_turns(vec![turn("ghost", 3.0, "boo")], &names);
        assert_eq!(enriched[0].user.name, UNKNOWN_SPEAKER);
    }

    #[test]
    fn preserves_order_and_count() {
        let names = HashMap::from([("u1".to_string(), "Alice".to_string())]);
        let input = vec![
            turn("u1", 0.0, "first"),
            turn("x", 1.0, "second"),
            turn("u1", 2.0, "third"),
        ];

        let enriched = enrich_turns(input.clone(), &names);
        assert_eq!(enriched.len(), input.len());
        for (before, after) in input.iter().zip(&enriched) {
            assert_eq!(before.speaker_id, after.speaker_id);
            assert_eq!(before.start_ts, after.start_ts);
            assert_eq!(before.text, after.text);
        }
    }

    #[test]
    fn speaker_ids_dedupe_in_first_seen_order() {
        let turns = vec![
            turn("u1", 0.0, "a"),
            turn("a1", 1.0, "b"),
            turn("u1", 2.0, "c"),
        ];
        assert_eq!(speaker_ids(&turns), vec!["u1", "a1"]);
    }

    #[test]
    fn enriched_turn_serializes_with_nested_user() {
        let names = HashMap::from([("u1".to_string(), "Alice".to_string())]);
        let enriched = enrich_turns(vec![turn("u1", 0.0, "hello")], &names);

        let json = serde_json::to_value(&enriched[0]).unwrap();
        assert_eq!(json["user"]["name"], "Alice");
        assert_eq!(json["speaker_id"], "u1");
    }
}
