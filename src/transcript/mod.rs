//! Transcript module for recap
//!
//! Fetching, parsing, and speaker enrichment of call transcripts.

mod enrich;
mod parse;
mod source;

pub use enrich::{enrich_turns, speaker_ids, EnrichedTurn, Speaker, UNKNOWN_SPEAKER};
pub use parse::{parse_transcript, RawTurn};
pub use source::{HttpTranscriptSource, TranscriptSource};
