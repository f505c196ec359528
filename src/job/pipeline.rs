//! Processing pipeline orchestration

use anyhow::Result;

use crate::job::event::ProcessingEvent;
use crate::job::ledger::StepLedger;
use crate::job::JobError;
use crate::llm::Summarizer;
use crate::store::{CompleteOutcome, Database};
use crate::transcript::{
    enrich_turns, parse_transcript, speaker_ids, EnrichedTurn, RawTurn, TranscriptSource,
};

/// Ledger names for the pipeline steps, in execution order.
pub const STEP_FETCH: &str = "fetch-transcript";
pub const STEP_PARSE: &str = "parse-transcript";
pub const STEP_ENRICH: &str = "add-speakers";
pub const STEP_SUMMARIZE: &str = "summarize";
pub const STEP_SAVE: &str = "save-summary";

/// Runs the `meetings/processing` job for one event.
pub struct MeetingProcessor<'a> {
    db: &'a Database,
    source: &'a dyn TranscriptSource,
    summarizer: &'a dyn Summarizer,
}

impl<'a> MeetingProcessor<'a> {
    pub fn new(
        db: &'a Database,
        source: &'a dyn TranscriptSource,
        summarizer: &'a dyn Summarizer,
    ) -> Self {
        Self {
            db,
            source,
            summarizer,
        }
    }

    /// Execute the five pipeline steps and return the stored summary.
    ///
    /// Each step consults the ledger first, so re-delivering an event only
    /// runs the steps that have not completed yet.
    pub async fn run(&self, event: &ProcessingEvent) -> Result<String> {
        let meeting_id = event.meeting_id.as_str();
        let ledger = StepLedger::new(self.db);

        tracing::info!(
            meeting_id,
            transcript_url = %event.transcript_url,
            "Processing event received"
        );

        // Step 1: fetch the raw transcript
        let raw: String = match ledger.get(meeting_id, STEP_FETCH)? {
            Some(cached) => {
                tracing::debug!(meeting_id, step = STEP_FETCH, "Replaying cached step");
                cached
            }
            None => {
                let text = self.source.fetch(&event.transcript_url).await?;
                tracing::info!(meeting_id, bytes = text.len(), "Transcript fetched");
                ledger.record(meeting_id, STEP_FETCH, &text)?;
                text
            }
        };

        // Step 2: parse JSONL into turns
        let turns: Vec<RawTurn> = match ledger.get(meeting_id, STEP_PARSE)? {
            Some(cached) => {
                tracing::debug!(meeting_id, step = STEP_PARSE, "Replaying cached step");
                cached
            }
            None => {
                let turns = parse_transcript(&raw)?;
                tracing::info!(meeting_id, turns = turns.len(), "Transcript parsed");
                ledger.record(meeting_id, STEP_PARSE, &turns)?;
                turns
            }
        };

        // Step 3: resolve speaker identities
        let enriched: Vec<EnrichedTurn> = match ledger.get(meeting_id, STEP_ENRICH)? {
            Some(cached) => {
                tracing::debug!(meeting_id, step = STEP_ENRICH, "Replaying cached step");
                cached
            }
            None => {
                let ids = speaker_ids(&turns);
                tracing::debug!(meeting_id, speakers = ids.len(), "Resolving speaker ids");
                let names = self.db.speaker_names(&ids)?;
                let enriched = enrich_turns(turns, &names);
                ledger.record(meeting_id, STEP_ENRICH, &enriched)?;
                enriched
            }
        };

        // Step 4: generate the summary
        let summary: String = match ledger.get(meeting_id, STEP_SUMMARIZE)? {
            Some(cached) => {
                tracing::debug!(meeting_id, step = STEP_SUMMARIZE, "Replaying cached step");
                cached
            }
            None => {
                let payload = serde_json::to_string(&enriched)?;
                let text = self.summarizer.summarize(&payload).await?;
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(JobError::UnexpectedResponseShape.into());
                }
                tracing::info!(meeting_id, chars = text.len(), "Summary generated");
                ledger.record(meeting_id, STEP_SUMMARIZE, &text)?;
                text
            }
        };

        // Step 5: persist summary and completion status
        if ledger.get::<bool>(meeting_id, STEP_SAVE)?.is_none() {
            match self.db.complete_meeting(meeting_id, &summary)? {
                CompleteOutcome::Completed => {
                    ledger.record(meeting_id, STEP_SAVE, &true)?;
                    tracing::info!(meeting_id, "Summary saved, meeting completed");
                }
                CompleteOutcome::NotFound => {
                    return Err(JobError::MeetingDeleted(meeting_id.to_string()).into());
                }
                CompleteOutcome::WrongStatus(actual) => {
                    return Err(JobError::StatusConflict {
                        meeting_id: meeting_id.to_string(),
                        actual,
                    }
                    .into());
                }
            }
        } else {
            tracing::debug!(meeting_id, step = STEP_SAVE, "Summary already saved");
        }

        Ok(summary)
    }
}
