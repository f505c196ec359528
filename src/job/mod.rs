//! The `meetings/processing` job
//!
//! Five sequential steps: fetch the transcript, parse it, resolve speaker
//! identities, summarize through the LLM, and persist the result. Each
//! step is memoized in the job-step ledger so a retried run never repeats
//! finished work.

mod event;
mod ledger;
mod pipeline;

pub use event::{ProcessingEvent, EVENT_NAME};
pub use ledger::StepLedger;
pub use pipeline::MeetingProcessor;

use thiserror::Error;

use crate::store::MeetingStatus;

/// Typed failures of a processing run.
///
/// Transient I/O errors stay untyped (`anyhow` with context) and are left
/// to the caller's retry policy; these variants are the terminal outcomes
/// a retry will not fix.
#[derive(Error, Debug)]
pub enum JobError {
    /// The model returned no usable text content
    #[error("Model response contained no usable summary text")]
    UnexpectedResponseShape,

    /// The meeting row disappeared before the summary could be stored
    #[error("Meeting {0} no longer exists")]
    MeetingDeleted(String),

    /// Another actor moved the meeting out of `processing` mid-run
    #[error("Meeting {meeting_id} is '{actual}', expected 'processing'")]
    StatusConflict {
        meeting_id: String,
        actual: MeetingStatus,
    },
}
