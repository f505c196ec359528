//! Typed wrapper over the job-step ledger table

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::Database;

/// Idempotency ledger keyed by `(meeting_id, step)`.
///
/// Completed steps store their serialized result; a retried run replays
/// the stored payload instead of re-executing the step.
pub struct StepLedger<'a> {
    db: &'a Database,
}

impl<'a> StepLedger<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Fetch a previously recorded step result, if any.
    pub fn get<T: DeserializeOwned>(&self, meeting_id: &str, step: &str) -> Result<Option<T>> {
        match self.db.get_step(meeting_id, step)? {
            Some(payload) => {
                let value = serde_json::from_str(&payload).with_context(|| {
                    format!("Corrupt ledger payload for step '{}' of {}", step, meeting_id)
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Record a completed step's result.
    pub fn record<T: Serialize>(&self, meeting_id: &str, step: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize result of step '{}'", step))?;
        self.db.record_step(meeting_id, step, &payload)
    }
}
