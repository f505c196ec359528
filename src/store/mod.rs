//! Storage module for recap
//!
//! Holds the worker's view of the application data: identity pools
//! (users, agents), meeting records, and the job-step idempotency ledger.

mod database;
mod models;

pub use database::{CompleteOutcome, Database};
pub use models::{Agent, Meeting, MeetingStatus, User};
