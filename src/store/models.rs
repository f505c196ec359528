//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    /// Scheduled but not yet started
    Upcoming,
    /// Call in progress
    Active,
    /// Call ended, transcript handed off for summarization
    Processing,
    /// Summary generated and stored
    Completed,
    /// Cancelled before completion
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for MeetingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!(
                "Unknown meeting status '{}'. Expected one of: upcoming, active, processing, completed, cancelled",
                other
            )),
        }
    }
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled session between a user and an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    /// Unique identifier (UUID)
    pub id: String,

    /// User-provided meeting name
    pub name: String,

    /// Owning user
    pub user_id: String,

    /// Agent persona joining the call
    pub agent_id: String,

    /// Current lifecycle status
    pub status: MeetingStatus,

    /// When the call started
    pub started_at: Option<DateTime<Utc>>,

    /// When the call ended
    pub ended_at: Option<DateTime<Utc>>,

    /// Location of the JSONL transcript, set once the call ends
    pub transcript_url: Option<String>,

    /// Generated summary, set once by the summarization job
    pub summary: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    /// Create a new upcoming meeting
    pub fn new(name: String, user_id: String, agent_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            user_id,
            agent_id,
            status: MeetingStatus::Upcoming,
            started_at: None,
            ended_at: None,
            transcript_url: None,
            summary: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A human participant, one of the two speaker identity pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// An AI persona usable as a meeting participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier (UUID)
    pub id: String,

    /// Display name
    pub name: String,

    /// Natural-language behavior instructions
    pub instructions: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    pub fn new(name: String, instructions: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            instructions,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            MeetingStatus::Upcoming,
            MeetingStatus::Active,
            MeetingStatus::Processing,
            MeetingStatus::Completed,
            MeetingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<MeetingStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("archived".parse::<MeetingStatus>().is_err());
    }

    #[test]
    fn new_meeting_starts_upcoming_without_summary() {
        let meeting = Meeting::new("Standup".to_string(), "u1".to_string(), "a1".to_string());
        assert_eq!(meeting.status, MeetingStatus::Upcoming);
        assert!(meeting.summary.is_none());
        assert!(meeting.transcript_url.is_none());
    }
}
