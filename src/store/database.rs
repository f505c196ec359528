//! SQLite database management

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::Path;

use crate::config::Settings;
use crate::store::models::{Agent, Meeting, MeetingStatus, User};

/// Database wrapper for recap
pub struct Database {
    conn: Connection,
}

const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Outcome of the conditional completion write.
///
/// The update only matches a meeting whose status is still `processing`;
/// the other variants report why zero rows matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompleteOutcome {
    /// Summary stored, status moved to `completed`
    Completed,
    /// No meeting row with that id exists
    NotFound,
    /// Another actor already moved the meeting out of `processing`
    WrongStatus(MeetingStatus),
}

impl Database {
    /// Open or create the database
    pub fn open(settings: &Settings) -> Result<Self> {
        let db_path = settings.database_path();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_path(&db_path)
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let current_version = self.schema_version()?;
        if current_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {} is newer than supported version {}",
                current_version,
                CURRENT_SCHEMA_VERSION
            );
        }

        if current_version < 1 {
            self.migrate_to_v1()?;
            self.set_schema_version(1)?;
        }

        Ok(())
    }

    /// Current schema version tracked in PRAGMA user_version.
    pub fn schema_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))?)
    }

    fn set_schema_version(&self, version: i64) -> Result<()> {
        self.conn
            .execute(&format!("PRAGMA user_version = {}", version), [])?;
        Ok(())
    }

    fn migrate_to_v1(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS agents (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                instructions TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meetings (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                user_id TEXT NOT NULL REFERENCES users(id),
                agent_id TEXT NOT NULL REFERENCES agents(id),
                status TEXT NOT NULL DEFAULT 'upcoming',
                started_at INTEGER,
                ended_at INTEGER,
                transcript_url TEXT,
                summary TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_meetings_created_at
                ON meetings(created_at DESC);
            CREATE INDEX IF NOT EXISTS idx_meetings_status
                ON meetings(status);
            "#,
        )?;

        // Idempotency ledger: one row per completed job step, keyed by
        // (meeting_id, step) so a retried run never repeats finished work.
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS job_steps (
                meeting_id TEXT NOT NULL,
                step TEXT NOT NULL,
                payload TEXT NOT NULL,
                completed_at INTEGER NOT NULL,
                PRIMARY KEY (meeting_id, step)
            );
            "#,
        )?;

        Ok(())
    }

    // --- Identity pools ---

    /// Insert a new user
    pub fn insert_user(&self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, name, created_at) VALUES (?1, ?2, ?3)",
            params![user.id, user.name, user.created_at.timestamp()],
        )?;
        Ok(())
    }

    /// Insert a new agent
    pub fn insert_agent(&self, agent: &Agent) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO agents (id, name, instructions, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                agent.id,
                agent.name,
                agent.instructions,
                agent.created_at.timestamp(),
                agent.updated_at.timestamp(),
            ],
        )?;
        Ok(())
    }

    /// List agents ordered by creation date
    pub fn list_agents(&self, limit: usize) -> Result<Vec<Agent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, instructions, created_at, updated_at
             FROM agents
             ORDER BY created_at DESC
             LIMIT ?1",
        )?;

        let agents = stmt
            .query_map(params![limit], |row| {
                let created: i64 = row.get(3)?;
                let updated: i64 = row.get(4)?;
                Ok(Agent {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    instructions: row.get(2)?,
                    created_at: timestamp(created),
                    updated_at: timestamp(updated),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(agents)
    }

    /// Resolve speaker ids to display names across both identity pools.
    ///
    /// Users take precedence over agents when an id appears in both.
    pub fn speaker_names(&self, ids: &[String]) -> Result<HashMap<String, String>> {
        let mut names = HashMap::new();
        if ids.is_empty() {
            return Ok(names);
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        for table in ["users", "agents"] {
            let sql = format!("SELECT id, name FROM {} WHERE id IN ({})", table, placeholders);
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;

            for row in rows {
                let (id, name) = row?;
                names.entry(id).or_insert(name);
            }
        }

        Ok(names)
    }

    // --- Meetings ---

    /// Insert a new meeting
    pub fn insert_meeting(&self, meeting: &Meeting) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO meetings (id, name, user_id, agent_id, status, started_at, ended_at,
                                  transcript_url, summary, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                meeting.id,
                meeting.name,
                meeting.user_id,
                meeting.agent_id,
                meeting.status.as_str(),
                meeting.started_at.map(|t| t.timestamp()),
                meeting.ended_at.map(|t| t.timestamp()),
                meeting.transcript_url,
                meeting.summary,
                meeting.created_at.timestamp(),
                meeting.updated_at.timestamp(),
            ],
        )?;
        Ok(())
    }

    /// Get a meeting by ID
    pub fn get_meeting(&self, id: &str) -> Result<Option<Meeting>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {} FROM meetings WHERE id = ?1", MEETING_COLUMNS),
                params![id],
                row_to_meeting,
            )
            .optional()?;

        Ok(result)
    }

    /// Find a meeting by ID prefix
    pub fn find_meeting_by_prefix(&self, prefix: &str) -> Result<Option<Meeting>> {
        let pattern = format!("{}%", prefix);

        let result = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM meetings WHERE id LIKE ?1 LIMIT 1",
                    MEETING_COLUMNS
                ),
                params![pattern],
                row_to_meeting,
            )
            .optional()?;

        Ok(result)
    }

    /// List meetings, newest first, with optional status and name filters
    pub fn list_meetings(
        &self,
        limit: usize,
        status: Option<MeetingStatus>,
        search: Option<&str>,
    ) -> Result<Vec<Meeting>> {
        let pattern = match search {
            Some(term) => format!("%{}%", term),
            None => "%".to_string(),
        };
        let status_filter = status.map(|s| s.as_str()).unwrap_or("");

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM meetings
             WHERE name LIKE ?1 AND (?2 = '' OR status = ?2)
             ORDER BY created_at DESC
             LIMIT ?3",
            MEETING_COLUMNS
        ))?;

        let meetings = stmt
            .query_map(params![pattern, status_filter, limit], row_to_meeting)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(meetings)
    }

    /// Record the transcript location and hand the meeting to the
    /// summarization job. Only an upcoming or active meeting can move to
    /// `processing`; returns false when nothing matched.
    pub fn mark_processing(&self, id: &str, transcript_url: &str) -> Result<bool> {
        let now = Utc::now().timestamp();
        let changed = self.conn.execute(
            r#"
            UPDATE meetings
            SET status = 'processing', transcript_url = ?2, ended_at = ?3, updated_at = ?3
            WHERE id = ?1 AND status IN ('upcoming', 'active')
            "#,
            params![id, transcript_url, now],
        )?;
        Ok(changed > 0)
    }

    /// Store the generated summary and move the meeting to `completed`.
    ///
    /// The write is conditional on the status still being `processing`;
    /// a concurrent transition or a deleted row is reported, not overwritten.
    pub fn complete_meeting(&self, id: &str, summary: &str) -> Result<CompleteOutcome> {
        let changed = self.conn.execute(
            r#"
            UPDATE meetings
            SET summary = ?2, status = 'completed', updated_at = ?3
            WHERE id = ?1 AND status = 'processing'
            "#,
            params![id, summary, Utc::now().timestamp()],
        )?;

        if changed > 0 {
            return Ok(CompleteOutcome::Completed);
        }

        match self.get_meeting(id)? {
            None => Ok(CompleteOutcome::NotFound),
            Some(meeting) => Ok(CompleteOutcome::WrongStatus(meeting.status)),
        }
    }

    /// Cancel a meeting; allowed from any pre-completed state
    pub fn cancel_meeting(&self, id: &str) -> Result<bool> {
        let changed = self.conn.execute(
            r#"
            UPDATE meetings
            SET status = 'cancelled', updated_at = ?2
            WHERE id = ?1 AND status NOT IN ('completed', 'cancelled')
            "#,
            params![id, Utc::now().timestamp()],
        )?;
        Ok(changed > 0)
    }

    // --- Job step ledger ---

    /// Record a completed job step and its serialized result
    pub fn record_step(&self, meeting_id: &str, step: &str, payload: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO job_steps (meeting_id, step, payload, completed_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![meeting_id, step, payload, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Get a previously recorded step result
    pub fn get_step(&self, meeting_id: &str, step: &str) -> Result<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM job_steps WHERE meeting_id = ?1 AND step = ?2",
                params![meeting_id, step],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    /// Remove all recorded steps for a meeting (operator reset)
    pub fn clear_steps(&self, meeting_id: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM job_steps WHERE meeting_id = ?1",
            params![meeting_id],
        )?;
        Ok(())
    }
}

const MEETING_COLUMNS: &str = "id, name, user_id, agent_id, status, started_at, ended_at, \
                               transcript_url, summary, created_at, updated_at";

fn row_to_meeting(row: &rusqlite::Row) -> rusqlite::Result<Meeting> {
    let status_str: String = row.get(4)?;
    let started: Option<i64> = row.get(5)?;
    let ended: Option<i64> = row.get(6)?;
    let created: i64 = row.get(9)?;
    let updated: i64 = row.get(10)?;

    Ok(Meeting {
        id: row.get(0)?,
        name: row.get(1)?,
        user_id: row.get(2)?,
        agent_id: row.get(3)?,
        status: status_str.parse().unwrap_or(MeetingStatus::Upcoming),
        started_at: started.map(timestamp),
        ended_at: ended.map(timestamp),
        transcript_url: row.get(7)?,
        summary: row.get(8)?,
        created_at: timestamp(created),
        updated_at: timestamp(updated),
    })
}

fn timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}
