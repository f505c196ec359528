//! CLI command implementations

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::args::{AgentCommand, ConfigCommand, MeetingCommand, UserCommand};
use crate::config::Settings;
use crate::job::{MeetingProcessor, ProcessingEvent};
use crate::llm::build_summarizer;
use crate::store::{Agent, Database, Meeting, MeetingStatus, User};
use crate::transcript::HttpTranscriptSource;

/// Run the summarization job for one event
pub async fn process_meeting(
    settings: &Settings,
    meeting_id: Option<String>,
    transcript_url: Option<String>,
    event_file: Option<PathBuf>,
) -> Result<()> {
    let event = match event_file {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read event file: {}", path.display()))?;
            ProcessingEvent::from_json(&raw)?
        }
        None => {
            let meeting_id =
                meeting_id.context("Missing --meeting-id (or pass --event <file>)")?;
            let transcript_url =
                transcript_url.context("Missing --transcript-url (or pass --event <file>)")?;
            ProcessingEvent {
                meeting_id,
                transcript_url,
            }
        }
    };

    let db = Database::open(settings)?;
    let source = HttpTranscriptSource::from_settings(settings)?;
    let summarizer = build_summarizer(settings)?;

    let processor = MeetingProcessor::new(&db, &source, summarizer.as_ref());
    let summary = processor.run(&event).await?;

    println!("Summary saved for meeting {}:", event.meeting_id);
    println!();
    println!("{}", summary);

    Ok(())
}

/// List meetings
pub fn list_meetings(
    settings: &Settings,
    limit: usize,
    status: Option<MeetingStatus>,
    search: Option<String>,
) -> Result<()> {
    let db = Database::open(settings)?;
    let meetings = db.list_meetings(limit, status, search.as_deref())?;

    if meetings.is_empty() {
        println!("No meetings found");
        return Ok(());
    }

    println!(
        "{:<10} {:<30} {:<12} {:<12}",
        "ID", "Name", "Status", "Date"
    );
    println!("{}", "-".repeat(68));

    for meeting in meetings {
        let date = meeting.created_at.format("%Y-%m-%d");
        println!(
            "{:<10} {:<30} {:<12} {:<12}",
            &meeting.id[..8.min(meeting.id.len())],
            truncate(&meeting.name, 28),
            meeting.status.as_str(),
            date
        );
    }

    Ok(())
}

/// Show a meeting's details and summary
pub fn show_meeting(settings: &Settings, id: &str) -> Result<()> {
    let db = Database::open(settings)?;

    let meeting = db
        .find_meeting_by_prefix(id)?
        .context("Meeting not found")?;

    println!("Name: {}", meeting.name);
    println!("Status: {}", meeting.status);
    println!("Created: {}", meeting.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(ended) = meeting.ended_at {
        println!("Ended: {}", ended.format("%Y-%m-%d %H:%M"));
    }
    if let Some(url) = meeting.transcript_url.as_deref() {
        println!("Transcript: {}", url);
    }

    if let Some(summary) = meeting.summary.as_deref() {
        println!();
        println!("Summary:");
        println!("{}", summary);
    } else {
        println!();
        println!("No summary yet");
    }

    Ok(())
}

/// User pool management
pub fn user_command(settings: &Settings, cmd: UserCommand) -> Result<()> {
    let db = Database::open(settings)?;

    match cmd {
        UserCommand::Add { name } => {
            let user = User::new(name);
            db.insert_user(&user)?;
            println!("User added: {} ({})", user.name, user.id);
        }
    }

    Ok(())
}

/// Agent persona management
pub fn agent_command(settings: &Settings, cmd: AgentCommand) -> Result<()> {
    let db = Database::open(settings)?;

    match cmd {
        AgentCommand::Add { name, instructions } => {
            let agent = Agent::new(name, instructions);
            db.insert_agent(&agent)?;
            println!("Agent added: {} ({})", agent.name, agent.id);
        }
        AgentCommand::List { limit } => {
            let agents = db.list_agents(limit)?;

            if agents.is_empty() {
                println!("No agents found");
                return Ok(());
            }

            println!("{:<10} {:<20} {}", "ID", "Name", "Instructions");
            println!("{}", "-".repeat(70));
            for agent in agents {
                println!(
                    "{:<10} {:<20} {}",
                    &agent.id[..8.min(agent.id.len())],
                    truncate(&agent.name, 18),
                    truncate(&agent.instructions, 38)
                );
            }
        }
    }

    Ok(())
}

/// Meeting lifecycle management
pub fn meeting_command(settings: &Settings, cmd: MeetingCommand) -> Result<()> {
    let db = Database::open(settings)?;

    match cmd {
        MeetingCommand::Add { name, user, agent } => {
            let meeting = Meeting::new(name, user, agent);
            db.insert_meeting(&meeting)?;
            println!("Meeting created: {} ({})", meeting.name, meeting.id);
        }
        MeetingCommand::Ready { id, transcript_url } => {
            let meeting = db
                .find_meeting_by_prefix(&id)?
                .context("Meeting not found")?;

            if !db.mark_processing(&meeting.id, &transcript_url)? {
                anyhow::bail!(
                    "Meeting {} is '{}' and cannot move to processing",
                    &meeting.id[..8.min(meeting.id.len())],
                    meeting.status
                );
            }
            println!("Meeting {} queued for processing", &meeting.id[..8]);
        }
        MeetingCommand::Cancel { id } => {
            let meeting = db
                .find_meeting_by_prefix(&id)?
                .context("Meeting not found")?;

            if !db.cancel_meeting(&meeting.id)? {
                anyhow::bail!(
                    "Meeting {} is '{}' and cannot be cancelled",
                    &meeting.id[..8.min(meeting.id.len())],
                    meeting.status
                );
            }
            println!("Meeting {} cancelled", &meeting.id[..8]);
        }
    }

    Ok(())
}

/// Configuration management
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
