//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::store::MeetingStatus;

/// recap - Meeting transcript summarization worker
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the summarization job for one meetings/processing event
    Process {
        /// Meeting identifier
        #[arg(long)]
        meeting_id: Option<String>,

        /// URL of the JSONL transcript
        #[arg(long)]
        transcript_url: Option<String>,

        /// JSON file with the event payload ({"meetingId":..., "transcriptUrl":...})
        #[arg(long, conflicts_with_all = ["meeting_id", "transcript_url"])]
        event: Option<PathBuf>,
    },

    /// List meetings
    List {
        /// Maximum number of meetings to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Only show meetings with this status
        #[arg(short, long)]
        status: Option<MeetingStatus>,

        /// Search term to filter meeting names
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a meeting's details and summary
    Show {
        /// Meeting ID or partial ID
        id: String,
    },

    /// Manage users (speaker identity pool)
    #[command(subcommand)]
    User(UserCommand),

    /// Manage agent personas
    #[command(subcommand)]
    Agent(AgentCommand),

    /// Manage meetings
    #[command(subcommand)]
    Meeting(MeetingCommand),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Add a user
    Add {
        /// Display name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Add an agent persona
    Add {
        /// Display name
        name: String,

        /// Natural-language behavior instructions
        #[arg(short, long)]
        instructions: String,
    },

    /// List agent personas
    List {
        /// Maximum number of agents to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum MeetingCommand {
    /// Create a meeting
    Add {
        /// Meeting name
        name: String,

        /// Owning user id
        #[arg(long)]
        user: String,

        /// Agent persona id
        #[arg(long)]
        agent: String,
    },

    /// Record the transcript location and queue the meeting for processing
    Ready {
        /// Meeting ID or partial ID
        id: String,

        /// URL of the JSONL transcript
        transcript_url: String,
    },

    /// Cancel a meeting
    Cancel {
        /// Meeting ID or partial ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
