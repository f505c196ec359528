//! recap - Meeting transcript summarization worker
//!
//! Entry point for the recap CLI.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap::cli::{Cli, Commands};
use recap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            recap::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Commands::Process {
                    meeting_id,
                    transcript_url,
                    event,
                } => {
                    recap::cli::commands::process_meeting(
                        &settings,
                        meeting_id,
                        transcript_url,
                        event,
                    )
                    .await?;
                }
                Commands::List {
                    limit,
                    status,
                    search,
                } => {
                    recap::cli::commands::list_meetings(&settings, limit, status, search)?;
                }
                Commands::Show { id } => {
                    recap::cli::commands::show_meeting(&settings, &id)?;
                }
                Commands::User(user_cmd) => {
                    recap::cli::commands::user_command(&settings, user_cmd)?;
                }
                Commands::Agent(agent_cmd) => {
                    recap::cli::commands::agent_command(&settings, agent_cmd)?;
                }
                Commands::Meeting(meeting_cmd) => {
                    recap::cli::commands::meeting_command(&settings, meeting_cmd)?;
                }
                Commands::Config(config_cmd) => {
                    recap::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
