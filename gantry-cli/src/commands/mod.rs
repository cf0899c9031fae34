//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod build;
mod job;

pub use build::BuildCommands;
pub use job::JobCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use gantry_core::domain::build::BuildStatus;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Job inspection
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Build inspection
    Build {
        #[command(subcommand)]
        command: BuildCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Job { command } => job::handle_job_command(command, config).await,
        Commands::Build { command } => build::handle_build_command(command, config).await,
    }
}

/// Colorize build status for display
pub(crate) fn colorize_status(status: BuildStatus) -> colored::ColoredString {
    let status_str = status.as_str();
    match status {
        BuildStatus::Queued => status_str.yellow(),
        BuildStatus::Running => status_str.cyan(),
        BuildStatus::Success => status_str.green(),
        BuildStatus::Failure => status_str.red(),
        BuildStatus::Aborted => status_str.dimmed(),
    }
}
