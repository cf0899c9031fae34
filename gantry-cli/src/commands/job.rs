//! Job command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use gantry_client::GantryClient;
use gantry_core::domain::job::Job;

use crate::config::Config;

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Get job details
    Get {
        /// Job ID
        id: String,
    },
}

/// Handle job commands
pub async fn handle_job_command(command: JobCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        JobCommands::Get { id } => get_job(&client, &id).await,
    }
}

/// Get and display a single job
async fn get_job(client: &GantryClient, id: &str) -> Result<()> {
    let job = client.get_job(id).await?;

    print_job_details(&job);

    Ok(())
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:           {}", job.id.cyan());
    println!("  Name:         {}", job.name);
    println!("  Pipeline ID:  {}", job.pipeline_id.dimmed());
    println!(
        "  Pull request: {}",
        if job.is_pull_request() { "yes" } else { "no" }
    );
    println!(
        "  Created:      {}",
        job.create_time.format("%Y-%m-%d %H:%M:%S")
    );
}
