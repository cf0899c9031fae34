//! Build command handlers
//!
//! Handles listing a job's builds with sorting and paging, and viewing
//! a single build.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use gantry_client::GantryClient;
use gantry_core::domain::listing::{SortDirection, SortField};
use gantry_core::dto::build::{BuildView, ListBuildsQuery};

use super::colorize_status;
use crate::config::Config;

/// Build subcommands
#[derive(Subcommand)]
pub enum BuildCommands {
    /// List builds of a job
    List {
        /// Job ID
        job_id: String,

        /// Sort direction (asc or desc)
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortDirection>,

        /// Field to sort by (id, number, createTime, startTime, endTime, status)
        #[arg(long, value_parser = parse_sort_field)]
        sort_by: Option<SortField>,

        /// Page number, starting at 1
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,

        /// Builds per page
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        count: Option<u32>,
    },
    /// Get build details
    Get {
        /// Build ID
        id: i64,
    },
}

/// Handle build commands
pub async fn handle_build_command(command: BuildCommands, config: &Config) -> Result<()> {
    let client = config.client();

    match command {
        BuildCommands::List {
            job_id,
            sort,
            sort_by,
            page,
            count,
        } => {
            let query = ListBuildsQuery {
                sort,
                sort_by,
                page,
                count,
            };
            list_builds(&client, &job_id, &query).await
        }
        BuildCommands::Get { id } => get_build(&client, id).await,
    }
}

/// List builds of a job
async fn list_builds(client: &GantryClient, job_id: &str, query: &ListBuildsQuery) -> Result<()> {
    let builds = client
        .list_builds(job_id, query)
        .await
        .with_context(|| format!("Failed to list builds of job {}", job_id))?;

    if builds.is_empty() {
        println!("{}", format!("No builds found for job {}.", job_id).yellow());
    } else {
        println!(
            "{}",
            format!("Found {} build(s) for job {}:", builds.len(), job_id).bold()
        );
        println!();
        for build in &builds {
            print_build_summary(build);
        }
    }

    Ok(())
}

/// Get and display a single build
async fn get_build(client: &GantryClient, id: i64) -> Result<()> {
    let build = client.get_build(id).await?;

    print_build_details(&build);

    Ok(())
}

/// Print a one-block build summary
fn print_build_summary(build: &BuildView) {
    println!("  {} Build {}", "▸".cyan(), build.id.to_string().dimmed());
    println!("    Status:   {}", colorize_status(build.status));
    println!("    SHA:      {}", short_sha(&build.sha).dimmed());
    println!(
        "    Created:  {}",
        build
            .create_time
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed build information
fn print_build_details(build: &BuildView) {
    println!("{}", "Build Details:".bold());
    println!("  ID:        {}", build.id.to_string().cyan());
    println!("  Job ID:    {}", build.job_id.dimmed());
    println!("  Number:    {}", build.number);
    println!("  Status:    {}", colorize_status(build.status));
    println!("  SHA:       {}", build.sha);
    println!("  Cause:     {}", build.cause);
    println!(
        "  Created:   {}",
        build.create_time.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(started) = build.start_time {
        println!("  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(ended) = build.end_time {
        println!("  Ended:     {}", ended.format("%Y-%m-%d %H:%M:%S"));

        if let Some(started) = build.start_time {
            let duration = ended.signed_duration_since(started);
            println!("  Duration:  {}s", duration.num_seconds());
        }
    }

    if !build.status.is_terminal() {
        println!("  {}", "(still in progress)".dimmed());
    }

    if !build.meta.is_empty() {
        println!("\n{}", "Meta:".bold());
        for (key, value) in &build.meta {
            println!("  {} = {}", key.cyan(), value);
        }
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

fn parse_sort(value: &str) -> Result<SortDirection, String> {
    value
        .parse()
        .map_err(|_| format!("'{}' is not a sort direction (asc, desc)", value))
}

fn parse_sort_field(value: &str) -> Result<SortField, String> {
    value.parse().map_err(|_| {
        let names: Vec<&str> = SortField::ALL.iter().map(|f| f.as_str()).collect();
        format!("'{}' is not sortable (expected one of: {})", value, names.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("desc"), Ok(SortDirection::Desc));
        assert!(parse_sort("down").is_err());
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!(parse_sort_field("endTime"), Ok(SortField::EndTime));
        let err = parse_sort_field("sha").unwrap_err();
        assert!(err.contains("createTime"));
    }
}
