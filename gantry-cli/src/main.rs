//! Gantry CLI
//!
//! Command-line interface for reading jobs and builds from a Gantry server.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Gantry CI build CLI", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(long, env = "GANTRY_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Bearer token
    #[arg(long, env = "GANTRY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
