//! Beacon CLI
//!
//! Command-line interface for inspecting jobs on an oracle node.

mod commands;
mod config;
mod render;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, DEFAULT_PAGE_SIZE};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Beacon node job CLI", long_about = None)]
struct Cli {
    /// Node API URL
    #[arg(long, env = "BEACON_NODE_URL", default_value = "http://localhost:6688")]
    node_url: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Jobs fetched per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table and JSON output stay pipeable
    let default_filter = if cli.verbose {
        "beacon=debug,beacon_client=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        node_url: cli.node_url,
        output: cli.output,
        page_size: cli.page_size,
        color: !cli.no_color,
    };
    config.validate()?;

    if !config.color {
        colored::control::set_override(false);
    }

    handle_command(cli.command, &config).await
}
