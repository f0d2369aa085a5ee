//! Actuator CLI — the main entry point.
//!
//! Commands:
//! - `run`    — Execute a task through the control loop
//! - `tools`  — List the built-in capability set
//! - `config` — Show the resolved configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "actuator",
    about = "Actuator — agent control core",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent against a task
    Run {
        /// The task to perform
        task: String,

        /// Override the iteration cap for this run
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Override the workspace directory tools operate in
        #[arg(long)]
        workspace: Option<PathBuf>,
    },

    /// List registered tools and their schemas
    Tools,

    /// Show the resolved configuration
    Config {
        /// Print the default configuration instead of the resolved one
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            task,
            max_iterations,
            workspace,
        } => commands::run::run(task, max_iterations, workspace).await?,
        Commands::Tools => commands::tools::run().await?,
        Commands::Config { default } => commands::config_cmd::run(default).await?,
    }

    Ok(())
}
