//! Repolens CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "repolens")]
#[command(about = "File-level dependency graph queries for a cloned repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository root path (defaults to current directory)
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/repolens.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read analyzer JSON from this file instead of running the analyzer
    #[arg(short, long, global = true)]
    analysis: Option<PathBuf>,

    /// Branch the checkout is on
    #[arg(short, long, global = true)]
    branch: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the graph API
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },
    /// Print the full graph as JSON
    Graph,
    /// Print node, edge and edge type counts
    Stats,
    /// Print dependencies and dependents of a file as JSON
    Subgraph {
        /// File path; absolute, checkout-prefixed and bare names are accepted
        path: String,

        /// Maximum hops in each direction
        #[arg(short, long)]
        depth: Option<u32>,

        /// Keep edges between nodes more than one hop away
        #[arg(short, long)]
        indirect: bool,
    },
    /// Print the direct dependencies and dependents of a file
    Relations {
        path: String,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays clean
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "repolens={0},repolens_core={0},repolens_analysis={0},repolens_server={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Repolens v{}", env!("CARGO_PKG_VERSION"));

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join(config::CONFIG_FILE));
    let config = config::Config::load(&config_path)?;
    let ctx = commands::Context::new(cli.root, config, cli.analysis, cli.branch);

    match cli.command {
        Commands::Serve { port, host } => commands::serve(&ctx, host, port).await,
        Commands::Graph => commands::graph(&ctx).await,
        Commands::Stats => commands::stats(&ctx).await,
        Commands::Subgraph { path, depth, indirect } => {
            commands::subgraph(&ctx, &path, depth, indirect).await
        }
        Commands::Relations { path } => commands::relations(&ctx, &path).await,
        Commands::Version => {
            println!("Repolens v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
