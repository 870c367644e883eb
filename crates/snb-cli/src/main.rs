//! SNB CLI - Command-line interface for the social network query engine
//!
//! Loads graph snapshots into a store and runs the complex, short and
//! update operations against it.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod params;
mod print;
mod timing;

use commands::RunOptions;
use config::Config;

#[derive(Parser)]
#[command(name = "snb")]
#[command(author = "SNB Contributors")]
#[command(version)]
#[command(about = "Social network benchmark queries over a property graph", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./snb.json, then the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Directory or file to write (defaults to ./snb.json)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Load a JSON snapshot into a graph store
    Import {
        /// Graph store directory
        graph: PathBuf,

        /// Snapshot file with nodes and edges
        snapshot: PathBuf,
    },

    /// Show graph statistics
    Stats {
        /// Graph store directory
        graph: PathBuf,
    },

    /// Run a complex query once per line of a parameter file
    Run {
        /// Graph store directory
        graph: PathBuf,

        /// Query number (1-14)
        query: u8,

        /// Substitution parameter file
        params: PathBuf,

        /// Time the execution
        #[arg(short, long)]
        time: bool,

        /// Print the results
        #[arg(short, long)]
        print: bool,

        /// Print each result as a JSON line
        #[arg(long)]
        json: bool,

        /// Maximum results per invocation
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run a short query for one person or message
    Short {
        /// Graph store directory
        graph: PathBuf,

        /// Query number (1-7)
        query: u8,

        /// Person id (1-3) or message id (4-7)
        id: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Maximum messages for query 2
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Execute a file of JSON operations, one per line
    Apply {
        /// Graph store directory
        graph: PathBuf,

        /// Operations file
        operations: PathBuf,

        /// Print each result
        #[arg(short, long)]
        print: bool,

        /// Time the execution
        #[arg(short, long)]
        time: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    // Set up logging
    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Import { graph, snapshot } => commands::import(&graph, &snapshot),
        Commands::Stats { graph } => commands::stats(&graph),
        Commands::Run {
            graph,
            query,
            params,
            time,
            print,
            json,
            limit,
        } => commands::run(
            &config,
            &graph,
            query,
            &params,
            &RunOptions {
                timing: time,
                print,
                json,
                limit,
            },
        ),
        Commands::Short {
            graph,
            query,
            id,
            json,
            limit,
        } => commands::short(
            &config,
            &graph,
            query,
            id,
            &RunOptions {
                timing: false,
                print: !json,
                json,
                limit,
            },
        ),
        Commands::Apply {
            graph,
            operations,
            print,
            time,
        } => commands::apply(
            &graph,
            &operations,
            &RunOptions {
                timing: time,
                print,
                json: false,
                limit: None,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
