//! CLI command implementations.

use crate::config::{Config, LOCAL_CONFIG};
use crate::error::CliError;
use crate::params;
use crate::print;
use crate::timing::Timer;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snb_graph::{Database, GraphSnapshot, SocialGraph};
use snb_queries::{execute, Operation};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Options shared by the query commands.
pub struct RunOptions {
    pub timing: bool,
    pub print: bool,
    pub json: bool,
    pub limit: Option<usize>,
}

/// Write a default config file to `path`.
pub fn init(path: &Path) -> Result<()> {
    let config_path = if path.is_dir() {
        path.join(LOCAL_CONFIG)
    } else {
        path.to_path_buf()
    };

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::write(
        &config_path,
        serde_json::to_string_pretty(&Config::default())?,
    )?;

    println!("{} Wrote {}", "✓".green(), config_path.display());
    println!("  Run {} to load a graph", "snb import".cyan());
    Ok(())
}

/// Load a JSON snapshot into a new store at `graph`.
pub fn import(graph: &Path, snapshot: &Path) -> Result<()> {
    if !snapshot.exists() {
        return Err(CliError::MissingFile(snapshot.to_path_buf()).into());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Reading snapshot...");

    let start = Instant::now();
    let snapshot = GraphSnapshot::from_reader(BufReader::new(File::open(snapshot)?))?;

    spinner.set_message("Building graph...");
    let social_graph = SocialGraph::from_snapshot(snapshot)?;

    spinner.set_message("Saving...");
    let db = Database::create(graph, social_graph)?;
    spinner.finish_and_clear();

    let stats = db.read().stats();
    info!(path = %graph.display(), nodes = stats.node_count, "imported graph");
    println!(
        "{} Imported {} nodes and {} edges in {}ms",
        "✓".green(),
        stats.node_count.to_string().cyan(),
        stats.edge_count.to_string().cyan(),
        start.elapsed().as_millis()
    );
    Ok(())
}

/// Show node and edge counts.
pub fn stats(graph: &Path) -> Result<()> {
    let db = open(graph)?;
    let stats = db.read().stats();

    println!("{}", "Graph".cyan().bold());
    println!("  Nodes: {}", stats.node_count.to_string().green());
    println!("  Edges: {}", stats.edge_count.to_string().green());

    if !stats.nodes_by_label.is_empty() {
        println!();
        println!("{}", "Nodes by label".cyan());
        for (label, count) in &stats.nodes_by_label {
            println!("  {:14} {}", label.to_string(), count);
        }
    }
    if !stats.edges_by_kind.is_empty() {
        println!();
        println!("{}", "Edges by kind".cyan());
        for (kind, count) in &stats.edges_by_kind {
            println!("  {:14} {}", kind.to_string(), count);
        }
    }
    Ok(())
}

/// Run complex query `query` once per line of a parameter file.
pub fn run(
    config: &Config,
    graph: &Path,
    query: u8,
    parameters: &Path,
    options: &RunOptions,
) -> Result<()> {
    let limit = options.limit.or_else(|| config.limits.complex(query));
    let operations = params::read_operations(parameters, query, limit)?;
    let db = open(graph)?;
    run_all(&db, &operations, options)
}

/// Run short query `query` for one anchor id.
pub fn short(config: &Config, graph: &Path, query: u8, id: i64, options: &RunOptions) -> Result<()> {
    let limit = options.limit.unwrap_or(config.limits.short_messages);
    let operation = params::short_operation(query, id, Some(limit))?;
    let db = open(graph)?;
    run_all(&db, &[operation], options)
}

/// Execute a file of JSON operations, one per line.
pub fn apply(graph: &Path, operations: &Path, options: &RunOptions) -> Result<()> {
    if !operations.exists() {
        return Err(CliError::MissingFile(operations.to_path_buf()).into());
    }

    let reader = BufReader::new(File::open(operations)?);
    let mut parsed = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let op: Operation = serde_json::from_str(&line).map_err(|e| CliError::MalformedLine {
            path: operations.display().to_string(),
            line: number + 1,
            reason: e.to_string(),
        })?;
        parsed.push(op);
    }

    let db = open(graph)?;
    let timer = Timer::start();
    let batch = db.batch();
    for op in &parsed {
        let result = execute(&db, op)?;
        if options.print {
            println!("{} ({})", op.name(), result.count);
        }
    }
    batch.finish()?;
    if options.timing {
        timer.print();
    }
    println!("{} Applied {} operations", "✓".green(), parsed.len());
    Ok(())
}

fn open(graph: &Path) -> Result<Database> {
    if !graph.exists() {
        return Err(CliError::MissingFile(graph.to_path_buf()).into());
    }
    Ok(Database::open(graph)?)
}

fn run_all(db: &Database, operations: &[Operation], options: &RunOptions) -> Result<()> {
    let timer = Timer::start();
    for op in operations {
        let result = execute(db, op)?;
        if options.json {
            println!("{}", serde_json::to_string(&result.value)?);
        } else if options.print {
            print::print(op, &result);
        }
    }

    if options.timing {
        timer.print();
    }
    Ok(())
}
