use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use store_graph_core::{
    Item, Position,
    graph::StoreGraph,
    store::{Store, load_store_from_string},
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about = "Build a navigation graph from a store floor plan", long_about = None)]
struct Args {
    /// Store document (JSON with "path" and "items")
    #[arg(short, long, value_name = "STORE_FILE", conflicts_with_all = ["layout", "items"])]
    store: Option<PathBuf>,

    /// Text layout of two-letter cell codes, one row per line
    #[arg(short, long, value_name = "LAYOUT_FILE", required_unless_present = "store")]
    layout: Option<PathBuf>,

    /// JSON array of items placed on the layout
    #[arg(short, long, value_name = "ITEMS_FILE", requires = "layout")]
    items: Option<PathBuf>,

    /// Start vertex as "row,column"
    #[arg(long, value_name = "ROW,COLUMN")]
    start: Option<Position>,

    /// End vertex as "row,column"
    #[arg(long, value_name = "ROW,COLUMN")]
    end: Option<Position>,

    /// Write the graph here instead of stdout
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let store = load_store(&args)?;
    let mut graph = store.graph();

    if let Some(start) = args.start {
        graph
            .set_start(start)
            .with_context(|| format!("Cannot start at {start}"))?;
    }
    if let Some(end) = args.end {
        graph
            .set_end(end)
            .with_context(|| format!("Cannot end at {end}"))?;
    }
    info!(
        vertices = graph.vertex_count(),
        items = graph.items().len(),
        "Graph ready"
    );

    write_graph(&graph, args.output.as_deref(), args.compact)
}

/// Reads the store from either a JSON document or a layout plus item list.
fn load_store(args: &Args) -> Result<Store> {
    if let Some(store_file) = &args.store {
        let json = read_file(store_file)?;
        return Store::from_json(&json)
            .with_context(|| format!("Failed to load store {}", store_file.display()));
    }

    let layout_file = args
        .layout
        .as_ref()
        .context("Either --store or --layout is required")?;
    let layout = read_file(layout_file)?;

    let items: Vec<Item> = match &args.items {
        Some(items_file) => serde_json::from_str(&read_file(items_file)?)
            .with_context(|| format!("Failed to parse items {}", items_file.display()))?,
        None => Vec::new(),
    };

    load_store_from_string(&layout, items)
        .with_context(|| format!("Failed to load layout {}", layout_file.display()))
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Serializes the graph to `output`, or stdout when none is given.
fn write_graph(graph: &StoreGraph<'_>, output: Option<&Path>, compact: bool) -> Result<()> {
    let mut json = if compact {
        serde_json::to_string(graph)?
    } else {
        serde_json::to_string_pretty(graph)?
    };
    json.push('\n');

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Graph written");
        }
        None => io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}
