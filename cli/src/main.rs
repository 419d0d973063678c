//! GADGraph CLI: query a gene-disease association network from the terminal
//!
//! Loads the gene, disease and association tables once, then runs one
//! analysis command (or an interactive shell) against the snapshot.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use gadgraph::algo::{
    associations, common_neighbors, expand_subgraph, rank_similar_with, top_by_degree,
    top_connected,
};
use gadgraph::{load_graph_with, AnalysisConfig, GraphStore, NodeId, NodeKind};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "gadgraph", version, about = "Gene-disease association graph analysis")]
struct Cli {
    /// Gene table (CSV, or TSV by extension)
    #[arg(long, env = "GADGRAPH_GENES")]
    genes: PathBuf,

    /// Disease table
    #[arg(long, env = "GADGRAPH_DISEASES")]
    diseases: PathBuf,

    /// Gene-disease association table
    #[arg(long, env = "GADGRAPH_ASSOCIATIONS")]
    associations: PathBuf,

    /// YAML file with analysis defaults
    #[arg(long, env = "GADGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log loading and query details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// One line typed into the interactive shell
#[derive(Parser)]
#[command(no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Kind {
    Gene,
    Disease,
}

impl From<Kind> for NodeKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Gene => NodeKind::Gene,
            Kind::Disease => NodeKind::Disease,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Node and association counts
    Stats,
    /// Show a gene by id or symbol
    Gene { gene: String },
    /// Show a disease by id or name
    Disease { disease: String },
    /// Associations of a node, strongest first
    Associations {
        kind: Kind,
        node: String,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Neighbors shared by two nodes of the same kind
    Common {
        kind: Kind,
        first: String,
        second: String,
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Nodes ranked by overlap with a reference node
    Similar {
        kind: Kind,
        node: String,
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Most connected nodes of one kind
    Top {
        kind: Kind,
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        limit: Option<usize>,
        /// Count every association regardless of score
        #[arg(long)]
        degree: bool,
    },
    /// Hub cluster reachable from a seed through high-degree nodes
    Hubs {
        kind: Kind,
        seed: String,
        #[arg(long)]
        min_degree: Option<usize>,
    },
    /// Start an interactive shell over the loaded graph
    Shell,
}

/// Tabular command output
#[derive(Serialize)]
struct Rows {
    columns: Vec<String>,
    records: Vec<Vec<Value>>,
}

impl Rows {
    fn new(columns: &[&str]) -> Self {
        Rows {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records: Vec::new(),
        }
    }

    fn push(&mut self, record: Vec<Value>) {
        self.records.push(record);
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    let store = load_graph_with(
        &cli.genes,
        &cli.diseases,
        &cli.associations,
        &config.build_options(),
    )?;
    info!("Graph ready: {} nodes, {} associations", store.node_count(), store.edge_count());

    match cli.command {
        Commands::Shell => run_shell(&store, &config, &cli.format),
        command => run_command(&store, &config, command, &cli.format),
    }
}

fn run_command(
    store: &GraphStore,
    config: &AnalysisConfig,
    command: Commands,
    format: &OutputFormat,
) -> Result<()> {
    let rows = match command {
        Commands::Stats => stats(store),
        Commands::Gene { gene } => details(store, NodeKind::Gene, &gene)?,
        Commands::Disease { disease } => details(store, NodeKind::Disease, &disease)?,
        Commands::Associations {
            kind,
            node,
            threshold,
        } => {
            let id = resolve(store, kind.into(), &node)?;
            let threshold = threshold.unwrap_or(config.association_threshold);
            let mut rows = Rows::new(&["id", "label", "score", "evidence_index", "evidence_level"]);
            for n in associations(store, &id, threshold)? {
                rows.push(vec![
                    json!(n.id.key),
                    json!(n.label),
                    json!(n.score),
                    json!(n.evidence_index),
                    json!(n.evidence_level),
                ]);
            }
            rows
        }
        Commands::Common {
            kind,
            first,
            second,
            threshold,
        } => {
            let a = resolve(store, kind.into(), &first)?;
            let b = resolve(store, kind.into(), &second)?;
            let threshold = threshold.unwrap_or(config.common_threshold);
            let mut rows = Rows::new(&["id", "label"]);
            for id in common_neighbors(store, &a, &b, threshold, threshold)? {
                rows.push(vec![json!(id.key), json!(store.node(&id)?.label)]);
            }
            rows
        }
        Commands::Similar {
            kind,
            node,
            threshold,
            top,
        } => {
            let id = resolve(store, kind.into(), &node)?;
            let ranked = rank_similar_with(
                store,
                &id,
                threshold.unwrap_or(config.similarity_threshold),
                top.unwrap_or(config.similarity_top_n),
                &config.similarity_options(),
            )?;
            let mut rows = Rows::new(&["id", "label", "shared_count", "shared"]);
            for s in ranked {
                let shared: Vec<&str> = s.shared.iter().map(|n| n.as_str()).collect();
                rows.push(vec![
                    json!(s.id.key),
                    json!(s.label),
                    json!(s.shared_count),
                    json!(shared),
                ]);
            }
            rows
        }
        Commands::Top {
            kind,
            threshold,
            limit,
            degree,
        } => {
            let limit = limit.unwrap_or(config.ranking_limit);
            let ranked = if degree {
                top_by_degree(store, kind.into(), limit)
            } else {
                top_connected(
                    store,
                    kind.into(),
                    threshold.unwrap_or(config.ranking_threshold),
                    limit,
                )
            };
            let mut rows = Rows::new(&["id", "label", "count"]);
            for r in ranked {
                rows.push(vec![json!(r.id.key), json!(r.label), json!(r.count)]);
            }
            rows
        }
        Commands::Hubs {
            kind,
            seed,
            min_degree,
        } => {
            let id = resolve(store, kind.into(), &seed)?;
            let hubs = expand_subgraph(store, &id, min_degree.unwrap_or(config.hub_min_degree))?;
            let mut rows = Rows::new(&["id", "kind", "label", "degree"]);
            for id in &hubs {
                rows.push(vec![
                    json!(id.key),
                    json!(id.kind.as_str()),
                    json!(store.node(id)?.label),
                    json!(store.degree(id)?),
                ]);
            }
            info!(
                "Hub cluster has {} nodes and {} associations",
                hubs.len(),
                store.induced_edges(&hubs).len()
            );
            rows
        }
        Commands::Shell => return Err(anyhow!("already in the shell")),
    };

    print_rows(&rows, format)
}

fn resolve(store: &GraphStore, kind: NodeKind, query: &str) -> Result<NodeId> {
    Ok(store.resolve(kind, query)?.id.clone())
}

fn stats(store: &GraphStore) -> Rows {
    let stats = store.statistics();
    let mut rows = Rows::new(&["genes", "diseases", "associations"]);
    rows.push(vec![
        json!(stats.genes),
        json!(stats.diseases),
        json!(stats.associations),
    ]);
    rows
}

fn details(store: &GraphStore, kind: NodeKind, query: &str) -> Result<Rows> {
    let node = store.resolve(kind, query)?;
    let mut rows = Rows::new(&["field", "value"]);
    rows.push(vec![json!("id"), json!(node.id.key)]);
    rows.push(vec![json!("label"), json!(node.label)]);
    rows.push(vec![json!("degree"), json!(store.degree(&node.id)?)]);

    if let Value::Object(attributes) = serde_json::to_value(&node.attributes)? {
        for (field, value) in attributes {
            if field != "kind" {
                rows.push(vec![json!(field), value]);
            }
        }
    }
    Ok(rows)
}

fn print_rows(rows: &Rows, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Csv => {
            println!("{}", rows.columns.join(","));
            for row in &rows.records {
                let cells: Vec<String> = row.iter().map(format_csv_value).collect();
                println!("{}", cells.join(","));
            }
        }
        OutputFormat::Table => {
            if rows.records.is_empty() {
                println!("(no results)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(&rows.columns);

            for row in &rows.records {
                let cells: Vec<String> = row.iter().map(format_table_value).collect();
                table.add_row(cells);
            }

            println!("{}", table);
            println!("{} row(s)", rows.records.len());
        }
    }

    Ok(())
}

fn run_shell(store: &GraphStore, config: &AnalysisConfig, format: &OutputFormat) -> Result<()> {
    println!("GADGraph Interactive Shell");
    println!("Type a command (e.g. similar gene TP53 --top 3), help, or quit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("gadgraph> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            "quit" | "exit" | ":q" => break,
            _ => match ShellLine::try_parse_from(split_words(trimmed)) {
                Ok(parsed) => {
                    if let Err(e) = run_command(store, config, parsed.command, format) {
                        eprintln!("Error: {}", e);
                    }
                }
                // clap renders help and usage errors itself
                Err(e) => eprintln!("{}", e),
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Split on whitespace, keeping double-quoted runs together
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn format_table_value(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(format_table_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}

fn format_csv_value(v: &Value) -> String {
    match v {
        Value::Null => "".to_string(),
        Value::String(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.clone()
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => {
            let joined = items.iter().map(format_table_value).collect::<Vec<_>>().join(";");
            format_csv_value(&Value::String(joined))
        }
        _ => {
            let json = serde_json::to_string(v).unwrap_or_default();
            format!("\"{}\"", json.replace('"', "\"\""))
        }
    }
}
