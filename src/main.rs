use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dotroot::export::{export, ExportFormat};
use dotroot::graph::Graph;
use dotroot::parser::parse_str;
use dotroot::solver::{solve, SolveError, SolveOptions};

#[derive(Parser)]
#[command(name = "dotroot")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Find the root that reaches every node of a DOT graph with the fewest added edges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best root and write the augmented graph
    Solve {
        /// DOT file to read (defaults to standard input)
        input: Option<PathBuf>,

        /// File to write (defaults to standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: dot or json
        #[arg(short, long, default_value = "dot")]
        format: ExportFormat,

        /// Label every node with its distance from the root
        #[arg(short, long)]
        distances: bool,

        /// Prefix added to the graph name
        #[arg(long, default_value = "out_")]
        prefix: String,

        /// Color of the added edges
        #[arg(long, default_value = "red")]
        color: String,

        /// Log level: trace, debug, info, warn or error
        #[arg(long, default_value = "warn")]
        log_level: Level,
    },
    /// Parse a graph and report its structure
    Check {
        /// DOT file to read (defaults to standard input)
        input: Option<PathBuf>,

        /// Log level: trace, debug, info, warn or error
        #[arg(long, default_value = "warn")]
        log_level: Level,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Solve {
            input,
            output,
            format,
            distances,
            prefix,
            color,
            log_level,
        }) => {
            init_logging(log_level)?;
            let options = SolveOptions {
                output_prefix: prefix,
                added_edge_color: color,
                label_distances: distances,
            };
            run_solve(input.as_deref(), output.as_deref(), format, &options)
        }
        Some(Commands::Check { input, log_level }) => {
            init_logging(log_level)?;
            run_check(input.as_deref())
        }
        Some(Commands::Version) => {
            println!("dotroot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("dotroot - DOT graph root solver");
            println!("Run 'dotroot solve <file>' to augment a graph");
            println!("Run 'dotroot --help' for more information");
            Ok(())
        }
    }
}

/// Sends log records to stderr so they never mix with graph output.
fn init_logging(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn read_graph(input: Option<&Path>) -> Result<Graph> {
    let (source, text) = match input {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            ("<stdin>".to_string(), text)
        }
    };

    let graph = parse_str(&text).with_context(|| format!("failed to parse {}", source))?;
    info!(
        "parsed {} graph '{}' from {}: {} node(s), {} edge(s)",
        graph.kind(),
        graph.name(),
        source,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn run_solve(
    input: Option<&Path>,
    output: Option<&Path>,
    format: ExportFormat,
    options: &SolveOptions,
) -> Result<()> {
    let mut graph = read_graph(input)?;

    let solution = match solve(&mut graph, options) {
        Ok(solution) => solution,
        Err(SolveError::Cyclic { cycles }) if !cycles.is_empty() => {
            let paths: Vec<String> = cycles.iter().map(|c| c.cycle_path()).collect();
            bail!("the graph contains cycles: {}", paths.join("; "));
        }
        Err(err) => return Err(err).context("failed to find a root"),
    };
    info!(
        "root '{}' reaches every node with {} added edge(s)",
        solution.root_name, solution.added_edges
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export(format, &graph, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export(format, &graph, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn run_check(input: Option<&Path>) -> Result<()> {
    let graph = read_graph(input)?;

    println!("graph: {}", graph.name());
    println!("kind: {}", graph.kind());
    println!("nodes: {}", graph.node_count());
    println!("edges: {}", graph.edge_count());

    if graph.is_cyclic() {
        let cycles = graph.cycles();
        println!("cyclic: yes");
        for cycle in &cycles {
            println!("  {}", cycle.cycle_path());
        }
    } else {
        println!("cyclic: no");
    }

    let candidates: Vec<&str> = graph
        .non_entrant_nodes()
        .into_iter()
        .filter_map(|id| graph.node(id))
        .map(|node| node.name())
        .collect();
    println!("candidate roots: {}", candidates.join(", "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_to_warn() {
        let cli = Cli::try_parse_from(["dotroot", "check", "graph.dot"]).unwrap();
        match cli.command {
            Some(Commands::Check { log_level, .. }) => assert_eq!(log_level, Level::WARN),
            _ => panic!("expected the check subcommand"),
        }
    }

    #[test]
    fn test_log_level_is_parsed() {
        let cli = Cli::try_parse_from(["dotroot", "solve", "--log-level", "debug"]).unwrap();
        match cli.command {
            Some(Commands::Solve { log_level, .. }) => assert_eq!(log_level, Level::DEBUG),
            _ => panic!("expected the solve subcommand"),
        }
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["dotroot", "solve", "--log-level", "verbose"]).is_err());
        assert!(Cli::try_parse_from(["dotroot", "check", "--log-level", "wran"]).is_err());
    }

    #[test]
    fn test_export_format_is_validated() {
        assert!(Cli::try_parse_from(["dotroot", "solve", "--format", "json"]).is_ok());
        assert!(Cli::try_parse_from(["dotroot", "solve", "--format", "csv"]).is_err());
    }
}
