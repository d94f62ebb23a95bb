//! Planar CLI
//!
//! Entry point for the `planar` command-line tool. Reads graphs from dot or
//! csv files, computes maximum planar subgraphs, checks planarity, converts
//! between formats and draws pictures with Graphviz.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use planar_common::io::{GraphFormat, LoadedGraph, read_graph, write_graph};
use planar_common::{Graph, render};
use planar_subgraph::{KuratowskiWitness, MaxPlanarSearch, kuratowski_witness};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{Args, Command, InputArgs};

type CliResult = Result<(), Box<dyn Error>>;

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose && std::env::var_os("RUST_LOG").is_none() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_ids(true)
        .init();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CliResult {
    match command {
        Command::Compute {
            input,
            output,
            search,
        } => {
            let graph = load(&input)?;
            let config = search.to_config();
            let outcome = MaxPlanarSearch::new(&graph, config)
                .run()
                .map_err(|e| format!("search failed: {e}"))?;

            let kept = outcome.subgraph.edge_count();
            println!(
                "input: {} vertices, {} edges",
                graph.vertex_count(),
                graph.edge_count()
            );
            println!(
                "planar subgraph: {} edges ({} removed), {}",
                kept,
                graph.edge_count() - kept,
                outcome.status
            );
            println!("{}", outcome.stats);

            store(&outcome.subgraph, &output, input.format_of(&output))
        }
        Command::Picture { input, output } => {
            let graph = load(&input)?;
            render::render(&graph, &output)
                .map_err(|e| format!("cannot draw {}: {e}", output.display()))?;
            info!("picture written to {}", output.display());
            Ok(())
        }
        Command::Check { input } => {
            let graph = load(&input)?;
            match kuratowski_witness(&graph).map_err(|e| format!("planarity test failed: {e}"))? {
                None => println!("planar"),
                Some(witness) => print_witness(&graph, &witness),
            }
            Ok(())
        }
        Command::ToDot { input, output } => {
            let graph = load(&input)?;
            store(&graph, &output, GraphFormat::Dot)
        }
        Command::ToCsv { input, output } => {
            let graph = load(&input)?;
            store(&graph, &output, GraphFormat::Csv)
        }
    }
}

fn load(input: &InputArgs) -> Result<Graph, Box<dyn Error>> {
    let LoadedGraph { graph, directed } = read_graph(&input.input, input.format_of(&input.input))
        .map_err(|e| format!("cannot read {}: {e}", input.input.display()))?;
    if directed {
        warn!(
            "{} describes a directed graph; edge directions are ignored",
            input.input.display()
        );
    }
    Ok(graph)
}

fn store(graph: &Graph, output: &Path, format: GraphFormat) -> CliResult {
    write_graph(output, graph, format)
        .map_err(|e| format!("cannot write {}: {e}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn print_witness(graph: &Graph, witness: &KuratowskiWitness) {
    let name = |v| graph.label(v).unwrap_or("?");
    println!("not planar: contains a subdivision of {}", witness.kind);
    let branch: Vec<&str> = witness.branch_vertices.iter().map(|&v| name(v)).collect();
    println!("branch vertices: {}", branch.join(", "));
    for path in &witness.paths {
        let hops: Vec<&str> = path.iter().map(|&v| name(v)).collect();
        println!("  {}", hops.join(" -- "));
    }
}
