//! geopath - route search over a geographic graph from the command line

mod cli;
mod logging;

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use cli::{Cli, Commands, OutputFormat};
use geopath::api::{FindPathRequest, FindPathResponse, PathfinderService, NO_PATH_MESSAGE};
use geopath::dataset::Dataset;
use geopath::{Algorithm, NodeId, PathResult, PathfinderError, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Ok(false) when a search came back empty
fn run(cli: &Cli) -> Result<bool> {
    let Some(path) = cli.graph.as_deref() else {
        return Err(PathfinderError::InvalidRequest(
            "no dataset given, pass --graph or set GEOPATH_GRAPH".to_string(),
        ));
    };
    let service = PathfinderService::new(load(path)?);

    match &cli.command {
        Commands::Nodes => {
            let listing = service.nodes();
            match cli.format {
                OutputFormat::Json => print_json(&listing)?,
                OutputFormat::Text => {
                    for node in &listing.nodes {
                        println!(
                            "{:>4}  {:<28} ({:.4}, {:.4})  {}",
                            node.id, node.name, node.latitude, node.longitude, node.description
                        );
                    }
                }
            }
            Ok(true)
        }
        Commands::Edges => {
            let listing = service.edges()?;
            match cli.format {
                OutputFormat::Json => print_json(&listing)?,
                OutputFormat::Text => {
                    for edge in &listing.edges {
                        println!("{} -> {}  {:.3}", edge.from_node.name, edge.to_node.name, edge.weight);
                    }
                }
            }
            Ok(true)
        }
        Commands::Find { start, end, algorithm } => {
            let request = FindPathRequest::new(*start, *end, algorithm.as_str());
            match cli.format {
                OutputFormat::Json => {
                    let response = service.respond(&request);
                    println!("{}", response.to_json()?);
                    Ok(response.is_success())
                }
                OutputFormat::Text => match service.find_path(&request)? {
                    Some(result) => {
                        print_result(service.dataset(), &result);
                        Ok(true)
                    }
                    None => {
                        println!("{NO_PATH_MESSAGE}");
                        Ok(false)
                    }
                },
            }
        }
        Commands::Compare { start, end } => {
            let results = service.compare(*start, *end);
            match cli.format {
                OutputFormat::Json => {
                    let responses: Vec<&FindPathResponse> = results.iter().map(|(_, r)| r).collect();
                    print_json(&responses)?;
                }
                OutputFormat::Text => print_comparison(&results),
            }
            Ok(results.iter().any(|(_, r)| r.is_success()))
        }
        Commands::Request { body } => {
            let body = match body {
                Some(body) => body.clone(),
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let response = service.handle(&body);
            println!("{}", response.to_json()?);
            Ok(response.is_success())
        }
    }
}

fn load(path: &Path) -> Result<Dataset> {
    let dataset = Dataset::load(path)?;
    info!(
        path = %path.display(),
        nodes = dataset.nodes.len(),
        edges = dataset.edges.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn node_name(dataset: &Dataset, id: NodeId) -> String {
    dataset.node(id).map_or_else(|| id.to_string(), |n| n.name.clone())
}

fn print_result(dataset: &Dataset, result: &PathResult) {
    let names: Vec<String> = result.path.iter().map(|id| node_name(dataset, *id)).collect();
    let unit = if result.algorithm.is_weighted() { "" } else { " edges" };

    println!("Algorithm:      {}", result.algorithm);
    println!("Path:           {}", names.join(" -> "));
    println!("Distance:       {:.2}{unit}", result.distance);
    println!("Nodes explored: {}", result.nodes_explored);
    println!("Execution time: {:.3} ms", result.execution_time_ms);
}

fn print_comparison(results: &[(Algorithm, FindPathResponse)]) {
    println!(
        "{:<10} {:>10} {:>12} {:>15} {:>12}",
        "Algorithm", "Distance", "Time (ms)", "Nodes explored", "Path length"
    );
    for (algorithm, response) in results {
        match response {
            FindPathResponse::Found(found) => println!(
                "{:<10} {:>10.2} {:>12.3} {:>15} {:>12}",
                found.algorithm,
                found.distance,
                found.execution_time,
                found.nodes_explored,
                found.path_ids.len().saturating_sub(1),
            ),
            FindPathResponse::Failed(failure) => {
                debug!(%algorithm, error = %failure.error, "no result");
                println!("{:<10} {}", algorithm.display_name(), failure.error);
            }
        }
    }
}
