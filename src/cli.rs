//! Command-line arguments for geopath

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use geopath::NodeId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Find routes between locations of a geographic graph
#[derive(Parser, Debug)]
#[command(name = "geopath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Dataset JSON file with "nodes" and "edges"
    #[arg(long, short, global = true, env = "GEOPATH_GRAPH")]
    pub graph: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Log level or filter directive (e.g. debug, geopath=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List locations, ordered by name
    Nodes,

    /// List connections with their weights
    Edges,

    /// Find a path between two locations
    Find {
        /// Start node id
        #[arg(long)]
        start: NodeId,

        /// End node id
        #[arg(long)]
        end: NodeId,

        /// bfs, dfs, dijkstra or astar
        #[arg(long, short, default_value = "dijkstra")]
        algorithm: String,
    },

    /// Run every algorithm between two locations
    Compare {
        /// Start node id
        #[arg(long)]
        start: NodeId,

        /// End node id
        #[arg(long)]
        end: NodeId,
    },

    /// Answer a JSON find-path request, read from stdin when omitted
    Request {
        /// {"start_id": .., "end_id": .., "algorithm": ..}
        body: Option<String>,
    },
}
