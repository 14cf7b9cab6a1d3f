use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, PathfinderError>;

#[derive(Debug, Error)]
pub enum PathfinderError {
    /// Algorithm name outside bfs, dfs, dijkstra, astar
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// Edge references a node that is not in the node collection
    #[error("Edge {from} -> {to} references missing node {missing}")]
    MissingNode { from: NodeId, to: NodeId, missing: NodeId },

    /// Negative or NaN edge weight
    #[error("Edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("Unknown node id: {0}")]
    UnknownNode(NodeId),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
