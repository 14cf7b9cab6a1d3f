//! JSON request/response layer over the search engine
//!
//! Mirrors the web endpoints: node listing, edge listing, and find-path.
//! A snapshot is rebuilt from the dataset for every find-path request.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::dataset::Dataset;
use crate::errors::{PathfinderError, Result};
use crate::graph::{Node, NodeId};
use crate::pathfinding::{find_path, Algorithm, PathResult};


pub const NO_PATH_MESSAGE: &str = "No path found between the selected nodes";

fn default_algorithm() -> String {
    Algorithm::default().key().to_string()
}

/// Accepts `3` as well as `"3"`
fn node_id<'de, D>(deserializer: D) -> std::result::Result<NodeId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(NodeId),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(id) => Ok(id),
        Repr::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}


/// Body of a find-path request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FindPathRequest {
    #[serde(deserialize_with = "node_id")]
    pub start_id: NodeId,
    #[serde(deserialize_with = "node_id")]
    pub end_id: NodeId,
    /// bfs, dfs, dijkstra or astar, any case
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl FindPathRequest {
    pub fn new(start_id: NodeId, end_id: NodeId, algorithm: impl Into<String>) -> Self {
        Self { start_id, end_id, algorithm: algorithm.into() }
    }
}


/// Location summary used in path listings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    pub id: NodeId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Node> for NodeRef {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            latitude: node.latitude,
            longitude: node.longitude,
        }
    }
}


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathFound {
    pub success: bool,
    pub path: Vec<NodeRef>,
    pub path_ids: Vec<NodeId>,
    pub distance: f64,
    pub nodes_explored: usize,
    /// milliseconds
    pub execution_time: f64,
    pub algorithm: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

/// `{success: true, ...}` or `{success: false, error}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindPathResponse {
    Found(PathFound),
    Failed(Failure),
}

impl FindPathResponse {

    pub fn is_success(&self) -> bool {
        matches!(self, FindPathResponse::Found(_))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}


#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodesResponse {
    pub nodes: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub from_node: NodeRef,
    pub to_node: NodeRef,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgesResponse {
    pub edges: Vec<EdgeView>,
}


/// Serves requests against one dataset
#[derive(Clone, Debug)]
pub struct PathfinderService {
    dataset: Dataset,
}

impl PathfinderService {

    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Every node, ordered by name
    pub fn nodes(&self) -> NodesResponse {
        NodesResponse {
            nodes: self.dataset.nodes_by_name().into_iter().cloned().collect(),
        }
    }

    /// Every edge with both endpoints resolved
    pub fn edges(&self) -> Result<EdgesResponse> {
        let edges = self.dataset.edges
            .iter()
            .map(|edge| {
                let lookup = |id| {
                    self.dataset.node(id).ok_or(PathfinderError::MissingNode {
                        from: edge.from_id,
                        to: edge.to_id,
                        missing: id,
                    })
                };
                Ok(EdgeView {
                    from_node: lookup(edge.from_id)?.into(),
                    to_node: lookup(edge.to_id)?.into(),
                    weight: edge.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EdgesResponse { edges })
    }

    /// Run one search
    /// Ok(None) means the two nodes are not connected
    pub fn find_path(&self, request: &FindPathRequest) -> Result<Option<PathResult>> {
        let algorithm: Algorithm = request.algorithm.parse()?;

        for id in [request.start_id, request.end_id] {
            if self.dataset.node(id).is_none() {
                return Err(PathfinderError::UnknownNode(id));
            }
        }

        let graph = self.dataset.snapshot()?;
        Ok(find_path(&graph, request.start_id, request.end_id, algorithm))
    }

    /// Run one search and shape the outcome as a response
    pub fn respond(&self, request: &FindPathRequest) -> FindPathResponse {
        debug!(
            start_id = request.start_id,
            end_id = request.end_id,
            algorithm = %request.algorithm,
            "find path"
        );

        match self.find_path(request) {
            Ok(Some(result)) => {
                debug!(
                    algorithm = %result.algorithm,
                    hops = result.path.len().saturating_sub(1),
                    distance = result.distance,
                    nodes_explored = result.nodes_explored,
                    execution_time_ms = result.execution_time_ms,
                    "path found"
                );
                FindPathResponse::Found(self.path_found(result))
            }
            Ok(None) => {
                debug!(start_id = request.start_id, end_id = request.end_id, "no path");
                FindPathResponse::Failed(Failure::new(NO_PATH_MESSAGE))
            }
            Err(e) => {
                warn!(error = %e, "find path failed");
                FindPathResponse::Failed(Failure::new(e.to_string()))
            }
        }
    }

    /// Answer a raw JSON request body
    pub fn handle(&self, body: &str) -> FindPathResponse {
        match serde_json::from_str::<FindPathRequest>(body) {
            Ok(request) => self.respond(&request),
            Err(e) => {
                let e = PathfinderError::InvalidRequest(e.to_string());
                warn!(error = %e, "rejected request");
                FindPathResponse::Failed(Failure::new(e.to_string()))
            }
        }
    }

    /// Responses of every algorithm for the same pair, in `Algorithm::ALL` order
    pub fn compare(&self, start_id: NodeId, end_id: NodeId) -> Vec<(Algorithm, FindPathResponse)> {
        Algorithm::ALL
            .iter()
            .map(|algorithm| {
                let request = FindPathRequest::new(start_id, end_id, algorithm.key());
                (*algorithm, self.respond(&request))
            })
            .collect()
    }

    fn path_found(&self, result: PathResult) -> PathFound {
        // ids come from a snapshot of this dataset
        let path = result.path
            .iter()
            .filter_map(|id| self.dataset.node(*id))
            .map(NodeRef::from)
            .collect();

        PathFound {
            success: true,
            path,
            path_ids: result.path,
            distance: result.distance,
            nodes_explored: result.nodes_explored,
            execution_time: result.execution_time_ms,
            algorithm: result.algorithm.display_name().to_string(),
        }
    }
}
