use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::graph::{Graph, Node, NodeId, Edge};


/// Node and edge records as stored, the authoritative source for snapshots
///
/// JSON layout:
/// `{"nodes": [{"id", "name", "latitude", "longitude", "description"}],
///   "edges": [{"from_id", "to_id", "weight"}]}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Dataset {

    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dataset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes ordered by name, as listings present them
    pub fn nodes_by_name(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.iter().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        nodes
    }

    /// Fresh snapshot of the current records
    pub fn snapshot(&self) -> Result<Graph> {
        Graph::build(self.nodes.iter().cloned(), self.edges.iter().copied())
    }
}
