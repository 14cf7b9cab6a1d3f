use serde::{Deserialize, Serialize};

use crate::collections::FxIndexMap;
use crate::errors::{PathfinderError, Result};
use crate::geometry::LatLng;


/// Stable identifier of a location
pub type NodeId = u64;

/// Weight given to an edge record that does not carry one
pub const DEFAULT_WEIGHT: f64 = 1.0;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}


/// Named location on the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub latitude: f64, // degrees
    pub longitude: f64, // degrees
    #[serde(default)]
    pub description: String,
}

impl Node {

    pub fn new(id: NodeId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn location(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}


/// Stored edge record
/// from/to is only a storage label, the graph traverses it both ways
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from_id: NodeId,
    pub to_id: NodeId,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Edge {

    pub fn new(from_id: NodeId, to_id: NodeId, weight: f64) -> Self {
        Self { from_id, to_id, weight }
    }

    /// Edge with the default weight
    pub fn unweighted(from_id: NodeId, to_id: NodeId) -> Self {
        Self::new(from_id, to_id, DEFAULT_WEIGHT)
    }

    /// Edge weighted by the great-circle distance between its endpoints, in km
    /// Graphs made of these edges keep the A* heuristic admissible
    pub fn geographic(from: &Node, to: &Node) -> Self {
        Self::new(from.id, to.id, heuristic(from, to))
    }
}


/// Adjacency list entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub id: NodeId,
    pub weight: f64,
}


/// Great-circle distance between two nodes in kilometers
/// Used as the A* estimate, symmetric and zero for the same node
pub fn heuristic(a: &Node, b: &Node) -> f64 {
    a.location().distance_km(&b.location())
}


/// Immutable snapshot of the graph used by a search
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FxIndexMap<NodeId, Node>,
    adjacency: FxIndexMap<NodeId, Vec<Neighbor>>,
}

impl Graph {

    /// Build the snapshot from the full node and edge collections
    ///
    /// Every edge (a, b, w) adds (b, w) to a's list and (a, w) to b's list,
    /// self-loops included. Adjacency order follows edge input order.
    /// Edges pointing at unknown nodes and negative or NaN weights are
    /// rejected here rather than when the edge is traversed.
    pub fn build<NI, EI>(nodes: NI, edges: EI) -> Result<Self>
    where
        NI: IntoIterator<Item = Node>,
        EI: IntoIterator<Item = Edge>,
    {
        let mut node_map: FxIndexMap<NodeId, Node> = FxIndexMap::default();
        let mut adjacency: FxIndexMap<NodeId, Vec<Neighbor>> = FxIndexMap::default();

        for node in nodes {
            let id = node.id;
            if node_map.insert(id, node).is_some() {
                return Err(PathfinderError::DuplicateNode(id));
            }
            adjacency.insert(id, Vec::new());
        }

        for Edge { from_id, to_id, weight } in edges {
            for id in [from_id, to_id] {
                if !node_map.contains_key(&id) {
                    return Err(PathfinderError::MissingNode { from: from_id, to: to_id, missing: id });
                }
            }

            if weight.is_nan() || weight < 0.0 {
                return Err(PathfinderError::InvalidWeight { from: from_id, to: to_id, weight });
            }

            // both lookups succeed, every node got a list above
            if let Some(list) = adjacency.get_mut(&from_id) {
                list.push(Neighbor { id: to_id, weight });
            }
            if let Some(list) = adjacency.get_mut(&to_id) {
                list.push(Neighbor { id: from_id, weight });
            }
        }

        Ok(Self { nodes: node_map, adjacency })
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in input order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Neighbors of a node in edge input order, empty for unknown ids
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lightest edge between two nodes, either direction
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbors(a)
            .iter()
            .filter(|n| n.id == b)
            .map(|n| n.weight)
            .reduce(f64::min)
    }

    /// Weighted length of a path using the lightest edge between each pair
    /// None if two consecutive nodes are not adjacent
    pub fn path_weight(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// A* estimate between two ids, None if either is unknown
    pub fn heuristic(&self, a: NodeId, b: NodeId) -> Option<f64> {
        Some(heuristic(self.node(a)?, self.node(b)?))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn line_nodes() -> Vec<Node> {
        vec![
            Node::new(1, "A", 0.0, 0.0),
            Node::new(2, "B", 0.0, 1.0),
            Node::new(3, "C", 0.0, 2.0),
        ]
    }

    #[test]
    fn test_edges_are_materialized_both_ways() {
        let graph = Graph::build(line_nodes(), vec![Edge::new(1, 2, 1.5)]).unwrap();

        assert_eq!(graph.neighbors(1), &[Neighbor { id: 2, weight: 1.5 }]);
        assert_eq!(graph.neighbors(2), &[Neighbor { id: 1, weight: 1.5 }]);
        assert!(graph.neighbors(3).is_empty());
    }

    #[test]
    fn test_adjacency_follows_input_order() {
        let edges = vec![Edge::new(1, 3, 5.0), Edge::new(1, 2, 1.0), Edge::new(2, 3, 1.0)];
        let graph = Graph::build(line_nodes(), edges).unwrap();

        let ids: Vec<NodeId> = graph.neighbors(1).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2]);
        let ids: Vec<NodeId> = graph.neighbors(3).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_self_loop_is_kept() {
        let graph = Graph::build(line_nodes(), vec![Edge::new(2, 2, 0.5)]).unwrap();
        assert_eq!(graph.neighbors(2).len(), 2);
        assert!(graph.neighbors(2).iter().all(|n| n.id == 2));
    }

    #[test]
    fn test_duplicate_edges_are_not_merged() {
        let edges = vec![Edge::new(1, 2, 3.0), Edge::new(2, 1, 2.0)];
        let graph = Graph::build(line_nodes(), edges).unwrap();
        assert_eq!(graph.neighbors(1).len(), 2);
        assert_eq!(graph.edge_weight(1, 2), Some(2.0));
    }

    #[test]
    fn test_missing_node_is_rejected() {
        let result = Graph::build(line_nodes(), vec![Edge::new(1, 9, 1.0)]);
        assert!(matches!(
            result,
            Err(PathfinderError::MissingNode { from: 1, to: 9, missing: 9 })
        ));
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let negative = Graph::build(line_nodes(), vec![Edge::new(1, 2, -1.0)]);
        assert!(matches!(negative, Err(PathfinderError::InvalidWeight { .. })));

        let nan = Graph::build(line_nodes(), vec![Edge::new(1, 2, f64::NAN)]);
        assert!(matches!(nan, Err(PathfinderError::InvalidWeight { .. })));
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let mut nodes = line_nodes();
        nodes.push(Node::new(2, "B again", 1.0, 1.0));
        assert!(matches!(Graph::build(nodes, vec![]), Err(PathfinderError::DuplicateNode(2))));
    }

    #[test]
    fn test_unknown_ids_have_no_neighbors() {
        let graph = Graph::build(line_nodes(), vec![]).unwrap();
        assert!(!graph.contains(42));
        assert!(graph.neighbors(42).is_empty());
        assert_eq!(graph.heuristic(1, 42), None);
    }

    #[test]
    fn test_path_weight() {
        let edges = vec![Edge::new(1, 2, 1.0), Edge::new(2, 3, 2.5)];
        let graph = Graph::build(line_nodes(), edges).unwrap();

        assert_eq!(graph.path_weight(&[1, 2, 3]), Some(3.5));
        assert_eq!(graph.path_weight(&[1]), Some(0.0));
        assert_eq!(graph.path_weight(&[1, 3]), None);
    }

    #[test]
    fn test_geographic_edge_weight_matches_heuristic() {
        let nodes = line_nodes();
        let edge = Edge::geographic(&nodes[0], &nodes[1]);
        assert_eq!(edge.weight, heuristic(&nodes[0], &nodes[1]));
        assert!(edge.weight > 111.0 && edge.weight < 111.4);
    }

    #[test]
    fn test_edge_weight_defaults_when_missing() {
        let edge: Edge = serde_json::from_str(r#"{"from_id": 1, "to_id": 2}"#).unwrap();
        assert_eq!(edge, Edge::new(1, 2, DEFAULT_WEIGHT));
    }

    #[test]
    fn test_heuristic_symmetry() {
        let nodes = line_nodes();
        assert_eq!(heuristic(&nodes[0], &nodes[2]), heuristic(&nodes[2], &nodes[0]));
        assert_eq!(heuristic(&nodes[1], &nodes[1]), 0.0);
    }
}
