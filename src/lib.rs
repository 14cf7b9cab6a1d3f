//! Route search over small geographic graphs
//!
//! Locations ([`graph::Node`]) joined by weighted, undirected edges
//! ([`graph::Edge`]) are turned into an immutable [`graph::Graph`] snapshot,
//! then searched with breadth-first search, depth-first search, Dijkstra or
//! A* guided by great-circle distance.
//!
//! ```
//! use geopath::graph::{Edge, Graph, Node};
//! use geopath::pathfinding::{find_path, Algorithm};
//!
//! let nodes = vec![
//!     Node::new(1, "A", 0.0, 0.0),
//!     Node::new(2, "B", 0.0, 1.0),
//!     Node::new(3, "C", 0.0, 2.0),
//! ];
//! let edges = vec![Edge::new(1, 2, 1.0), Edge::new(2, 3, 1.0), Edge::new(1, 3, 5.0)];
//! let graph = Graph::build(nodes, edges).unwrap();
//!
//! let result = find_path(&graph, 1, 3, Algorithm::Dijkstra).unwrap();
//! assert_eq!(result.path, vec![1, 2, 3]);
//! assert_eq!(result.distance, 2.0);
//! ```

pub mod api;
pub mod collections;
pub mod dataset;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod pathfinding;

pub use errors::{PathfinderError, Result};
pub use graph::{Edge, Graph, Node, NodeId};
pub use pathfinding::{find_path, find_path_by_name, Algorithm, PathResult};
