//! Route search between two locations of a [`Graph`] snapshot
//!
//! Four strategies share one contract: given a start and an end id they return
//! a [`PathResult`], or `None` when no path connects the two. Each call owns
//! its frontier and bookkeeping, so a snapshot can be searched from many
//! threads at once.

use std::{fmt, str::FromStr, time::Instant};

use ordered_float::OrderedFloat;

use crate::errors::{PathfinderError, Result};
use crate::graph::{heuristic, Graph, NodeId};
use crate::graph_algos::{a_star::a_star, dijkstra::dijkstra, traversal, Expansion};


/// Search strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    #[default]
    Dijkstra,
    AStar,
}

impl Algorithm {

    pub const ALL: [Algorithm; 4] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Dijkstra, Algorithm::AStar];

    /// Name accepted by the dispatcher
    pub fn key(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
        }
    }

    /// Name reported in results
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::AStar => "A*",
        }
    }

    /// BFS and DFS measure distance in edges, the others in summed weight
    pub fn is_weighted(&self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    /// Run this strategy on the snapshot
    pub fn run(&self, graph: &Graph, start: NodeId, end: NodeId) -> Option<PathResult> {
        match self {
            Algorithm::Bfs => breadth_first_search(graph, start, end),
            Algorithm::Dfs => depth_first_search(graph, start, end),
            Algorithm::Dijkstra => dijkstra_search(graph, start, end),
            Algorithm::AStar => a_star_search(graph, start, end),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Algorithm {
    type Err = PathfinderError;

    /// Case-insensitive, one of bfs, dfs, dijkstra, astar
    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" => Ok(Algorithm::AStar),
            _ => Err(PathfinderError::UnknownAlgorithm(name.to_string())),
        }
    }
}


/// Outcome of a successful search
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    /// Node ids from start to end, both included
    pub path: Vec<NodeId>,
    /// Edge count for BFS/DFS, summed weight for Dijkstra/A*
    pub distance: f64,
    /// Pops from the frontier, repeated pops included
    pub nodes_explored: usize,
    /// Wall-clock time of the search in milliseconds
    pub execution_time_ms: f64,
    pub algorithm: Algorithm,
}


/// Find a path with the given strategy
pub fn find_path(graph: &Graph, start: NodeId, end: NodeId, algorithm: Algorithm) -> Option<PathResult> {
    algorithm.run(graph, start, end)
}

/// Find a path with a strategy named at the boundary
/// Fails on a name outside bfs, dfs, dijkstra, astar, never falls back to a default
pub fn find_path_by_name(graph: &Graph, start: NodeId, end: NodeId, algorithm: &str) -> Result<Option<PathResult>> {
    let algorithm: Algorithm = algorithm.parse()?;
    Ok(find_path(graph, start, end, algorithm))
}

/// Run every strategy on the same pair, in `Algorithm::ALL` order
pub fn compare(graph: &Graph, start: NodeId, end: NodeId) -> Vec<(Algorithm, Option<PathResult>)> {
    Algorithm::ALL
        .iter()
        .map(|algorithm| (*algorithm, algorithm.run(graph, start, end)))
        .collect()
}


/// Breadth-first search, fewest edges, weights ignored
pub fn breadth_first_search(graph: &Graph, start: NodeId, end: NodeId) -> Option<PathResult> {
    let started = Instant::now();
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let expansion = traversal::breadth_first(
        start,
        |id| graph.neighbors(*id).iter().map(|n| n.id),
        |id| *id == end,
    );

    finish(expansion, |edges| edges as f64, started, Algorithm::Bfs)
}

/// Depth-first search, first path found in adjacency order
pub fn depth_first_search(graph: &Graph, start: NodeId, end: NodeId) -> Option<PathResult> {
    let started = Instant::now();
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let expansion = traversal::depth_first(
        start,
        |id| graph.neighbors(*id).iter().map(|n| n.id),
        |id| *id == end,
    );

    finish(expansion, |edges| edges as f64, started, Algorithm::Dfs)
}

/// Dijkstra, lowest summed weight
pub fn dijkstra_search(graph: &Graph, start: NodeId, end: NodeId) -> Option<PathResult> {
    let started = Instant::now();
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let expansion = dijkstra(
        start,
        |id| weighted_neighbors(graph, *id),
        |id| *id == end,
    );

    finish(expansion, |cost| cost.into_inner(), started, Algorithm::Dijkstra)
}

/// A*, lowest summed weight guided by great-circle distance to the end
pub fn a_star_search(graph: &Graph, start: NodeId, end: NodeId) -> Option<PathResult> {
    let started = Instant::now();
    let (Some(_), Some(goal)) = (graph.node(start), graph.node(end)) else {
        return None;
    };

    // every reachable id is in the snapshot, the fallback is never hit
    let estimate = |id: &NodeId| {
        OrderedFloat(graph.node(*id).map_or(0.0, |node| heuristic(node, goal)))
    };

    let expansion = a_star(
        start,
        |id| weighted_neighbors(graph, *id),
        estimate,
        |id| *id == end,
    );

    finish(expansion, |cost| cost.into_inner(), started, Algorithm::AStar)
}


fn weighted_neighbors(graph: &Graph, id: NodeId) -> impl Iterator<Item = (NodeId, OrderedFloat<f64>)> + '_ {
    graph.neighbors(id).iter().map(|n| (n.id, OrderedFloat(n.weight)))
}

fn finish<C, D>(expansion: Expansion<NodeId, C>, distance: D, started: Instant, algorithm: Algorithm) -> Option<PathResult>
where
    C: Copy,
    D: Fn(C) -> f64,
{
    let path = expansion.path()?;
    let cost = expansion.goal_cost()?;

    Some(PathResult {
        path,
        distance: distance(cost),
        nodes_explored: expansion.nodes_explored,
        execution_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        algorithm,
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    // A(0,0) - B(0,1) - C(0,2), plus a direct A - C
    fn line_graph() -> Graph {
        let nodes = vec![
            Node::new(1, "A", 0.0, 0.0),
            Node::new(2, "B", 0.0, 1.0),
            Node::new(3, "C", 0.0, 2.0),
        ];
        let edges = vec![Edge::new(1, 2, 1.0), Edge::new(2, 3, 1.0), Edge::new(1, 3, 5.0)];
        Graph::build(nodes, edges).unwrap()
    }

    // A few Dhaka locations with great-circle weights
    fn dhaka_graph() -> Graph {
        let nodes = vec![
            Node::new(1, "Shaheed Minar", 23.7280, 90.3979),
            Node::new(2, "University of Dhaka", 23.7283, 90.3932),
            Node::new(3, "Ramna Park", 23.7384, 90.3939),
            Node::new(4, "Kawran Bazar", 23.7509, 90.3967),
            Node::new(5, "Farmgate", 23.7579, 90.3889),
            Node::new(6, "Motijheel", 23.7337, 90.4166),
            Node::new(7, "Hatirjheel", 23.7520, 90.4202),
            Node::new(8, "Tejgaon", 23.7636, 90.3926),
        ];
        let pairs = [(1, 2), (2, 3), (3, 4), (4, 5), (5, 8), (1, 6), (6, 7), (7, 8), (3, 6), (4, 7)];
        let edges: Vec<Edge> = pairs
            .iter()
            .map(|&(a, b)| Edge::geographic(&nodes[a - 1], &nodes[b - 1]))
            .collect();
        Graph::build(nodes, edges).unwrap()
    }

    #[test]
    fn test_dijkstra_prefers_lighter_detour() {
        let result = find_path(&line_graph(), 1, 3, Algorithm::Dijkstra).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.distance, 2.0);
        assert_eq!(result.algorithm, Algorithm::Dijkstra);
    }

    #[test]
    fn test_bfs_counts_edges() {
        // the direct edge is one hop, whatever its weight
        let result = find_path(&line_graph(), 1, 3, Algorithm::Bfs).unwrap();
        assert_eq!(result.path, vec![1, 3]);
        assert_eq!(result.distance, 1.0);
    }

    #[test]
    fn test_bfs_two_hops_without_direct_edge() {
        let nodes = vec![
            Node::new(1, "A", 0.0, 0.0),
            Node::new(2, "B", 0.0, 1.0),
            Node::new(3, "C", 0.0, 2.0),
        ];
        let graph = Graph::build(nodes, vec![Edge::new(1, 2, 1.0), Edge::new(2, 3, 1.0)]).unwrap();

        let result = find_path(&graph, 1, 3, Algorithm::Bfs).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.distance, 2.0);
        assert_eq!(result.nodes_explored, 3);
    }

    #[test]
    fn test_dfs_follows_adjacency_order() {
        // 1's neighbors are [2, 3]; 3 is pushed last and popped first
        let result = find_path(&line_graph(), 1, 3, Algorithm::Dfs).unwrap();
        assert_eq!(result.path, vec![1, 3]);
        assert_eq!(result.distance, 1.0);
        assert_eq!(result.nodes_explored, 2);
    }

    #[test]
    fn test_astar_needs_geographic_weights() {
        // unit weights are far below the ~111 km per degree estimate, the
        // heuristic overestimates and A* settles for the direct edge
        let result = find_path(&line_graph(), 1, 3, Algorithm::AStar).unwrap();
        assert_eq!(result.path, vec![1, 3]);
        assert_eq!(result.distance, 5.0);
    }

    #[test]
    fn test_astar_matches_dijkstra_on_geographic_graph() {
        let graph = dhaka_graph();
        for start in 1..=8 {
            for end in 1..=8 {
                let d = find_path(&graph, start, end, Algorithm::Dijkstra).unwrap();
                let a = find_path(&graph, start, end, Algorithm::AStar).unwrap();
                assert!((d.distance - a.distance).abs() < 1e-9, "{start} -> {end}");
                assert_eq!(a.path.first(), Some(&start));
                assert_eq!(a.path.last(), Some(&end));
            }
        }
    }

    #[test]
    fn test_start_equals_end() {
        let graph = line_graph();
        for algorithm in Algorithm::ALL {
            let result = find_path(&graph, 2, 2, algorithm).unwrap();
            assert_eq!(result.path, vec![2]);
            assert_eq!(result.distance, 0.0);
            assert_eq!(result.nodes_explored, 1);
        }
    }

    #[test]
    fn test_disconnected_nodes_are_not_found() {
        let nodes = vec![
            Node::new(1, "A", 0.0, 0.0),
            Node::new(2, "B", 0.0, 1.0),
            Node::new(3, "C", 5.0, 5.0),
        ];
        let graph = Graph::build(nodes, vec![Edge::new(1, 2, 1.0)]).unwrap();

        for algorithm in Algorithm::ALL {
            assert_eq!(find_path(&graph, 1, 3, algorithm), None);
        }
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let graph = line_graph();
        for algorithm in Algorithm::ALL {
            assert_eq!(find_path(&graph, 99, 1, algorithm), None);
            assert_eq!(find_path(&graph, 1, 99, algorithm), None);
            assert_eq!(find_path(&graph, 99, 99, algorithm), None);
        }
    }

    #[test]
    fn test_self_loop_never_improves() {
        let nodes = vec![Node::new(1, "A", 0.0, 0.0), Node::new(2, "B", 0.0, 1.0)];
        let edges = vec![Edge::new(1, 1, 0.0), Edge::new(1, 2, 3.0)];
        let graph = Graph::build(nodes, edges).unwrap();

        for algorithm in Algorithm::ALL {
            let result = find_path(&graph, 1, 2, algorithm).unwrap();
            assert_eq!(result.path, vec![1, 2]);
        }
    }

    #[test]
    fn test_algorithm_names_are_case_insensitive() {
        assert_eq!("BFS".parse::<Algorithm>().unwrap(), Algorithm::Bfs);
        assert_eq!("Dfs".parse::<Algorithm>().unwrap(), Algorithm::Dfs);
        assert_eq!("DIJKSTRA".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("AStar".parse::<Algorithm>().unwrap(), Algorithm::AStar);

        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.key().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let graph = line_graph();
        for name in ["a*", "greedy", "", " bfs"] {
            let result = find_path_by_name(&graph, 1, 3, name);
            match result {
                Err(PathfinderError::UnknownAlgorithm(n)) => assert_eq!(n, name),
                other => panic!("expected UnknownAlgorithm for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_find_path_by_name() {
        let result = find_path_by_name(&line_graph(), 1, 3, "Dijkstra").unwrap().unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.algorithm.display_name(), "Dijkstra");
    }

    #[test]
    fn test_compare_runs_every_algorithm() {
        let results = compare(&dhaka_graph(), 2, 7);
        let algorithms: Vec<Algorithm> = results.iter().map(|(a, _)| *a).collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());

        for (algorithm, result) in results {
            let result = result.unwrap();
            assert_eq!(result.algorithm, algorithm);
            assert!(result.execution_time_ms >= 0.0);
        }
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = Algorithm::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(names, vec!["BFS", "DFS", "Dijkstra", "A*"]);
        assert_eq!(Algorithm::default(), Algorithm::Dijkstra);
    }
}
