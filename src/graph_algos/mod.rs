pub mod traversal;
pub mod dijkstra;
pub mod a_star;
mod shortest_path;

pub use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

use std::cmp::Ordering;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the best known cost to reach this node from the start
/// A node missing from the map has not been reached, its cost is infinite
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;

/// Parent index of the start node
pub(crate) const NO_PARENT: usize = usize::MAX;


/// What a search leaves behind once it stops
#[derive(Debug)]
pub struct Expansion<N, C> {
    /// Every node reached, with its parent and best cost
    pub node_map: GraphNodeMap<N, C>,
    /// Index of the goal in node_map, None when the frontier ran dry
    pub goal_index: Option<usize>,
    /// Number of pops from the frontier, repeated pops included
    pub nodes_explored: usize,
}

impl<N: Clone, C: Copy> Expansion<N, C> {

    /// Ordered path from start to goal, None if the goal was not reached
    pub fn path(&self) -> Option<Vec<N>> {
        shortest_path(&self.node_map, self.goal_index?)
    }

    /// Cost recorded for the goal
    pub fn goal_cost(&self) -> Option<C> {
        self.node_map
            .get_index(self.goal_index?)
            .map(|(_, &(_, cost))| cost)
    }
}


/// Priority queue entry shared by Dijkstra and A*
/// BinaryHeap is a max-heap, ordering is reversed so the lowest priority pops first.
/// Equal priorities pop the smaller node first, which keeps runs reproducible.
#[derive(Debug)]
pub(crate) struct QueueEntry<N, C> {
    pub priority: C,
    pub node: N,
    pub index: usize, // index in the node map
}

impl<N: Ord, C: Ord> Ord for QueueEntry<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}
impl<N: Ord, C: Ord> PartialOrd for QueueEntry<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<N: Ord, C: Ord> PartialEq for QueueEntry<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<N: Ord, C: Ord> Eq for QueueEntry<N, C> {}
