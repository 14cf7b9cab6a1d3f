use super::{Expansion, GraphNodeMap, NO_PARENT};

use std::{collections::VecDeque, hash::Hash};
use indexmap::map::Entry::Vacant;


/// Frontier discipline for uninformed traversal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// FIFO queue
    BreadthFirst,
    /// LIFO stack
    DepthFirst,
}


/// Breadth-First Search
/// https://en.wikipedia.org/wiki/Breadth-first_search
/// Reaches the goal along the fewest edges, edge costs are ignored
pub fn breadth_first<N, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> Expansion<N, usize>
where
    N: Eq + Hash + Clone,
    NN: Fn(&N) -> IT, // returns iterator of neighbors
    IT: IntoIterator<Item = N>,
    G: Fn(&N) -> bool, // node qualifier for goal
{
    traverse(start, neighbors, goal_fn, Order::BreadthFirst)
}


/// Depth-First Search
/// https://en.wikipedia.org/wiki/Depth-first_search
/// Returns the first path found, which depends on neighbor order
pub fn depth_first<N, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> Expansion<N, usize>
where
    N: Eq + Hash + Clone,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = N>,
    G: Fn(&N) -> bool,
{
    traverse(start, neighbors, goal_fn, Order::DepthFirst)
}


/// Walks the graph from start until a popped node meets the goal
/// The cost stored per node is its depth, the number of edges from start.
/// A node is marked as seen when it is pushed, so it enters the frontier once.
pub fn traverse<N, IT, NN, G>(start: N, neighbors: NN, goal_fn: G, order: Order) -> Expansion<N, usize>
where
    N: Eq + Hash + Clone,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = N>,
    G: Fn(&N) -> bool,
{
    // seen nodes with (parent_index, depth)
    let mut node_map: GraphNodeMap<N, usize> = GraphNodeMap::default();
    let start_index = node_map.insert_full(start, (NO_PARENT, 0)).0;

    // frontier holds indices into node_map
    let mut frontier: VecDeque<usize> = VecDeque::from([start_index]);
    let mut nodes_explored = 0;

    loop {
        let next = match order {
            Order::BreadthFirst => frontier.pop_front(),
            Order::DepthFirst => frontier.pop_back(),
        };
        let Some(index) = next else { break };
        nodes_explored += 1;

        let Some((node, &(_, depth))) = node_map.get_index(index) else { continue };

        if goal_fn(node) {
            return Expansion { node_map, goal_index: Some(index), nodes_explored };
        }

        for neighbor in neighbors(node) {
            if let Vacant(e) = node_map.entry(neighbor) {
                frontier.push_back(e.index());
                e.insert((index, depth + 1));
            }
        }
    }

    Expansion { node_map, goal_index: None, nodes_explored }
}
