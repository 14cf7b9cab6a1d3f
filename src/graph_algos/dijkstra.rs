use crate::collections::FxHashSet;
use super::{Expansion, GraphNodeMap, QueueEntry, NO_PARENT};

use std::{collections::BinaryHeap, hash::Hash};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};


/// Identify the cheapest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until a popped node meets goal criteria
///
/// Edge costs must be non-negative. A node is finalized the first time it is
/// popped; later pops of the same node are counted as explored and skipped.
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> Expansion<N, C>
where
    N: Eq + Hash + Ord + Clone,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy,
    G: Fn(&N) -> bool, // node qualifier for goal
{

    // Nodes to visit - lowest cost from the start pops first
    let mut nodes_to_visit: BinaryHeap<QueueEntry<N, C>> = BinaryHeap::new();

    // Best known (parent_index, cost) per reached node
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    // Finalized nodes, by index in nodes_map
    let mut visited: FxHashSet<usize> = FxHashSet::default();

    let start_index = nodes_map.insert_full(start.clone(), (NO_PARENT, Zero::zero())).0;
    nodes_to_visit.push(QueueEntry {
        priority: Zero::zero(),
        node: start,
        index: start_index,
    });

    let mut nodes_explored = 0;

    while let Some(QueueEntry { priority: cost, index, .. }) = nodes_to_visit.pop() {
        nodes_explored += 1;

        if !visited.insert(index) {
            continue;
        }

        let Some((node, _)) = nodes_map.get_index(index) else { continue };

        if goal_fn(node) {
            return Expansion { node_map: nodes_map, goal_index: Some(index), nodes_explored };
        }

        for (neighbor, edge_cost) in neighbors(node) {
            let new_cost = cost + edge_cost;

            let neighbor_index = match nodes_map.entry(neighbor.clone()) {
                Vacant(e) => {
                    // first time we see this neighbor
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.push(QueueEntry {
                priority: new_cost,
                node: neighbor,
                index: neighbor_index,
            });
        }
    }

    Expansion { node_map: nodes_map, goal_index: None, nodes_explored }
}
