use super::{Expansion, GraphNodeMap, QueueEntry, NO_PARENT};

use std::{collections::BinaryHeap, hash::Hash};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// The open list is ordered by f = g + h, where g is the cost from start and
/// h the heuristic estimate to the goal. The heuristic must be admissible
/// (never overestimates the true cost to reach the goal).
///
/// There is no closed list: every pop is expanded, including a node that was
/// popped before. A node whose cost improves after its expansion is expanded
/// again, so the result stays optimal when the heuristic is admissible but not
/// consistent.
pub fn a_star<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Expansion<N, C>
where
    N: Eq + Hash + Ord + Clone,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy,
    H: Fn(&N) -> C, // heuristic function
    G: Fn(&N) -> bool, // node qualifier for goal
{

    // Open List
    // Nodes that need to be evaluated, sorted by f_cost (cost + heuristic)
    let mut open_list: BinaryHeap<QueueEntry<N, C>> = BinaryHeap::new();

    // Best known (parent_index, cost) per reached node, used to find the final path
    // for the start node, parent_index is NO_PARENT
    let mut node_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    let start_f = heuristic_fn(&start);
    let start_index = node_map.insert_full(start.clone(), (NO_PARENT, Zero::zero())).0;
    open_list.push(QueueEntry {
        priority: start_f,
        node: start,
        index: start_index,
    });

    let mut nodes_explored = 0;

    while let Some(QueueEntry { index, .. }) = open_list.pop() {
        nodes_explored += 1;

        // expansion always uses the current best cost, not the one queued
        let Some((node, &(_, cost))) = node_map.get_index(index) else { continue };

        if goal_fn(node) {
            return Expansion { node_map, goal_index: Some(index), nodes_explored };
        }

        for (neighbor, edge_cost) in neighbors(node) {
            // confirmed cost, not heuristic
            let new_cost = cost + edge_cost;

            let neighbor_index = match node_map.entry(neighbor.clone()) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        // We've found a better path to this neighbor
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            let f_cost = new_cost + heuristic_fn(&neighbor);
            open_list.push(QueueEntry {
                priority: f_cost,
                node: neighbor,
                index: neighbor_index,
            });
        }
    }

    Expansion { node_map, goal_index: None, nodes_explored }
}
