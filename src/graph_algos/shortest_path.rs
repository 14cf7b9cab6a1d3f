use super::{GraphNodeMap, NO_PARENT};

/// Construct the path from the goal node back to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
/// None if the parent chain is broken
pub fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Option<Vec<N>>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != NO_PARENT {
        let (node, &(parent_index, _)) = node_map.get_index(current_index)?;
        path.push(node.clone());
        current_index = parent_index;

        // a chain longer than the map means a cycle in the parents
        if path.len() > node_map.len() {
            return None;
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    if path.is_empty() {
        return None;
    }

    Some(path)
}
