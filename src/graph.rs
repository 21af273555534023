use crate::error::{Result, SortError};
use crate::models::Edge;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Outgoing edges and incoming counts, indexed by vertex
#[derive(Debug, Clone)]
struct Adjacency {
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl Adjacency {
    /// Build from the edge list in order, rejecting out-of-range endpoints
    fn build(num_nodes: usize, edges: &[Edge]) -> Result<Self> {
        let mut successors = vec![Vec::new(); num_nodes];
        let mut in_degree = vec![0; num_nodes];

        for (index, edge) in edges.iter().enumerate() {
            if edge.from >= num_nodes || edge.to >= num_nodes {
                warn!(index, from = edge.from, to = edge.to, num_nodes, "rejecting edge");
                return Err(SortError::InvalidEdge {
                    index,
                    from: edge.from,
                    to: edge.to,
                    num_nodes,
                });
            }
            if edge.is_self_loop() {
                debug!(index, vertex = edge.from, "self-loop edge");
            }
            successors[edge.from].push(edge.to);
            in_degree[edge.to] += 1;
        }

        Ok(Self {
            successors,
            in_degree,
        })
    }
}

/// Order the vertices `0..num_nodes` so that every edge points forward.
///
/// Uses Kahn's algorithm with a FIFO ready queue seeded in ascending vertex
/// order, so the result is fully determined by `num_nodes` and the order of
/// `edges`. An empty graph sorts to `Ok(vec![])`; a graph with a cycle
/// (self-loops included) fails with [`SortError::CycleDetected`].
pub fn topological_sort(num_nodes: usize, edges: &[Edge]) -> Result<Vec<usize>> {
    debug!(num_nodes, edges = edges.len(), "topological sort");

    let Adjacency {
        successors,
        mut in_degree,
    } = Adjacency::build(num_nodes, edges)?;

    let mut queue: VecDeque<usize> = (0..num_nodes).filter(|&v| in_degree[v] == 0).collect();
    let mut order: Vec<usize> = Vec::with_capacity(num_nodes);

    while let Some(vertex) = queue.pop_front() {
        order.push(vertex);

        for &next in &successors[vertex] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if order.len() != num_nodes {
        let unresolved = num_nodes - order.len();
        debug!(unresolved, "cycle detected");
        return Err(SortError::CycleDetected { unresolved });
    }

    debug!(num_nodes, "topological sort complete");
    Ok(order)
}

/// Like [`topological_sort`], but a cycle yields an empty order instead of an error
pub fn sort_or_empty(num_nodes: usize, edges: &[Edge]) -> Result<Vec<usize>> {
    match topological_sort(num_nodes, edges) {
        Err(SortError::CycleDetected { .. }) => Ok(Vec::new()),
        other => other,
    }
}

/// Check that `order` holds every vertex exactly once and respects every edge
pub fn is_topological_order(order: &[usize], num_nodes: usize, edges: &[Edge]) -> bool {
    if order.len() != num_nodes {
        return false;
    }

    let mut position: Vec<Option<usize>> = vec![None; num_nodes];
    for (idx, &vertex) in order.iter().enumerate() {
        match position.get_mut(vertex) {
            Some(slot) if slot.is_none() => *slot = Some(idx),
            _ => return false,
        }
    }

    edges.iter().all(|edge| {
        match (
            position.get(edge.from).copied().flatten(),
            position.get(edge.to).copied().flatten(),
        ) {
            (Some(u), Some(v)) => u < v,
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(usize, usize)]) -> Vec<Edge> {
        pairs.iter().copied().map(Edge::from).collect()
    }

    #[test]
    fn test_topological_sort_linear_chain() {
        let e = edges(&[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(topological_sort(4, &e).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_topological_sort_branching() {
        let e = edges(&[(5, 2), (5, 0), (4, 0), (4, 1), (2, 3), (3, 1)]);
        let order = topological_sort(6, &e).unwrap();
        assert!(is_topological_order(&order, 6, &e));
        // 4 and 5 are seeded in index order, then 5's targets in edge order
        assert_eq!(order, vec![4, 5, 2, 0, 3, 1]);
    }

    #[test]
    fn test_fifo_interleaves_components() {
        // Two chains: 0 -> 2 -> 4 and 1 -> 3
        let e = edges(&[(0, 2), (2, 4), (1, 3)]);
        assert_eq!(topological_sort(5, &e).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_neighbor_order_follows_edge_order() {
        let forward = edges(&[(0, 1), (0, 2)]);
        let reversed = edges(&[(0, 2), (0, 1)]);
        assert_eq!(topological_sort(3, &forward).unwrap(), vec![0, 1, 2]);
        assert_eq!(topological_sort(3, &reversed).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(topological_sort(0, &[]).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_no_edges() {
        assert_eq!(topological_sort(5, &[]).unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cycle_detection() {
        let e = edges(&[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(
            topological_sort(3, &e),
            Err(SortError::CycleDetected { unresolved: 3 })
        );
    }

    #[test]
    fn test_partial_cycle_counts_unresolved() {
        // 0 is free, 1 <-> 2 loop, 3 hangs off the loop
        let e = edges(&[(0, 1), (1, 2), (2, 1), (2, 3)]);
        assert_eq!(
            topological_sort(4, &e),
            Err(SortError::CycleDetected { unresolved: 3 })
        );
    }

    #[test]
    fn test_self_loop() {
        let e = edges(&[(0, 1), (1, 1)]);
        assert_eq!(
            topological_sort(2, &e),
            Err(SortError::CycleDetected { unresolved: 1 })
        );
    }

    #[test]
    fn test_duplicate_edges() {
        let e = edges(&[(0, 1), (0, 1), (1, 2), (0, 1)]);
        assert_eq!(topological_sort(3, &e).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_invalid_edge_reports_first_offender() {
        let e = edges(&[(0, 1), (1, 3), (4, 0)]);
        assert_eq!(
            topological_sort(3, &e),
            Err(SortError::InvalidEdge {
                index: 1,
                from: 1,
                to: 3,
                num_nodes: 3,
            })
        );
    }

    #[test]
    fn test_invalid_edge_on_empty_graph() {
        let e = edges(&[(0, 0)]);
        assert!(matches!(
            topological_sort(0, &e),
            Err(SortError::InvalidEdge { index: 0, .. })
        ));
    }

    #[test]
    fn test_sort_or_empty() {
        let cycle = edges(&[(0, 1), (1, 0)]);
        assert_eq!(sort_or_empty(2, &cycle).unwrap(), Vec::<usize>::new());
        assert_eq!(sort_or_empty(2, &[]).unwrap(), vec![0, 1]);
        assert!(sort_or_empty(1, &edges(&[(0, 1)])).is_err());
    }

    #[test]
    fn test_validator_rejects_bad_orders() {
        let e = edges(&[(0, 1), (1, 2)]);
        assert!(is_topological_order(&[0, 1, 2], 3, &e));
        assert!(!is_topological_order(&[1, 0, 2], 3, &e));
        assert!(!is_topological_order(&[0, 1], 3, &e));
        assert!(!is_topological_order(&[0, 1, 1], 3, &e));
        assert!(!is_topological_order(&[0, 1, 5], 3, &e));
        assert!(!is_topological_order(&[0, 1, 2], 3, &edges(&[(0, 9)])));
        assert!(!is_topological_order(&[0], 1, &edges(&[(0, 0)])));
        assert!(is_topological_order(&[], 0, &[]));
    }
}
