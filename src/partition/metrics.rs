//! Partition quality metrics.
//!
//! Evaluate an assignment over the cluster graph: edge cut and load
//! imbalance. Intended for debugging, testing, and CI validation; the
//! partitioner logs both after every commit.

use crate::mesh::ids::Rank;
use crate::partition::graph::ClusterGraph;

/// Number of graph edges whose endpoints land on different ranks (O(E)).
///
/// # Panics
/// Panics if `assignment` is shorter than the graph's vertex count.
pub fn edge_cut(graph: &ClusterGraph, assignment: &[Rank]) -> usize {
    let mut cut = 0;
    for u in 0..graph.n_vertices() {
        for &v in graph.neighbors(u) {
            if u < v && assignment[u] != assignment[v] {
                cut += 1;
            }
        }
    }
    cut
}

/// Ratio of the heaviest part's load to the mean part load; 1.0 is perfect.
///
/// # Panics
/// Panics if `assignment` is shorter than the graph's vertex count or
/// contains a rank `>= n_parts`.
pub fn load_imbalance(graph: &ClusterGraph, assignment: &[Rank], n_parts: usize) -> f64 {
    let total = graph.total_weight();
    if total == 0 || n_parts == 0 {
        return 1.0;
    }
    let mut loads = vec![0i64; n_parts];
    for v in 0..graph.n_vertices() {
        loads[assignment[v]] += graph.weight(v);
    }
    let max = loads.iter().copied().max().unwrap_or(0);
    max as f64 * n_parts as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ids::ElementId;

    fn path_graph(k: usize) -> ClusterGraph {
        let mut xadj = vec![0];
        let mut adjncy = Vec::new();
        for v in 0..k {
            if v > 0 {
                adjncy.push(v - 1);
            }
            if v + 1 < k {
                adjncy.push(v + 1);
            }
            xadj.push(adjncy.len());
        }
        ClusterGraph {
            xadj,
            adjncy,
            vwgt: vec![1; k],
            rep_elem: (0..k).map(|i| ElementId::new(i as u64)).collect(),
        }
    }

    #[test]
    fn edge_cut_path() {
        let g = path_graph(4);
        assert_eq!(edge_cut(&g, &[0, 0, 0, 0]), 0);
        assert_eq!(edge_cut(&g, &[0, 0, 1, 1]), 1);
        assert_eq!(edge_cut(&g, &[0, 1, 0, 1]), 3);
    }

    #[test]
    fn imbalance_even_and_skewed() {
        let g = path_graph(4);
        assert!((load_imbalance(&g, &[0, 0, 1, 1], 2) - 1.0).abs() < 1e-12);
        assert!((load_imbalance(&g, &[0, 0, 0, 1], 2) - 1.5).abs() < 1e-12);
    }
}
