//! Coarsened cluster-adjacency graph handed to partitioning strategies.
//
// One vertex per cluster (dense cluster id), an undirected edge between
// clusters whose elements share a face. Returned in CSR triples:
//
// * `xadj[i] .. xadj[i+1]`  = neighbour list of cluster *i*
// * `adjncy`                = concatenated neighbour cluster ids
// * `vwgt[i]`               = vertex weight (cluster element count)
//
// The graph is symmetric and self-free.

use crate::mesh::ids::ElementId;

/// CSR triple plus per-cluster anchors.
#[derive(Debug, Clone)]
pub struct ClusterGraph {
    pub xadj: Vec<usize>,
    pub adjncy: Vec<usize>,
    pub vwgt: Vec<i32>,
    /// Minimum element id of each cluster; the deterministic anchor used to
    /// read prior assignments for incremental repartitioning.
    pub rep_elem: Vec<ElementId>,
}

impl ClusterGraph {
    /// Number of cluster vertices.
    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.vwgt.len()
    }

    /// Return the neighbor slice for cluster `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    /// Weight of cluster `i`.
    #[inline]
    pub fn weight(&self, i: usize) -> i64 {
        self.vwgt[i] as i64
    }

    /// Sum of all cluster weights.
    pub fn total_weight(&self) -> i64 {
        self.vwgt.iter().map(|&w| w as i64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csr_accessors() {
        // Path of three clusters: 0-1-2.
        let g = ClusterGraph {
            xadj: vec![0, 1, 3, 4],
            adjncy: vec![1, 0, 2, 1],
            vwgt: vec![1, 2, 1],
            rep_elem: vec![ElementId::new(0), ElementId::new(1), ElementId::new(3)],
        };
        assert_eq!(g.n_vertices(), 3);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.weight(1), 2);
        assert_eq!(g.total_weight(), 4);
    }
}
