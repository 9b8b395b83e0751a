//! Partitioning orchestration.
//!
//! Each call is a complete transaction over replicated mesh state: build the
//! flat decomposition, merge caller groups, hand the coarsened graph to the
//! strategy, validate its answer, and only then write ranks and locality
//! back to the mesh. A failed call leaves the prior assignment fully intact,
//! and cluster scratch state is always released before returning.

use crate::decomp_error::DecompError;
use crate::mesh::ids::{ElementId, NodeId, Rank};
use crate::mesh::Mesh;
use crate::partition::assign::set_node_processor_ids;
use crate::partition::cluster::ClusterStore;
use crate::partition::metrics::{edge_cut, load_imbalance};
use crate::partition::neighbors::build_cluster_graph;
use crate::partition::strategy::PartitionStrategy;

/// Drives partitioning of a mesh with a pluggable strategy.
pub struct Partitioner<S> {
    strategy: S,
    local_rank: Rank,
    store: ClusterStore,
}

impl<S: PartitionStrategy> Partitioner<S> {
    /// `local_rank` is the calling process's partition index; every "is this
    /// mine" comparison in locality marking uses it.
    pub fn new(strategy: S, local_rank: Rank) -> Self {
        Self {
            strategy,
            local_rank,
            store: ClusterStore::new(),
        }
    }

    pub fn local_rank(&self) -> Rank {
        self.local_rank
    }

    /// Partition the mesh into `n_parts` from scratch.
    ///
    /// `groups` optionally names elements that must share a partition; every
    /// group becomes one cluster. Fails without touching the mesh on
    /// `n_parts < 1` or invalid group input.
    pub fn partition<M: Mesh>(
        &mut self,
        mesh: &mut M,
        groups: Option<&[Vec<ElementId>]>,
        n_parts: usize,
    ) -> Result<(), DecompError> {
        self.run(mesh, groups, n_parts, false)
    }

    /// Like [`Partitioner::partition`], but the strategy may start from the
    /// elements' existing ranks to minimize migration.
    pub fn repartition<M: Mesh>(
        &mut self,
        mesh: &mut M,
        groups: Option<&[Vec<ElementId>]>,
        n_parts: usize,
    ) -> Result<(), DecompError> {
        self.run(mesh, groups, n_parts, true)
    }

    fn run<M: Mesh>(
        &mut self,
        mesh: &mut M,
        groups: Option<&[Vec<ElementId>]>,
        n_parts: usize,
        incremental: bool,
    ) -> Result<(), DecompError> {
        let result = self.run_inner(mesh, groups, n_parts, incremental);
        // Cluster memory never outlives the call, on any path.
        self.store.clear();
        result
    }

    fn run_inner<M: Mesh>(
        &mut self,
        mesh: &mut M,
        groups: Option<&[Vec<ElementId>]>,
        n_parts: usize,
        incremental: bool,
    ) -> Result<(), DecompError> {
        if n_parts < 1 {
            return Err(DecompError::InvalidPartCount(n_parts));
        }
        self.store.clear();
        self.store.build_flat(mesh);
        self.store.merge_groups(mesh, groups)?;
        let graph = build_cluster_graph(mesh, &self.store)?;
        log::debug!(
            "partitioning {} clusters into {} parts{}",
            graph.n_vertices(),
            n_parts,
            if incremental { " (incremental)" } else { "" }
        );

        let assignment = if incremental {
            let prior: Vec<Option<Rank>> = graph
                .rep_elem
                .iter()
                .map(|&elem| mesh.elem_rank(elem))
                .collect();
            self.strategy.do_repartition(&graph, n_parts, &prior)?
        } else {
            self.strategy.do_partition(&graph, n_parts)?
        };

        let expected = self.store.len();
        if assignment.len() != expected {
            return Err(DecompError::AssignmentLengthMismatch {
                expected,
                got: assignment.len(),
            });
        }
        if let Some(&rank) = assignment.iter().find(|&&rank| rank >= n_parts) {
            return Err(DecompError::RankOutOfRange { rank, n_parts });
        }
        log::debug!(
            "cluster edge cut {}, load imbalance {:.3}",
            edge_cut(&graph, &assignment),
            load_imbalance(&graph, &assignment, n_parts)
        );

        // Commit; nothing below can fail.
        mesh.set_partition_count(n_parts);
        for (cluster, &rank) in self.store.iter().zip(assignment.iter()) {
            for &elem in cluster.elems() {
                mesh.set_elem_rank(elem, Some(rank));
            }
        }
        self.store.clear();
        set_node_processor_ids(mesh, self.local_rank);
        Ok(())
    }
}

/// Assign the whole mesh to partition 0, everything local.
///
/// Bypasses clustering and the strategy entirely; unconditionally overwrites
/// prior element and node state. Idempotent.
pub fn single_partition<M: Mesh>(mesh: &mut M) {
    let elems: Vec<ElementId> = mesh.elems().collect();
    for elem in elems {
        mesh.set_elem_rank(elem, Some(0));
        mesh.set_elem_on_local(elem, true);
    }
    let nodes: Vec<NodeId> = mesh.nodes().collect();
    for node in nodes {
        mesh.set_node_rank(node, Some(0));
        mesh.set_node_on_local(node, true);
    }
    mesh.set_partition_count(1);
}
