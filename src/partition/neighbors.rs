//! Cluster-level neighbor resolution.
//!
//! Computes the deduplicated, deterministic adjacency between clusters that
//! feeds the coarsened graph for the partitioning strategy. Refined face
//! neighbors are replaced by their active descendants connected back through
//! the matching side, so adjacency follows the active mesh surface.

use crate::decomp_error::DecompError;
use crate::mesh::ids::ElementId;
use crate::mesh::Mesh;
use crate::partition::cluster::{Cluster, ClusterId, ClusterStore};
use crate::partition::graph::ClusterGraph;
use hashbrown::HashSet;
use std::collections::BTreeSet;

/// The elements face-adjacent to `cluster`, one representative per distinct
/// neighboring cluster, strictly ascending by element id.
///
/// An inactive face neighbor contributes the active descendants whose
/// matching side faces the querying element. Members of `cluster` itself are
/// never returned. Identical on every process for identical inputs.
pub fn cluster_neighbor_elems<M: Mesh>(
    mesh: &M,
    store: &ClusterStore,
    cluster: &Cluster,
) -> Result<Vec<ElementId>, DecompError> {
    let members: HashSet<ElementId> = cluster.elems().iter().copied().collect();

    // Ordered so every process walks candidates identically.
    let mut adjacent: BTreeSet<ElementId> = BTreeSet::new();
    for &elem in cluster.elems() {
        for side in 0..mesh.n_sides(elem) {
            let Some(nbr) = mesh.neighbor(elem, side) else {
                continue;
            };
            if members.contains(&nbr) {
                continue;
            }
            if mesh.is_active(nbr) {
                adjacent.insert(nbr);
            } else {
                // The neighbor has been refined; take its active descendants
                // still face-connected to us through the side facing back.
                let Some(ns) = mesh.side_of(nbr, elem) else {
                    continue;
                };
                for child in mesh.active_family(nbr) {
                    if mesh.neighbor(child, ns) == Some(elem) && !members.contains(&child) {
                        adjacent.insert(child);
                    }
                }
            }
        }
    }

    // Collapse to one representative per neighboring cluster.
    let mut seen: HashSet<ClusterId> = HashSet::new();
    let mut out = Vec::new();
    for elem in adjacent {
        let nbr_cluster = store
            .cluster_of(elem)
            .ok_or(DecompError::MissingCluster(elem))?;
        if seen.insert(nbr_cluster.id()) {
            out.push(elem);
        }
    }
    Ok(out)
}

/// Assemble the coarsened CSR graph over the store's clusters.
pub fn build_cluster_graph<M: Mesh>(
    mesh: &M,
    store: &ClusterStore,
) -> Result<ClusterGraph, DecompError> {
    let k = store.len();
    let mut xadj = Vec::with_capacity(k + 1);
    let mut adjncy = Vec::new();
    let mut vwgt = Vec::with_capacity(k);
    let mut rep_elem = Vec::with_capacity(k);
    xadj.push(0);
    for cluster in store.iter() {
        for elem in cluster_neighbor_elems(mesh, store, cluster)? {
            let nbr = store
                .cluster_of(elem)
                .ok_or(DecompError::MissingCluster(elem))?;
            adjncy.push(nbr.id());
        }
        xadj.push(adjncy.len());
        vwgt.push(cluster.weight() as i32);
        rep_elem.push(cluster.min_elem());
    }
    Ok(ClusterGraph {
        xadj,
        adjncy,
        vwgt,
        rep_elem,
    })
}
