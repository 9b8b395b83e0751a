//! Node ownership and halo locality assignment.
//!
//! After elements carry their ranks, nodes take the minimum rank of their
//! incident elements (lowest rank wins shared boundary nodes), and locality
//! flags are computed: an element is local when it is owned, owns a node on
//! the local rank, or face-neighbors an element that does. That closure is
//! the one-element halo ring finite-volume stencils read without further
//! communication.

use crate::mesh::ids::{ElementId, NodeId, Rank};
use crate::mesh::Mesh;
use hashbrown::HashSet;

/// Recompute every node's rank and every element/node locality flag.
///
/// `local_rank` is the calling process's partition index, passed explicitly;
/// the engine never consults ambient process state.
pub fn set_node_processor_ids<M: Mesh>(mesh: &mut M, local_rank: Rank) {
    // Unset any previously-set node ranks, maybe from prior partitionings.
    let node_ids: Vec<NodeId> = mesh.nodes().collect();
    for &node in &node_ids {
        mesh.set_node_rank(node, None);
        mesh.set_node_on_local(node, false);
    }

    // Each node takes the minimum rank over its incident elements.
    let elem_ids: Vec<ElementId> = mesh.elems().collect();
    for &elem in &elem_ids {
        mesh.set_elem_on_local(elem, false);
        let Some(rank) = mesh.elem_rank(elem) else {
            continue;
        };
        let nodes = mesh.elem_nodes(elem).to_vec();
        for node in nodes {
            let merged = mesh.node_rank(node).map_or(rank, |cur| cur.min(rank));
            mesh.set_node_rank(node, Some(merged));
        }
    }

    // Elements with at least one node owned by the local rank.
    let mut has_local_node: HashSet<ElementId> = HashSet::new();
    for &elem in &elem_ids {
        if mesh
            .elem_nodes(elem)
            .iter()
            .any(|&node| mesh.node_rank(node) == Some(local_rank))
        {
            has_local_node.insert(elem);
        }
    }

    // An element is local if it is owned, owns a local node, or has a face
    // neighbor that does; local elements pull all their nodes into the halo.
    let mut n_local = 0usize;
    for &elem in &elem_ids {
        let local = mesh.elem_rank(elem) == Some(local_rank)
            || has_local_node.contains(&elem)
            || (0..mesh.n_sides(elem)).any(|side| {
                mesh.neighbor(elem, side).is_some_and(|nbr| {
                    mesh.elem_rank(nbr) == Some(local_rank) || has_local_node.contains(&nbr)
                })
            });
        if local {
            n_local += 1;
            mesh.set_elem_on_local(elem, true);
            for node in mesh.elem_nodes(elem).to_vec() {
                mesh.set_node_on_local(node, true);
            }
        }
    }
    log::trace!(
        "rank {}: {} of {} elements on_local",
        local_rank,
        n_local,
        elem_ids.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::in_memory::InMemoryMesh;

    fn e(i: u64) -> ElementId {
        ElementId::new(i)
    }

    fn v(i: u64) -> NodeId {
        NodeId::new(i)
    }

    /// Chain of 4 with ranks 0,0,1,1.
    fn two_part_chain() -> InMemoryMesh {
        let mut mesh = InMemoryMesh::chain(4);
        for i in 0..4u64 {
            mesh.set_elem_rank(e(i), Some((i >= 2) as usize));
        }
        mesh
    }

    #[test]
    fn shared_nodes_take_minimum_rank() {
        let mut mesh = two_part_chain();
        set_node_processor_ids(&mut mesh, 0);
        // Node 2 sits between elements 1 (rank 0) and 2 (rank 1).
        assert_eq!(mesh.node_rank(v(2)), Some(0));
        assert_eq!(mesh.node_rank(v(0)), Some(0));
        assert_eq!(mesh.node_rank(v(4)), Some(1));
    }

    #[test]
    fn stale_node_state_is_reset() {
        let mut mesh = two_part_chain();
        mesh.set_node_rank(v(4), Some(0));
        mesh.set_node_on_local(v(4), true);
        set_node_processor_ids(&mut mesh, 1);
        assert_eq!(mesh.node_rank(v(4)), Some(1));
    }

    #[test]
    fn halo_ring_on_rank_one() {
        let mut mesh = two_part_chain();
        set_node_processor_ids(&mut mesh, 1);
        // Owned: 2,3. Element 1 face-neighbors 2; element 0 has neither a
        // local node (all its node ranks are 0) nor a local neighbor.
        assert!(mesh.elem_on_local(e(2)));
        assert!(mesh.elem_on_local(e(3)));
        assert!(mesh.elem_on_local(e(1)));
        assert!(!mesh.elem_on_local(e(0)));
        // Local elements pull all their nodes into the halo.
        for node in [v(1), v(2), v(3), v(4)] {
            assert!(mesh.node_on_local(node));
        }
        assert!(!mesh.node_on_local(v(0)));
    }

    #[test]
    fn unassigned_elements_never_win_nodes() {
        let mut mesh = InMemoryMesh::chain(2);
        mesh.set_elem_rank(e(0), Some(1));
        // Element 1 stays unassigned (e.g. a refined-away parent).
        set_node_processor_ids(&mut mesh, 1);
        assert_eq!(mesh.node_rank(v(1)), Some(1));
        assert_eq!(mesh.node_rank(v(2)), None);
    }
}
