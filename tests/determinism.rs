//! The correctness property of the whole engine: cooperating processes run
//! it redundantly on replicated state and must agree bit-for-bit, with no
//! broadcast step.

use mesh_decomp::prelude::*;
use proptest::prelude::*;

fn e(i: u64) -> ElementId {
    ElementId::new(i)
}

/// Consecutive chunks of `group_len` elements become co-location groups;
/// `group_len < 2` means no groups.
fn chunk_groups(n_elems: usize, group_len: usize) -> Option<Vec<Vec<ElementId>>> {
    if group_len < 2 || n_elems < group_len {
        return None;
    }
    let groups: Vec<Vec<ElementId>> = (0..n_elems / group_len)
        .map(|g| {
            (0..group_len)
                .map(|i| e((g * group_len + i) as u64))
                .collect()
        })
        .collect();
    Some(groups)
}

proptest! {
    #[test]
    fn independent_processes_agree(
        n_elems in 1usize..32,
        n_parts in 1usize..5,
        group_len in 0usize..4,
        rank_pick in 0usize..8,
    ) {
        let groups = chunk_groups(n_elems, group_len);
        let local_rank = rank_pick % n_parts;

        let run = || {
            let mut mesh = InMemoryMesh::chain(n_elems);
            let mut partitioner = Partitioner::new(GreedyGrowthStrategy, local_rank);
            partitioner
                .partition(&mut mesh, groups.as_deref(), n_parts)
                .unwrap();
            mesh
        };
        let a = run();
        let b = run();

        for elem in a.elems().collect::<Vec<_>>() {
            prop_assert_eq!(a.elem_rank(elem), b.elem_rank(elem));
            prop_assert_eq!(a.elem_on_local(elem), b.elem_on_local(elem));
            let rank = a.elem_rank(elem).unwrap();
            prop_assert!(rank < n_parts);
        }
        for node in a.nodes().collect::<Vec<_>>() {
            prop_assert_eq!(a.node_rank(node), b.node_rank(node));
            prop_assert_eq!(a.node_on_local(node), b.node_on_local(node));
        }
    }

    #[test]
    fn node_ranks_are_incident_minimum(
        n_elems in 1usize..32,
        n_parts in 1usize..5,
    ) {
        let mut mesh = InMemoryMesh::chain(n_elems);
        let mut partitioner = Partitioner::new(GreedyGrowthStrategy, 0);
        partitioner.partition(&mut mesh, None, n_parts).unwrap();
        for i in 0..=n_elems {
            let mut incident = Vec::new();
            if i > 0 {
                incident.push(mesh.elem_rank(e((i - 1) as u64)).unwrap());
            }
            if i < n_elems {
                incident.push(mesh.elem_rank(e(i as u64)).unwrap());
            }
            let expected = incident.iter().copied().min().unwrap();
            prop_assert_eq!(mesh.node_rank(NodeId::new(i as u64)), Some(expected));
        }
    }

    #[test]
    fn neighbor_lists_are_sorted_deduplicated_and_external(
        n_elems in 1usize..24,
        group_len in 0usize..4,
    ) {
        let mesh = InMemoryMesh::chain(n_elems);
        let groups = chunk_groups(n_elems, group_len);
        let mut store = ClusterStore::new();
        store.build_flat(&mesh);
        store.merge_groups(&mesh, groups.as_deref()).unwrap();

        for cluster in store.iter() {
            let nbrs = cluster_neighbor_elems(&mesh, &store, cluster).unwrap();
            // Strictly ascending, so also free of duplicates.
            prop_assert!(nbrs.windows(2).all(|w| w[0] < w[1]));
            let mut seen_clusters = Vec::new();
            for nbr in nbrs {
                prop_assert!(!cluster.elems().contains(&nbr));
                let owner = store.cluster_of(nbr).unwrap().id();
                prop_assert_ne!(owner, cluster.id());
                prop_assert!(!seen_clusters.contains(&owner));
                seen_clusters.push(owner);
            }
        }
    }

    #[test]
    fn repeated_calls_leave_no_residue(
        n_elems in 1usize..24,
        first_parts in 1usize..5,
        second_parts in 1usize..5,
    ) {
        let mut twice = InMemoryMesh::chain(n_elems);
        let mut partitioner = Partitioner::new(GreedyGrowthStrategy, 0);
        partitioner.partition(&mut twice, None, first_parts).unwrap();
        partitioner.partition(&mut twice, None, second_parts).unwrap();

        let mut once = InMemoryMesh::chain(n_elems);
        let mut fresh = Partitioner::new(GreedyGrowthStrategy, 0);
        fresh.partition(&mut once, None, second_parts).unwrap();

        for elem in once.elems().collect::<Vec<_>>() {
            prop_assert_eq!(twice.elem_rank(elem), once.elem_rank(elem));
        }
        prop_assert_eq!(twice.partition_count(), second_parts);
    }
}
