use mesh_decomp::prelude::*;

fn e(i: u64) -> ElementId {
    ElementId::new(i)
}

fn v(i: u64) -> NodeId {
    NodeId::new(i)
}

#[test]
fn single_partition_overwrites_any_prior_state() {
    let mut mesh = InMemoryMesh::chain(5);
    let mut partitioner = Partitioner::new(LinearStrategy, 1);
    partitioner.partition(&mut mesh, None, 3).unwrap();

    single_partition(&mut mesh);
    for elem in mesh.elems().collect::<Vec<_>>() {
        assert_eq!(mesh.elem_rank(elem), Some(0));
        assert!(mesh.elem_on_local(elem));
    }
    for node in mesh.nodes().collect::<Vec<_>>() {
        assert_eq!(mesh.node_rank(node), Some(0));
        assert!(mesh.node_on_local(node));
    }
    assert_eq!(mesh.partition_count(), 1);
}

#[test]
fn halo_is_one_element_deep() {
    // Chain of 8 split linearly in two: 0..4 on rank 0, 4..8 on rank 1.
    // From rank 1 the halo reaches element 3 (face neighbor of 4) but stops
    // before element 2.
    let mut mesh = InMemoryMesh::chain(8);
    let mut partitioner = Partitioner::new(LinearStrategy, 1);
    partitioner.partition(&mut mesh, None, 2).unwrap();

    assert!(!mesh.elem_on_local(e(0)));
    assert!(!mesh.elem_on_local(e(1)));
    assert!(!mesh.elem_on_local(e(2)));
    assert!(mesh.elem_on_local(e(3)));
    for i in 4..8u64 {
        assert!(mesh.elem_on_local(e(i)));
    }
    // Element 3 is local, so all its nodes are.
    assert!(mesh.node_on_local(v(3)));
    assert!(mesh.node_on_local(v(4)));
    assert!(!mesh.node_on_local(v(2)));
}

#[test]
fn local_elements_satisfy_a_locality_reason() {
    let mut mesh = InMemoryMesh::chain(9);
    let mut partitioner = Partitioner::new(GreedyGrowthStrategy, 1);
    partitioner.partition(&mut mesh, None, 3).unwrap();
    let local_rank = 1;

    let owns_local_node = |mesh: &InMemoryMesh, elem: ElementId| {
        mesh.elem_nodes(elem)
            .iter()
            .any(|&node| mesh.node_rank(node) == Some(local_rank))
    };
    for elem in mesh.elems().collect::<Vec<_>>() {
        if !mesh.elem_on_local(elem) {
            continue;
        }
        let owned = mesh.elem_rank(elem) == Some(local_rank);
        let node_reason = owns_local_node(&mesh, elem);
        let neighbor_reason = (0..mesh.n_sides(elem)).any(|side| {
            mesh.neighbor(elem, side).is_some_and(|nbr| {
                mesh.elem_rank(nbr) == Some(local_rank) || owns_local_node(&mesh, nbr)
            })
        });
        assert!(
            owned || node_reason || neighbor_reason,
            "element {elem} is local without a reason"
        );
        // Closure: a local element pulls all its nodes into the halo.
        for &node in mesh.elem_nodes(elem) {
            assert!(mesh.node_on_local(node));
        }
    }
}

#[test]
fn remote_elements_and_nodes_stay_remote() {
    let mut mesh = InMemoryMesh::chain(12);
    let mut partitioner = Partitioner::new(LinearStrategy, 0);
    partitioner.partition(&mut mesh, None, 3).unwrap();
    // Rank 0 owns 0..4; the far end of the chain is outside its halo.
    assert!(!mesh.elem_on_local(e(11)));
    assert!(!mesh.node_on_local(v(12)));
}
