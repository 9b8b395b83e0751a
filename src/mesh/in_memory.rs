//! In-memory reference implementation of the [`Mesh`] trait.
//!
//! Backs the test suite and serial drivers. Storage is slot-per-id: element
//! records live in a `Vec<Option<_>>` indexed by element id, so absent ids
//! are simply empty slots.

use super::ids::{ElementId, NodeId, Rank};
use super::Mesh;

#[derive(Debug, Clone)]
struct ElemRecord {
    nodes: Vec<NodeId>,
    neighbors: Vec<Option<ElementId>>,
    active: bool,
    children: Vec<ElementId>,
    rank: Option<Rank>,
    on_local: bool,
}

#[derive(Debug, Clone, Default)]
struct NodeRecord {
    rank: Option<Rank>,
    on_local: bool,
}

/// A self-contained mesh with explicit construction helpers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMesh {
    elems: Vec<Option<ElemRecord>>,
    nodes: Vec<NodeRecord>,
    n_parts: usize,
}

impl InMemoryMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u64);
        self.nodes.push(NodeRecord::default());
        id
    }

    /// Append an active element with the given incident nodes and `n_sides`
    /// empty face slots; returns its id.
    pub fn add_elem(&mut self, nodes: &[NodeId], n_sides: usize) -> ElementId {
        let id = ElementId::new(self.elems.len() as u64);
        self.elems.push(Some(ElemRecord {
            nodes: nodes.to_vec(),
            neighbors: vec![None; n_sides],
            active: true,
            children: Vec::new(),
            rank: None,
            on_local: false,
        }));
        id
    }

    /// Point `elem`'s face slot `side` at `neighbor` (one direction only).
    pub fn set_neighbor(&mut self, elem: ElementId, side: usize, neighbor: Option<ElementId>) {
        if let Some(Some(rec)) = self.elems.get_mut(elem.index()) {
            if let Some(slot) = rec.neighbors.get_mut(side) {
                *slot = neighbor;
            }
        }
    }

    /// Make `a` and `b` face neighbors through the given sides.
    pub fn link(&mut self, a: ElementId, side_a: usize, b: ElementId, side_b: usize) {
        self.set_neighbor(a, side_a, Some(b));
        self.set_neighbor(b, side_b, Some(a));
    }

    /// Mark `parent` as refined into `children`. The children must already
    /// exist; their face slots are wired by the caller, keeping the parent's
    /// side numbering.
    pub fn refine(&mut self, parent: ElementId, children: &[ElementId]) {
        if let Some(Some(rec)) = self.elems.get_mut(parent.index()) {
            rec.active = false;
            rec.children = children.to_vec();
        }
    }

    /// A 1-D chain of `n_elems` two-node elements sharing nodes. Side 0 of
    /// each element faces its lower-id neighbor, side 1 the higher-id one.
    pub fn chain(n_elems: usize) -> Self {
        let mut mesh = Self::new();
        let nodes: Vec<NodeId> = (0..=n_elems).map(|_| mesh.add_node()).collect();
        let elems: Vec<ElementId> = (0..n_elems)
            .map(|i| mesh.add_elem(&[nodes[i], nodes[i + 1]], 2))
            .collect();
        for i in 1..n_elems {
            mesh.link(elems[i - 1], 1, elems[i], 0);
        }
        mesh
    }

    fn elem_rec(&self, elem: ElementId) -> Option<&ElemRecord> {
        self.elems.get(elem.index()).and_then(|slot| slot.as_ref())
    }

    fn collect_active_family(&self, elem: ElementId, out: &mut Vec<ElementId>) {
        let Some(rec) = self.elem_rec(elem) else {
            return;
        };
        if rec.active {
            out.push(elem);
        } else {
            for &child in &rec.children {
                self.collect_active_family(child, out);
            }
        }
    }
}

impl Mesh for InMemoryMesh {
    fn n_elems(&self) -> usize {
        self.elems.len()
    }

    fn elems(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elems
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| ElementId::new(i as u64)))
    }

    fn active_elems(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elems.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .filter(|rec| rec.active)
                .map(|_| ElementId::new(i as u64))
        })
    }

    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId::new(i as u64))
    }

    fn has_elem(&self, elem: ElementId) -> bool {
        self.elem_rec(elem).is_some()
    }

    fn is_active(&self, elem: ElementId) -> bool {
        self.elem_rec(elem).is_some_and(|rec| rec.active)
    }

    fn elem_nodes(&self, elem: ElementId) -> &[NodeId] {
        self.elem_rec(elem).map_or(&[], |rec| rec.nodes.as_slice())
    }

    fn n_sides(&self, elem: ElementId) -> usize {
        self.elem_rec(elem).map_or(0, |rec| rec.neighbors.len())
    }

    fn neighbor(&self, elem: ElementId, side: usize) -> Option<ElementId> {
        self.elem_rec(elem)
            .and_then(|rec| rec.neighbors.get(side).copied().flatten())
    }

    fn active_family(&self, elem: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_active_family(elem, &mut out);
        out
    }

    fn elem_rank(&self, elem: ElementId) -> Option<Rank> {
        self.elem_rec(elem).and_then(|rec| rec.rank)
    }

    fn set_elem_rank(&mut self, elem: ElementId, rank: Option<Rank>) {
        if let Some(Some(rec)) = self.elems.get_mut(elem.index()) {
            rec.rank = rank;
        }
    }

    fn elem_on_local(&self, elem: ElementId) -> bool {
        self.elem_rec(elem).is_some_and(|rec| rec.on_local)
    }

    fn set_elem_on_local(&mut self, elem: ElementId, on_local: bool) {
        if let Some(Some(rec)) = self.elems.get_mut(elem.index()) {
            rec.on_local = on_local;
        }
    }

    fn node_rank(&self, node: NodeId) -> Option<Rank> {
        self.nodes.get(node.index()).and_then(|rec| rec.rank)
    }

    fn set_node_rank(&mut self, node: NodeId, rank: Option<Rank>) {
        if let Some(rec) = self.nodes.get_mut(node.index()) {
            rec.rank = rank;
        }
    }

    fn node_on_local(&self, node: NodeId) -> bool {
        self.nodes.get(node.index()).is_some_and(|rec| rec.on_local)
    }

    fn set_node_on_local(&mut self, node: NodeId, on_local: bool) {
        if let Some(rec) = self.nodes.get_mut(node.index()) {
            rec.on_local = on_local;
        }
    }

    fn partition_count(&self) -> usize {
        self.n_parts
    }

    fn set_partition_count(&mut self, n_parts: usize) {
        self.n_parts = n_parts;
    }
}
