//! Mesh collaborator surface consumed by the decomposition engine.
//!
//! The engine does not own element or node storage; it reads topology and
//! writes rank/locality attributes through the [`Mesh`] trait. Simulation
//! codes implement it over their native mesh; [`InMemoryMesh`] is the
//! reference implementation used by the tests and by serial drivers.

pub mod ids;
pub mod in_memory;

pub use ids::{ElementId, NodeId, Rank};
pub use in_memory::InMemoryMesh;

/// Read/write access to the mesh state the decomposition engine consumes.
///
/// Element ids index tables of size [`Mesh::n_elems`]; ids of removed or
/// never-created elements are simply absent. Implementors must iterate
/// elements and nodes in ascending id order; every stage of the engine
/// derives its determinism from that total order.
pub trait Mesh {
    /// Element id capacity: one greater than the largest element id in use.
    fn n_elems(&self) -> usize;

    /// Iterate all elements (active and refined-away parents), ascending.
    fn elems(&self) -> impl Iterator<Item = ElementId> + '_;

    /// Iterate active elements only, ascending.
    fn active_elems(&self) -> impl Iterator<Item = ElementId> + '_;

    /// Iterate all nodes, ascending.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_;

    /// True if the mesh contains an element with this id.
    fn has_elem(&self, elem: ElementId) -> bool;

    /// True if the element exists and has not been refined into children.
    fn is_active(&self, elem: ElementId) -> bool;

    /// The element's incident nodes, in element-local order.
    fn elem_nodes(&self, elem: ElementId) -> &[NodeId];

    /// Number of sides (face slots) of the element.
    fn n_sides(&self, elem: ElementId) -> usize;

    /// The face neighbor across `side`, if any.
    fn neighbor(&self, elem: ElementId, side: usize) -> Option<ElementId>;

    /// The side of `elem` that faces `neighbor`, if they are face-adjacent.
    fn side_of(&self, elem: ElementId, neighbor: ElementId) -> Option<usize> {
        (0..self.n_sides(elem)).find(|&s| self.neighbor(elem, s) == Some(neighbor))
    }

    /// The active descendants of `elem` (the element itself when active).
    ///
    /// Children keep their parent's side numbering, so a child facing the
    /// same direction as its parent reports the same side index.
    fn active_family(&self, elem: ElementId) -> Vec<ElementId>;

    /// The element's processor rank, `None` if unassigned.
    fn elem_rank(&self, elem: ElementId) -> Option<Rank>;

    /// Set or invalidate the element's processor rank.
    fn set_elem_rank(&mut self, elem: ElementId, rank: Option<Rank>);

    /// Whether the element is owned by or in the halo of the local rank.
    fn elem_on_local(&self, elem: ElementId) -> bool;

    /// Set the element's locality flag.
    fn set_elem_on_local(&mut self, elem: ElementId, on_local: bool);

    /// The node's processor rank, `None` if unassigned.
    fn node_rank(&self, node: NodeId) -> Option<Rank>;

    /// Set or invalidate the node's processor rank.
    fn set_node_rank(&mut self, node: NodeId, rank: Option<Rank>);

    /// Whether the node is owned by or in the halo of the local rank.
    fn node_on_local(&self, node: NodeId) -> bool;

    /// Set the node's locality flag.
    fn set_node_on_local(&mut self, node: NodeId, on_local: bool);

    /// The declared number of partitions this mesh is decomposed into.
    fn partition_count(&self) -> usize;

    /// Declare the number of partitions.
    fn set_partition_count(&mut self, n_parts: usize);
}
