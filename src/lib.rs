//! # mesh-decomp
//!
//! mesh-decomp is a deterministic domain-decomposition engine for parallel
//! unstructured-mesh simulation codes. It assigns every mesh element, and
//! derivatively every mesh node, to one of N cooperating compute partitions,
//! honouring caller-supplied grouping constraints that force elements to stay
//! co-located, and computes the one-element halo of ghost locality that
//! finite-volume flux and Jacobian stencils need.
//!
//! ## Features
//! - `Mesh` trait abstracting the element/node storage the engine consumes,
//!   with an in-memory reference implementation
//! - Cluster store with flat (one element per cluster) decomposition and
//!   caller-driven merging of co-location groups
//! - Coarsened cluster-adjacency graph in CSR form for pluggable strategies
//! - Built-in deterministic strategies (linear blocks, greedy region growth)
//! - Full and incremental (migration-minimizing) repartitioning
//! - Node ownership by minimum-rank tie-break and halo locality flags
//!
//! ## Determinism
//!
//! Cooperating processes run this engine redundantly on replicated mesh
//! state; there is no broadcast of the result. Every stage therefore
//! iterates in a total order derived only from element ids, and the built-in
//! strategies make no randomized decisions. Given bit-identical mesh state
//! and grouping input, every process computes the identical assignment.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mesh-decomp = "0.2"
//! ```
//!
//! ```rust
//! use mesh_decomp::prelude::*;
//!
//! let mut mesh = InMemoryMesh::chain(8);
//! let mut partitioner = Partitioner::new(GreedyGrowthStrategy, 0);
//! partitioner.partition(&mut mesh, None, 2).unwrap();
//! assert!(mesh.elem_rank(ElementId::new(0)).unwrap() < 2);
//! ```

pub mod decomp_error;
pub mod mesh;
pub mod partition;

pub use decomp_error::DecompError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::decomp_error::DecompError;
    pub use crate::mesh::ids::{ElementId, NodeId, Rank};
    pub use crate::mesh::in_memory::InMemoryMesh;
    pub use crate::mesh::Mesh;
    pub use crate::partition::assign::set_node_processor_ids;
    pub use crate::partition::cluster::{Cluster, ClusterId, ClusterStore};
    pub use crate::partition::graph::ClusterGraph;
    pub use crate::partition::metrics::{edge_cut, load_imbalance};
    pub use crate::partition::neighbors::{build_cluster_graph, cluster_neighbor_elems};
    pub use crate::partition::partitioner::{single_partition, Partitioner};
    pub use crate::partition::strategy::{
        GreedyGrowthStrategy, LinearStrategy, PartitionStrategy,
    };
}
