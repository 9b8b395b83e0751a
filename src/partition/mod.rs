//! Entry-point for deterministic mesh domain decomposition.
//!
//! The pipeline per call: [`cluster::ClusterStore`] builds the flat
//! decomposition and merges caller groups, [`neighbors`] coarsens it into a
//! [`graph::ClusterGraph`], a [`strategy::PartitionStrategy`] places each
//! cluster on a rank, and [`assign`] derives node ownership and halo
//! locality. [`partitioner::Partitioner`] ties the stages together as one
//! all-or-nothing transaction.

pub mod assign;
pub mod cluster;
pub mod graph;
pub mod metrics;
pub mod neighbors;
pub mod partitioner;
pub mod strategy;

pub use assign::set_node_processor_ids;
pub use cluster::{Cluster, ClusterId, ClusterStore};
pub use graph::ClusterGraph;
pub use metrics::{edge_cut, load_imbalance};
pub use neighbors::{build_cluster_graph, cluster_neighbor_elems};
pub use partitioner::{single_partition, Partitioner};
pub use strategy::{GreedyGrowthStrategy, LinearStrategy, PartitionStrategy};
