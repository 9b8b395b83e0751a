//! Pluggable partitioning strategies.
//!
//! A strategy maps the coarsened cluster graph to a rank per cluster. The
//! engine validates the returned assignment (length and rank range) before
//! committing anything to the mesh, so strategies stay focused on placement.
//!
//! Both built-ins are fully deterministic: no RNG, ties broken by lowest id.
//! Cooperating processes invoke them redundantly and must arrive at the
//! identical result.

use crate::decomp_error::DecompError;
use crate::mesh::ids::Rank;
use crate::partition::graph::ClusterGraph;
use std::collections::BTreeSet;

/// Computes a rank per cluster from the coarsened graph.
pub trait PartitionStrategy {
    /// Full partitioning from scratch.
    fn do_partition(
        &mut self,
        graph: &ClusterGraph,
        n_parts: usize,
    ) -> Result<Vec<Rank>, DecompError>;

    /// Incremental partitioning. `prior[i]` is cluster `i`'s existing rank,
    /// if any; strategies may use it to minimize migration. The default
    /// ignores it and partitions from scratch.
    fn do_repartition(
        &mut self,
        graph: &ClusterGraph,
        n_parts: usize,
        prior: &[Option<Rank>],
    ) -> Result<Vec<Rank>, DecompError> {
        let _ = prior;
        self.do_partition(graph, n_parts)
    }
}

/// Weight-balanced contiguous blocks over the dense cluster order.
///
/// Ignores adjacency entirely; useful as a cheap baseline and for meshes
/// whose element numbering is already locality-preserving.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearStrategy;

impl PartitionStrategy for LinearStrategy {
    fn do_partition(
        &mut self,
        graph: &ClusterGraph,
        n_parts: usize,
    ) -> Result<Vec<Rank>, DecompError> {
        if n_parts < 1 {
            return Err(DecompError::InvalidPartCount(n_parts));
        }
        let k = graph.n_vertices();
        let mut out = vec![0; k];
        let mut remaining = graph.total_weight();
        let mut v = 0;
        for p in 0..n_parts {
            if v == k {
                break;
            }
            let parts_left = (n_parts - p) as i64;
            let target = (remaining + parts_left - 1) / parts_left;
            let mut load = 0i64;
            while v < k {
                if p + 1 < n_parts && load >= target {
                    break;
                }
                out[v] = p;
                load += graph.weight(v);
                v += 1;
            }
            remaining -= load;
        }
        Ok(out)
    }
}

/// Greedy region growing over the cluster graph.
///
/// Each part grows breadth-first from the lowest-id unassigned cluster until
/// it reaches its share of the remaining weight; the last part absorbs the
/// rest. The frontier is an ordered set, so growth order is a pure function
/// of the graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyGrowthStrategy;

impl PartitionStrategy for GreedyGrowthStrategy {
    fn do_partition(
        &mut self,
        graph: &ClusterGraph,
        n_parts: usize,
    ) -> Result<Vec<Rank>, DecompError> {
        if n_parts < 1 {
            return Err(DecompError::InvalidPartCount(n_parts));
        }
        let k = graph.n_vertices();
        let mut part: Vec<Option<Rank>> = vec![None; k];
        let mut remaining = graph.total_weight();
        let mut next_seed = 0usize;
        for p in 0..n_parts {
            while next_seed < k && part[next_seed].is_some() {
                next_seed += 1;
            }
            if next_seed == k {
                break;
            }
            let parts_left = (n_parts - p) as i64;
            let target = (remaining + parts_left - 1) / parts_left;
            let mut frontier = BTreeSet::from([next_seed]);
            let mut load = 0i64;
            while let Some(v) = frontier.pop_first() {
                if part[v].is_some() {
                    continue;
                }
                part[v] = Some(p);
                load += graph.weight(v);
                if p + 1 < n_parts && load >= target {
                    break;
                }
                for &nb in graph.neighbors(v) {
                    if part[nb].is_none() {
                        frontier.insert(nb);
                    }
                }
                if frontier.is_empty() {
                    // Disconnected remainder: jump to the next unassigned
                    // cluster so the part still reaches its target.
                    while next_seed < k && part[next_seed].is_some() {
                        next_seed += 1;
                    }
                    if next_seed < k {
                        frontier.insert(next_seed);
                    }
                }
            }
            remaining -= load;
        }
        Ok(part
            .into_iter()
            .map(|p| p.unwrap_or(n_parts - 1))
            .collect())
    }

    /// Keep valid prior assignments; place the rest next to an assigned
    /// neighbor when balance allows, otherwise on the least-loaded part.
    fn do_repartition(
        &mut self,
        graph: &ClusterGraph,
        n_parts: usize,
        prior: &[Option<Rank>],
    ) -> Result<Vec<Rank>, DecompError> {
        if n_parts < 1 {
            return Err(DecompError::InvalidPartCount(n_parts));
        }
        let k = graph.n_vertices();
        if prior.len() != k {
            return Err(DecompError::AssignmentLengthMismatch {
                expected: k,
                got: prior.len(),
            });
        }
        if prior.iter().all(|r| r.is_none()) {
            return self.do_partition(graph, n_parts);
        }
        let mut part: Vec<Option<Rank>> =
            prior.iter().map(|r| r.filter(|&p| p < n_parts)).collect();
        let mut loads = vec![0i64; n_parts];
        for v in 0..k {
            if let Some(p) = part[v] {
                loads[p] += graph.weight(v);
            }
        }
        for v in 0..k {
            if part[v].is_some() {
                continue;
            }
            let nbr_parts: BTreeSet<Rank> = graph
                .neighbors(v)
                .iter()
                .filter_map(|&nb| part[nb])
                .collect();
            let p = nbr_parts
                .iter()
                .copied()
                .min_by_key(|&p| (loads[p], p))
                .unwrap_or_else(|| {
                    (0..n_parts).min_by_key(|&p| (loads[p], p)).unwrap_or(0)
                });
            part[v] = Some(p);
            loads[p] += graph.weight(v);
        }
        Ok(part.into_iter().map(|p| p.unwrap_or(0)).collect())
    }
}
