//! Cluster store: the per-call decomposition scratch state.
//!
//! A [`Cluster`] is a set of elements forced to share one processor
//! assignment; the [`ClusterStore`] owns the current cluster arena and the
//! element-to-cluster lookup table. Both are rebuilt from scratch at the
//! start of every partitioning call and released before it returns, so peak
//! memory stays O(#active elements) over a simulation's lifetime.
//!
//! The table stores arena indices, not references; superseded clusters are
//! dropped wholesale when the arena is rebuilt.

use crate::decomp_error::DecompError;
use crate::mesh::ids::ElementId;
use crate::mesh::Mesh;
use itertools::Itertools;

/// Dense cluster id, `0..store.len()` after every rebuild.
pub type ClusterId = usize;

/// A group of one or more elements sharing one processor assignment.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: ClusterId,
    elems: Vec<ElementId>,
    grouped: bool,
}

impl Cluster {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Member elements, in the order they were supplied.
    pub fn elems(&self) -> &[ElementId] {
        &self.elems
    }

    /// True if this cluster came from a caller-supplied group rather than
    /// the flat decomposition.
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Partitioning weight: the number of member elements.
    pub fn weight(&self) -> usize {
        self.elems.len()
    }

    /// The minimum member element id; the cluster's deterministic anchor.
    pub fn min_elem(&self) -> ElementId {
        self.elems
            .iter()
            .copied()
            .min()
            .unwrap_or(ElementId::new(u64::MAX))
    }
}

/// Owns the clusters and the element-to-cluster lookup table.
#[derive(Debug, Default)]
pub struct ClusterStore {
    clusters: Vec<Cluster>,
    elem_to_cluster: Vec<Option<u32>>,
}

impl ClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release all clusters and empty the lookup table. Idempotent.
    pub fn clear(&mut self) {
        self.clusters.clear();
        self.elem_to_cluster.clear();
    }

    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterate clusters in dense-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }

    /// The cluster with the given dense id.
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id)
    }

    /// The cluster owning `elem`, if the element is mapped.
    pub fn cluster_of(&self, elem: ElementId) -> Option<&Cluster> {
        let slot = (*self.elem_to_cluster.get(elem.index())?)?;
        self.clusters.get(slot as usize)
    }

    /// Build the flat decomposition: one singleton cluster per active
    /// element, provisional cluster id = element id. After this the table
    /// is total over active element ids.
    pub fn build_flat<M: Mesh>(&mut self, mesh: &M) {
        self.clusters.clear();
        self.elem_to_cluster = vec![None; mesh.n_elems()];
        for elem in mesh.active_elems() {
            let slot = self.clusters.len() as u32;
            self.clusters.push(Cluster {
                id: elem.index(),
                elems: vec![elem],
                grouped: false,
            });
            self.elem_to_cluster[elem.index()] = Some(slot);
        }
        log::trace!("built {} flat clusters", self.clusters.len());
    }

    /// Merge caller-supplied co-location groups into the flat decomposition
    /// and renumber all clusters densely.
    ///
    /// Each group becomes one cluster replacing the named elements'
    /// singletons; elements not named keep their flat cluster. The whole
    /// input is validated before anything is mutated: every named element
    /// must exist, be active, and appear in at most one group. Empty groups
    /// are ignored.
    pub fn merge_groups<M: Mesh>(
        &mut self,
        mesh: &M,
        groups: Option<&[Vec<ElementId>]>,
    ) -> Result<(), DecompError> {
        let Some(groups) = groups.filter(|g| !g.is_empty()) else {
            self.renumber();
            return Ok(());
        };

        if let Some(&dup) = groups.iter().flatten().duplicates().next() {
            return Err(DecompError::DuplicateGroupElement(dup));
        }
        for &elem in groups.iter().flatten() {
            if !mesh.has_elem(elem) {
                return Err(DecompError::UnknownElement(elem));
            }
            if !mesh.is_active(elem) {
                return Err(DecompError::InactiveElement(elem));
            }
            if self
                .elem_to_cluster
                .get(elem.index())
                .copied()
                .flatten()
                .is_none()
            {
                return Err(DecompError::MissingCluster(elem));
            }
        }

        let mut n_merged = 0usize;
        for group in groups.iter().filter(|g| !g.is_empty()) {
            let slot = self.clusters.len() as u32;
            self.clusters.push(Cluster {
                id: slot as ClusterId,
                elems: group.clone(),
                grouped: true,
            });
            for &elem in group {
                self.elem_to_cluster[elem.index()] = Some(slot);
            }
            n_merged += 1;
        }
        self.rebuild();
        log::trace!(
            "merged {} groups, {} clusters after rebuild",
            n_merged,
            self.clusters.len()
        );

        #[cfg(debug_assertions)]
        self.validate(mesh).expect("cluster store invariants violated");
        Ok(())
    }

    /// Rebuild the arena from the lookup table: superseded singletons drop
    /// out, duplicates collapse, and dense ids are reassigned.
    ///
    /// Order is the two-key total order: flat singletons first by element
    /// id, then grouped clusters by minimum member id. Both keys derive
    /// only from replicated input, so every process numbers identically.
    fn rebuild(&mut self) {
        let mut seen = vec![false; self.clusters.len()];
        let mut referenced: Vec<u32> = Vec::new();
        for &slot in self.elem_to_cluster.iter().flatten() {
            if !seen[slot as usize] {
                seen[slot as usize] = true;
                referenced.push(slot);
            }
        }
        referenced.sort_by_key(|&slot| {
            let c = &self.clusters[slot as usize];
            (c.grouped, c.min_elem())
        });

        let mut old: Vec<Option<Cluster>> = std::mem::take(&mut self.clusters)
            .into_iter()
            .map(Some)
            .collect();
        let mut remap: Vec<u32> = vec![0; old.len()];
        let mut fresh = Vec::with_capacity(referenced.len());
        for (new_slot, &old_slot) in referenced.iter().enumerate() {
            remap[old_slot as usize] = new_slot as u32;
            if let Some(mut cluster) = old[old_slot as usize].take() {
                cluster.id = new_slot;
                fresh.push(cluster);
            }
        }
        self.clusters = fresh;
        for entry in self.elem_to_cluster.iter_mut().flatten() {
            *entry = remap[*entry as usize];
        }
    }

    /// Reassign dense ids without reordering; used when no groups merged.
    fn renumber(&mut self) {
        for (i, cluster) in self.clusters.iter_mut().enumerate() {
            cluster.id = i;
        }
    }

    /// Check store invariants: ids dense and positional, clusters
    /// non-empty, every active element mapped to a cluster containing it.
    pub(crate) fn validate<M: Mesh>(&self, mesh: &M) -> Result<(), DecompError> {
        for elem in mesh.active_elems() {
            let cluster = self
                .cluster_of(elem)
                .ok_or(DecompError::MissingCluster(elem))?;
            if !cluster.elems.contains(&elem) {
                return Err(DecompError::MissingCluster(elem));
            }
        }
        Ok(())
    }
}
