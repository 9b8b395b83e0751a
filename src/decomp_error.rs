//! DecompError: unified error type for mesh-decomp public APIs
//!
//! This error type is used throughout the mesh-decomp library to provide
//! robust, non-panicking error handling for all public APIs. Variants fall
//! into two families: configuration errors caused by caller input, and
//! invariant violations that indicate a defect inside the engine itself.

use crate::mesh::ids::{ElementId, Rank};
use thiserror::Error;

/// Unified error type for mesh-decomp operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecompError {
    /// A partition target count below one was requested.
    #[error("invalid number of partitions: {0} (must be >= 1)")]
    InvalidPartCount(usize),
    /// A co-location group named an element the mesh does not contain.
    #[error("cluster group references unknown element {0}")]
    UnknownElement(ElementId),
    /// A co-location group named an element that has been refined away.
    #[error("cluster group references inactive element {0}")]
    InactiveElement(ElementId),
    /// An element was named by more than one co-location group entry.
    #[error("element {0} appears in more than one cluster group")]
    DuplicateGroupElement(ElementId),
    /// An active element had no cluster mapping when one was required.
    #[error("element {0} has no cluster mapping")]
    MissingCluster(ElementId),
    /// The strategy returned an assignment of the wrong length.
    #[error("strategy returned {got} cluster assignments, expected {expected}")]
    AssignmentLengthMismatch { expected: usize, got: usize },
    /// The strategy assigned a rank outside the requested partition range.
    #[error("strategy assigned rank {rank} outside 0..{n_parts}")]
    RankOutOfRange { rank: Rank, n_parts: usize },
}

impl DecompError {
    /// True for errors caused by caller-supplied input; false for internal
    /// invariant violations.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DecompError::InvalidPartCount(_)
                | DecompError::UnknownElement(_)
                | DecompError::InactiveElement(_)
                | DecompError::DuplicateGroupElement(_)
        )
    }
}
