//! Strong id handles for mesh entities.
//!
//! Elements and nodes are referred to by stable, dense-ish integer ids
//! assigned by the mesh. `ElementId` and `NodeId` wrap a `u64` so the two id
//! spaces cannot be mixed up; 0 is a valid id in both (flat cluster numbering
//! seeds from raw element ids, which start at zero).
//!
//! This module provides:
//! - Transparent newtypes with the same layout as `u64`.
//! - `index()` accessors for table lookups keyed by id.
//! - Common trait implementations (`Debug`, `Display`, ordering, hashing,
//!   serde) so ids can be used in maps, sets, and printed easily.

use std::fmt;

/// A cooperating process's partition index.
pub type Rank = usize;

/// Stable identifier of a mesh element.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an `ElementId` from a raw `u64` value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        ElementId(raw)
    }

    /// Returns the inner `u64` value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id as a table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementId").field(&self.0).finish()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a mesh node.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a `NodeId` from a raw `u64` value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        NodeId(raw)
    }

    /// Returns the inner `u64` value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the id as a table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.0).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
