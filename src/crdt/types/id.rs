//! Operation identifier implementation.
//!
//! This module contains the Id struct which names one operation across the
//! whole system, providing identity, deduplication keys and a deterministic
//! tie-break between concurrent operations.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crdt::types::replica::ReplicaId;

/// A `(replica, sequence)` pair stamped on every operation a replica originates.
///
/// # Ordering
///
/// Ids are ordered first by replica, then by sequence. Two ids from the same
/// replica therefore sort in the order that replica created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id {
    /// The replica that created the operation
    pub replica: ReplicaId,
    /// Position of the operation in its replica's sequence
    pub sequence: u64,
}

impl Id {
    /// Creates a new Id holding both fields verbatim.
    pub fn new(replica: ReplicaId, sequence: u64) -> Self {
        Id { replica, sequence }
    }

    /// Returns true iff both fields match.
    pub fn equals(&self, other: &Id) -> bool {
        self == other
    }

    /// Strict total order: replica first, then sequence.
    pub fn less_than(&self, other: &Id) -> bool {
        self.replica < other.replica
            || (self.replica == other.replica && self.sequence < other.sequence)
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.replica.cmp(&other.replica) {
            Ordering::Equal => self.sequence.cmp(&other.sequence),
            other => other,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.replica, self.sequence)
    }
}

/// Null-safe structural equality for optional ids.
///
/// Two absent ids are equal; an absent id never equals a present one.
pub fn ids_equal(a: Option<&Id>, b: Option<&Id>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b) || a == b,
        (None, None) => true,
        _ => false,
    }
}

/// Convenience constructor, same as [`Id::new`].
pub fn make_id(replica: ReplicaId, sequence: u64) -> Id {
    Id::new(replica, sequence)
}
