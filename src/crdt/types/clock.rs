//! Thread-safe per-replica clock for stamping operation ids.
//!
//! This module contains the ReplicaClock struct which hands out ids for a
//! single replica, advancing the sequence by the size of each operation.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::crdt::types::id::Id;
use crate::crdt::types::replica::ReplicaId;

/// A thread-safe clock for generating ids of one replica
#[derive(Debug)]
pub struct ReplicaClock {
    replica: ReplicaId,
    next: AtomicU64,
}

impl ReplicaClock {
    /// Creates a new clock starting at sequence 0
    pub fn new(replica: ReplicaId) -> Self {
        Self::with_origin(replica, 0)
    }

    /// Creates a new clock starting at `origin`
    pub fn with_origin(replica: ReplicaId, origin: u64) -> Self {
        ReplicaClock {
            replica,
            next: AtomicU64::new(origin),
        }
    }

    /// Stamps an operation of `len` units and advances past it.
    ///
    /// The returned id names the first unit; the next call starts at
    /// `sequence + len`.
    ///
    /// # Panics
    ///
    /// Panics if `sequence + len` overflows. Wrapping would reissue ids.
    pub fn tick(&self, len: u64) -> Id {
        debug_assert!(len > 0, "operations have a non-zero size");
        match self
            .next
            .fetch_update(AtomicOrdering::SeqCst, AtomicOrdering::SeqCst, |next| {
                next.checked_add(len)
            }) {
            Ok(sequence) => Id::new(self.replica, sequence),
            Err(next) => panic!(
                "sequence space exhausted for replica {}: {next} + {len} overflows",
                self.replica
            ),
        }
    }

    /// Accounts for an id of this replica seen from elsewhere (e.g. after a
    /// reload), so it is never handed out again. Ids of other replicas are
    /// ignored. Observing `u64::MAX` leaves the clock exhausted.
    pub fn observe(&self, id: &Id) {
        if id.replica == self.replica {
            self.next.fetch_max(id.sequence.saturating_add(1), AtomicOrdering::SeqCst);
        }
    }

    /// Gets the sequence the next tick will stamp
    pub fn current(&self) -> u64 {
        self.next.load(AtomicOrdering::SeqCst)
    }

    /// Gets the replica ID
    pub fn replica(&self) -> ReplicaId {
        self.replica
    }
}
