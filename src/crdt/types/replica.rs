//! Replica identifier type and related functionality.
//!
//! This module contains the definition of ReplicaId, which uniquely identifies
//! each participant in the distributed CRDT system, and the sentinel value the
//! wire format reserves for root identifiers.

/// A unique identifier for each replica (collaborator) in the distributed system.
///
/// Each participant in the collaborative editing system should have a unique replica ID.
/// This ensures that operations from different replicas can be distinguished and ordered.
pub type ReplicaId = u64;

/// Replica value reserved by the wire format to mark a root identifier.
///
/// An encoded identifier whose first varuint equals this value is followed by a
/// root name and type reference instead of a sequence number.
pub const ROOT_REPLICA: ReplicaId = 0xFF_FFFF;

/// Draws a random 32-bit replica ID, never the root sentinel.
pub fn random_replica_id() -> ReplicaId {
    loop {
        let candidate = ReplicaId::from(rand::random::<u32>());
        if candidate != ROOT_REPLICA {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_replica_id_fits_u32() {
        for _ in 0..1_000 {
            let id = random_replica_id();
            assert!(id <= u64::from(u32::MAX));
            assert_ne!(id, ROOT_REPLICA);
        }
    }
}
