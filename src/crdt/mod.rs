//! Operation identity for the CRDT engine.
//!
//! This module contains the identifier types and their binary wire codec.

pub mod codec;
pub mod types;

// Re-export the main public API
pub use codec::{read_id, read_wire_id, write_id, write_root_id, write_wire_id};
pub use types::{
    Id, ROOT_REPLICA, ReplicaClock, ReplicaId, RootId, TypeKind, WireId, ids_equal, make_id,
    random_replica_id,
};
