//! Type definitions for operation identity.
//!
//! This module contains the fundamental types used to name operations and
//! top-level shared types, organized into focused submodules.

pub mod clock;
pub mod id;
pub mod replica;
pub mod root;

pub use clock::ReplicaClock;
pub use id::{Id, ids_equal, make_id};
pub use replica::{ROOT_REPLICA, ReplicaId, random_replica_id};
pub use root::{RootId, TypeKind, WireId};
