//! # crdt-id - Operation identifiers for a replicated document engine
//!
//! Every operation a replica originates is stamped with an [`Id`]: the
//! replica's identifier plus a per-replica sequence number. Ids are totally
//! ordered, hashable for deduplication, and travel on the wire as two
//! unsigned varints.
//!
//! ## Features
//!
//! - **Total order**: replica first, then sequence
//! - **Compact wire format**: LEB128 varints, no framing
//! - **Root identifiers**: a reserved replica value marks a named top-level type
//! - **Root-name lookup**: recover the name a shared type was registered under
//!
//! ## Example
//!
//! ```rust
//! use crdt_id::{Decoder, Encoder, make_id, read_id, write_id};
//!
//! let id = make_id(12345, 67890);
//! let mut encoder = Encoder::new();
//! write_id(&mut encoder, &id);
//!
//! let bytes = encoder.into_vec();
//! let decoded = read_id(&mut Decoder::new(&bytes)).unwrap();
//! assert_eq!(decoded, id);
//! ```

pub mod crdt;
pub mod doc;
pub mod encoding;
pub mod error;

// Re-export the main public API
pub use crdt::{
    Id, ROOT_REPLICA, ReplicaClock, ReplicaId, RootId, TypeKind, WireId, ids_equal, make_id,
    random_replica_id, read_id, read_wire_id, write_id, write_root_id, write_wire_id,
};
pub use doc::{Doc, DocId, DocOptions, ShareRegistry, SharedType, TypeRef, find_root_name};
pub use encoding::{Decoder, Encoder, Read, Write};
pub use error::{DecodeError, DocError, EncodeError};
