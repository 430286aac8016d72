//! Wire encoding of identifiers.
//!
//! An ordinary id is two varuints, `replica` then `sequence`, with no framing.
//! A root id occupies the same slot: the [`ROOT_REPLICA`] sentinel, the root
//! name as a varstring, then the type reference byte.

use tracing::trace;

use crate::crdt::types::{Id, ROOT_REPLICA, RootId, TypeKind, WireId};
use crate::encoding::{Read, Write};
use crate::error::{DecodeError, EncodeError};

/// Writes `id.replica` then `id.sequence`.
pub fn write_id<E: Write + ?Sized>(encoder: &mut E, id: &Id) {
    encoder.write_var_uint(id.replica);
    encoder.write_var_uint(id.sequence);
}

/// Reads an id written by [`write_id`].
///
/// The root sentinel is not interpreted here; use [`read_wire_id`] where a
/// root id may appear.
pub fn read_id<D: Read + ?Sized>(decoder: &mut D) -> Result<Id, DecodeError> {
    let replica = decoder.read_var_uint()?;
    let sequence = decoder.read_var_uint()?;
    Ok(Id::new(replica, sequence))
}

pub fn write_root_id<E: Write + ?Sized>(encoder: &mut E, root: &RootId) {
    encoder.write_var_uint(ROOT_REPLICA);
    encoder.write_var_string(&root.name);
    encoder.write_u8(root.kind.type_ref());
}

/// Writes an identifier slot.
///
/// An item whose replica is [`ROOT_REPLICA`] would read back as a root id, so
/// it is refused before any byte is written.
pub fn write_wire_id<E: Write + ?Sized>(encoder: &mut E, id: &WireId) -> Result<(), EncodeError> {
    match id {
        WireId::Item(id) if id.replica == ROOT_REPLICA => {
            return Err(EncodeError::ReservedReplica(*id));
        }
        WireId::Item(id) => write_id(encoder, id),
        WireId::Root(root) => write_root_id(encoder, root),
    }
    Ok(())
}

/// Reads an identifier slot, branching on the root sentinel.
pub fn read_wire_id<D: Read + ?Sized>(decoder: &mut D) -> Result<WireId, DecodeError> {
    let replica = decoder.read_var_uint()?;
    if replica != ROOT_REPLICA {
        let sequence = decoder.read_var_uint()?;
        return Ok(WireId::Item(Id::new(replica, sequence)));
    }

    let name = decoder.read_var_string()?;
    let offset = decoder.position();
    let type_ref = decoder.read_u8()?;
    let kind = TypeKind::from_type_ref(type_ref)
        .ok_or(DecodeError::UnknownTypeRef { offset, type_ref })?;
    trace!(name = %name, kind = %kind, "decoded root id");
    Ok(WireId::Root(RootId { name, kind }))
}
