//! Error types for decoding identifiers and managing the root registry.

use thiserror::Error;

use crate::crdt::types::{Id, ReplicaId, TypeKind};
use crate::doc::TypeRef;

/// Errors raised while reading from a binary buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of buffer at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("malformed varuint at offset {offset}: {reason}")]
    MalformedVarUint { offset: usize, reason: &'static str },

    #[error("invalid utf-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unknown type reference {type_ref} at offset {offset}")]
    UnknownTypeRef { offset: usize, type_ref: u8 },
}

impl DecodeError {
    /// True when the input itself is invalid, as opposed to merely truncated.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DecodeError::UnexpectedEof { .. })
    }

    /// Byte offset at which decoding failed.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::UnexpectedEof { offset }
            | DecodeError::MalformedVarUint { offset, .. }
            | DecodeError::InvalidUtf8 { offset }
            | DecodeError::UnknownTypeRef { offset, .. } => *offset,
        }
    }

    pub(crate) fn from_varint(err: unsigned_varint::decode::Error, offset: usize) -> Self {
        use unsigned_varint::decode::Error as VarintError;

        match err {
            VarintError::Insufficient => DecodeError::UnexpectedEof { offset },
            VarintError::Overflow => DecodeError::MalformedVarUint {
                offset,
                reason: "value exceeds 64 bits",
            },
            VarintError::NotMinimal => DecodeError::MalformedVarUint {
                offset,
                reason: "non-minimal encoding",
            },
            _ => DecodeError::MalformedVarUint {
                offset,
                reason: "invalid encoding",
            },
        }
    }
}

/// Errors raised while writing an identifier slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("id {0} uses the reserved root replica and cannot occupy an identifier slot")]
    ReservedReplica(Id),
}

/// Errors raised by a document's root registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    #[error("client id {0} is reserved for root identifiers")]
    ReservedClientId(ReplicaId),

    #[error("type {0:?} does not belong to this document")]
    ForeignType(TypeRef),

    #[error("type `{name}` is already defined as {existing}, not {requested}")]
    TypeMismatch {
        name: String,
        existing: TypeKind,
        requested: TypeKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_classification() {
        assert!(!DecodeError::UnexpectedEof { offset: 3 }.is_malformed());
        assert!(DecodeError::InvalidUtf8 { offset: 3 }.is_malformed());
        assert!(
            DecodeError::MalformedVarUint {
                offset: 0,
                reason: "x"
            }
            .is_malformed()
        );
    }

    #[test]
    fn test_varint_error_mapping() {
        use unsigned_varint::decode::Error as VarintError;

        assert_eq!(
            DecodeError::from_varint(VarintError::Insufficient, 4),
            DecodeError::UnexpectedEof { offset: 4 }
        );
        let overflow = DecodeError::from_varint(VarintError::Overflow, 1);
        assert!(overflow.is_malformed());
        assert_eq!(overflow.offset(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = DocError::TypeMismatch {
            name: "notes".into(),
            existing: TypeKind::Text,
            requested: TypeKind::Map,
        };
        assert_eq!(
            err.to_string(),
            "type `notes` is already defined as Text, not Map"
        );
        assert_eq!(
            DocError::ReservedClientId(0xFF_FFFF).to_string(),
            "client id 16777215 is reserved for root identifiers"
        );
        assert_eq!(
            DecodeError::UnexpectedEof { offset: 2 }.to_string(),
            "unexpected end of buffer at offset 2"
        );
    }
}
