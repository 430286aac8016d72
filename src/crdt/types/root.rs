//! Root identifiers and shared type kinds.
//!
//! A root identifier names a top-level shared type by its registration name
//! instead of by the operation that created it. On the wire it shares the
//! identifier slot with ordinary ids; [`WireId`] keeps the two cases apart.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crdt::types::id::Id;

/// The kind of a shared type, as referenced on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Array,
    Map,
    Text,
    XmlElement,
    XmlFragment,
    XmlHook,
    XmlText,
}

impl TypeKind {
    /// Wire reference number of this kind
    pub fn type_ref(self) -> u8 {
        match self {
            TypeKind::Array => 0,
            TypeKind::Map => 1,
            TypeKind::Text => 2,
            TypeKind::XmlElement => 3,
            TypeKind::XmlFragment => 4,
            TypeKind::XmlHook => 5,
            TypeKind::XmlText => 6,
        }
    }

    /// Inverse of [`TypeKind::type_ref`]
    pub fn from_type_ref(type_ref: u8) -> Option<Self> {
        Some(match type_ref {
            0 => TypeKind::Array,
            1 => TypeKind::Map,
            2 => TypeKind::Text,
            3 => TypeKind::XmlElement,
            4 => TypeKind::XmlFragment,
            5 => TypeKind::XmlHook,
            6 => TypeKind::XmlText,
            _ => return None,
        })
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Identifies a top-level shared type by name and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RootId {
    pub name: String,
    pub kind: TypeKind,
}

impl RootId {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        RootId {
            name: name.into(),
            kind,
        }
    }
}

/// Anything that can occupy an identifier slot on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// An operation stamped by a replica
    Item(Id),
    /// A top-level shared type
    Root(RootId),
}

impl WireId {
    pub fn item(&self) -> Option<&Id> {
        match self {
            WireId::Item(id) => Some(id),
            WireId::Root(_) => None,
        }
    }

    pub fn root(&self) -> Option<&RootId> {
        match self {
            WireId::Item(_) => None,
            WireId::Root(root) => Some(root),
        }
    }
}

impl From<Id> for WireId {
    fn from(id: Id) -> Self {
        WireId::Item(id)
    }
}

impl From<RootId> for WireId {
    fn from(root: RootId) -> Self {
        WireId::Root(root)
    }
}
