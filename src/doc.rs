//! Owning document and its registry of top-level shared types.
//!
//! Shared types live in a per-document arena and are addressed by [`TypeRef`]
//! handles. A type registered under a name becomes a root; the type itself
//! never stores that name, so [`find_root_name`] recovers it by scanning the
//! registry for the identical handle.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crossbeam_skiplist::SkipMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::crdt::types::{
    Id, ROOT_REPLICA, ReplicaClock, ReplicaId, RootId, TypeKind, random_replica_id,
};
use crate::error::DocError;

static NEXT_DOC_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Doc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(u64);

impl DocId {
    fn next() -> Self {
        DocId(NEXT_DOC_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// Handle to a shared type in its document's arena.
///
/// Two handles are equal only if they name the same instance, so comparing
/// handles is an identity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    doc: DocId,
    index: usize,
}

impl TypeRef {
    /// The document whose arena holds this type
    pub fn doc(&self) -> DocId {
        self.doc
    }
}

/// A shared type instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedType {
    kind: TypeKind,
    /// Back-reference to the document that registered this type as a root.
    /// Not an ownership link.
    owner: Option<DocId>,
}

impl SharedType {
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn owner(&self) -> Option<DocId> {
        self.owner
    }
}

/// Name to shared type mapping for the top level of a document.
///
/// Only the owning [`Doc`] mutates it; everyone else gets read access.
#[derive(Debug, Default)]
pub struct ShareRegistry {
    entries: SkipMap<String, TypeRef>,
}

impl ShareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, name: impl Into<String>, ty: TypeRef) {
        self.entries.insert(name.into(), ty);
    }

    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.entries.get(name).map(|entry| *entry.value())
    }

    pub(crate) fn remove(&self, name: &str) -> Option<TypeRef> {
        self.entries.remove(name).map(|entry| *entry.value())
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, TypeRef)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear scan for the name `ty` is registered under.
    pub fn name_of(&self, ty: TypeRef) -> Option<String> {
        self.entries
            .iter()
            .find(|entry| *entry.value() == ty)
            .map(|entry| entry.key().clone())
    }
}

/// Returns the name `ty` is registered under in `registry`.
///
/// # Panics
///
/// Panics if `ty` is not a root of `registry`. Asking for the root name of a
/// nested or foreign type is a bug in the caller.
pub fn find_root_name(ty: TypeRef, registry: &ShareRegistry) -> String {
    match registry.name_of(ty) {
        Some(name) => name,
        None => {
            error!(?ty, "shared type is not registered as a root");
            panic!("root-name resolution failed: {ty:?} is not registered as a root type");
        }
    }
}

/// Settings for a new [`Doc`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocOptions {
    /// Replica id of the local client; random when absent
    pub client_id: Option<ReplicaId>,
    /// First sequence number the local client stamps
    pub clock_origin: u64,
}

/// A document: the local replica's clock plus its shared types.
#[derive(Debug)]
pub struct Doc {
    id: DocId,
    clock: ReplicaClock,
    share: ShareRegistry,
    types: RwLock<Vec<SharedType>>,
}

impl Default for Doc {
    fn default() -> Self {
        Self::new()
    }
}

impl Doc {
    /// Creates a document with a random client id starting at sequence 0.
    pub fn new() -> Self {
        Self::build(random_replica_id(), 0)
    }

    /// Creates a document from `options`.
    ///
    /// Fails if the configured client id is [`ROOT_REPLICA`], since ids
    /// stamped with it would read back as root ids.
    pub fn with_options(options: DocOptions) -> Result<Self, DocError> {
        let client_id = match options.client_id {
            Some(ROOT_REPLICA) => return Err(DocError::ReservedClientId(ROOT_REPLICA)),
            Some(client_id) => client_id,
            None => random_replica_id(),
        };
        Ok(Self::build(client_id, options.clock_origin))
    }

    fn build(client_id: ReplicaId, origin: u64) -> Self {
        let id = DocId::next();
        debug!(doc = ?id, client_id, origin, "created document");

        Doc {
            id,
            clock: ReplicaClock::with_origin(client_id, origin),
            share: ShareRegistry::new(),
            types: RwLock::new(Vec::new()),
        }
    }

    pub fn id(&self) -> DocId {
        self.id
    }

    pub fn client_id(&self) -> ReplicaId {
        self.clock.replica()
    }

    /// Stamps a local operation of `len` units.
    ///
    /// # Panics
    ///
    /// Panics once the replica's sequence space is exhausted.
    pub fn next_id(&self, len: u64) -> Id {
        self.clock.tick(len)
    }

    pub fn share(&self) -> &ShareRegistry {
        &self.share
    }

    /// Returns the root type registered as `name`, creating it if needed.
    pub fn get_or_insert(&self, name: &str, kind: TypeKind) -> Result<TypeRef, DocError> {
        let mut types = self.types.write();
        if let Some(existing) = self.share.get(name) {
            let existing_kind = self
                .lookup(&types, existing)
                .map(|t| t.kind)
                .ok_or(DocError::ForeignType(existing))?;
            if existing_kind != kind {
                return Err(DocError::TypeMismatch {
                    name: name.to_string(),
                    existing: existing_kind,
                    requested: kind,
                });
            }
            return Ok(existing);
        }

        let ty = self.alloc(
            &mut types,
            SharedType {
                kind,
                owner: Some(self.id),
            },
        );
        self.share.insert(name, ty);
        debug!(doc = ?self.id, name, %kind, "registered root type");
        Ok(ty)
    }

    /// Creates a type that is not registered at the top level.
    pub fn create_type(&self, kind: TypeKind) -> TypeRef {
        let mut types = self.types.write();
        self.alloc(&mut types, SharedType { kind, owner: None })
    }

    pub fn get(&self, name: &str) -> Option<TypeRef> {
        self.share.get(name)
    }

    pub fn shared_type(&self, ty: TypeRef) -> Option<SharedType> {
        self.lookup(&self.types.read(), ty).cloned()
    }

    pub fn kind_of(&self, ty: TypeRef) -> Option<TypeKind> {
        self.shared_type(ty).map(|t| t.kind)
    }

    pub fn owner_of(&self, ty: TypeRef) -> Option<DocId> {
        self.shared_type(ty).and_then(|t| t.owner)
    }

    /// Detaches the root registered as `name` and clears its back-reference.
    pub fn remove(&self, name: &str) -> Option<TypeRef> {
        let mut types = self.types.write();
        let ty = self.share.remove(name)?;
        if ty.doc == self.id {
            if let Some(shared) = types.get_mut(ty.index) {
                shared.owner = None;
            }
        }
        debug!(doc = ?self.id, name, "detached root type");
        Some(ty)
    }

    /// Name `ty` is registered under; panics if it is not a root of this doc.
    pub fn root_name(&self, ty: TypeRef) -> String {
        find_root_name(ty, &self.share)
    }

    /// Wire identity of the root `ty`; panics if it is not a root of this doc.
    pub fn root_id(&self, ty: TypeRef) -> RootId {
        let name = self.root_name(ty);
        match self.kind_of(ty) {
            Some(kind) => RootId { name, kind },
            None => panic!("root-name resolution failed: {ty:?} is not in this document"),
        }
    }

    fn lookup<'t>(&self, types: &'t [SharedType], ty: TypeRef) -> Option<&'t SharedType> {
        if ty.doc != self.id {
            return None;
        }
        types.get(ty.index)
    }

    fn alloc(&self, types: &mut Vec<SharedType>, ty: SharedType) -> TypeRef {
        types.push(ty);
        TypeRef {
            doc: self.id,
            index: types.len() - 1,
        }
    }
}
