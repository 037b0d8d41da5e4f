//! Type resolution
//!
//! The container never enumerates types itself; it asks a [`TypeResolver`]
//! for the contents of a package or for a single type by name.

use std::any::TypeId;

use hearth_domain::error::{Error, Result};

use super::types::TypeEntry;

// Auto-collection via linkme distributed slices - types submit entries at compile time
#[linkme::distributed_slice]
pub static REGISTERED_TYPES: [TypeEntry] = [..];

/// Enumerates and loads registered types
pub trait TypeResolver: Send + Sync {
    /// Every type in `package` or its sub-packages
    fn types_in_package(&self, package: &str) -> Vec<TypeEntry>;

    /// Load a single type by fully-qualified name
    ///
    /// # Errors
    ///
    /// Returns [`Error::Discovery`] when no type with that name is registered.
    fn load(&self, name: &str) -> Result<TypeEntry>;

    /// Entry whose service factory produces the given concrete type
    fn find_type(&self, type_id: TypeId) -> Option<TypeEntry>;
}

fn not_registered(name: &str) -> Error {
    Error::discovery(name, "no type with this name is registered")
}

/// Resolver over the link-time [`REGISTERED_TYPES`] table
///
/// Link order is not stable between builds, so package listings are sorted
/// by type name.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedTypeResolver;

impl TypeResolver for LinkedTypeResolver {
    fn types_in_package(&self, package: &str) -> Vec<TypeEntry> {
        let mut entries: Vec<TypeEntry> = REGISTERED_TYPES
            .iter()
            .filter(|entry| entry.belongs_to(package))
            .copied()
            .collect();
        entries.sort_by(|a, b| a.name.cmp(b.name));
        entries
    }

    fn load(&self, name: &str) -> Result<TypeEntry> {
        REGISTERED_TYPES
            .iter()
            .find(|entry| entry.name == name)
            .copied()
            .ok_or_else(|| not_registered(name))
    }

    fn find_type(&self, type_id: TypeId) -> Option<TypeEntry> {
        REGISTERED_TYPES
            .iter()
            .find(|entry| entry.service_type_id() == Some(type_id))
            .copied()
    }
}

/// Resolver over an explicit table, enumerated in registration order
#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    entries: Vec<TypeEntry>,
}

impl TypeTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with every link-time registration
    pub fn linked() -> Self {
        Self {
            entries: REGISTERED_TYPES.iter().copied().collect(),
        }
    }

    /// Add an entry (builder form)
    #[must_use]
    pub fn with(mut self, entry: TypeEntry) -> Self {
        self.register(entry);
        self
    }

    /// Add an entry, replacing any entry with the same name
    pub fn register(&mut self, entry: TypeEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypeResolver for TypeTable {
    fn types_in_package(&self, package: &str) -> Vec<TypeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.belongs_to(package))
            .copied()
            .collect()
    }

    fn load(&self, name: &str) -> Result<TypeEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .copied()
            .ok_or_else(|| not_registered(name))
    }

    fn find_type(&self, type_id: TypeId) -> Option<TypeEntry> {
        self.entries
            .iter()
            .find(|entry| entry.service_type_id() == Some(type_id))
            .copied()
    }
}
