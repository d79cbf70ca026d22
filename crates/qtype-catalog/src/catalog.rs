//! The immutable catalog snapshot.
//!
//! A `Catalog` is only obtainable from `CatalogBuilder::build`, so every
//! instance has passed load-time validation. It is `Send + Sync` and never
//! mutated; share it by `Arc`. Hot reload goes through `SharedCatalog`, which
//! swaps whole snapshots so an in-flight resolution never sees a half-updated
//! lattice.

use crate::builder::CatalogBuilder;
use crate::casts::CastGraph;
use crate::errors::CatalogError;
use crate::registry::TypeRegistry;
use crate::signatures::{Fixity, Signature, SignatureTable};
use crate::types::{Tier, TypeId};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

#[derive(Debug)]
pub struct Catalog {
    types: TypeRegistry,
    casts: CastGraph,
    signatures: SignatureTable,
}

impl Catalog {
    pub(crate) fn from_parts(
        types: TypeRegistry,
        casts: CastGraph,
        signatures: SignatureTable,
    ) -> Self {
        Self {
            types,
            casts,
            signatures,
        }
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Load a catalog from its JSON declaration form.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        CatalogBuilder::from_json(json)?.build()
    }

    #[inline]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    #[inline]
    pub fn casts(&self) -> &CastGraph {
        &self.casts
    }

    #[inline]
    pub fn signatures(&self) -> &SignatureTable {
        &self.signatures
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.types.lookup(name)
    }

    #[inline]
    pub fn is_subtype(&self, a: TypeId, b: TypeId) -> bool {
        self.types.is_subtype(a, b)
    }

    pub fn common_ancestors(&self, a: TypeId, b: TypeId) -> Vec<TypeId> {
        self.types.common_ancestors(a, b)
    }

    #[inline]
    pub fn reachable(&self, src: TypeId, dst: TypeId, max_tier: Tier) -> bool {
        self.casts.reachable(&self.types, src, dst, max_tier)
    }

    pub fn cast_distance(&self, src: TypeId, dst: TypeId, max_tier: Tier) -> Option<u32> {
        self.casts.cast_distance(&self.types, src, dst, max_tier)
    }

    pub fn lookup<'a>(
        &'a self,
        name: &str,
        fixity: Fixity,
    ) -> impl Iterator<Item = &'a Signature> + use<'a> {
        self.signatures.lookup(name, fixity)
    }
}

/// Atomically replaceable handle to the current catalog.
#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The snapshot to resolve against. Holding it keeps it alive across a
    /// concurrent `replace`.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a new, fully built catalog and return the previous one.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        debug!(
            types = next.types.len(),
            signatures = next.signatures.len(),
            "SharedCatalog::replace"
        );
        std::mem::replace(&mut *guard, next)
    }

    /// Build from declarations and publish only if the load succeeds.
    pub fn reload(&self, builder: CatalogBuilder) -> Result<Arc<Catalog>, CatalogError> {
        let catalog = builder.build()?;
        Ok(self.replace(catalog))
    }
}

#[cfg(test)]
#[path = "../tests/catalog_tests.rs"]
mod tests;
