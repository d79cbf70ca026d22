//! Type Registry: the multiple-inheritance lattice.
//!
//! Nodes are stored densely and addressed by `TypeId`. Each node carries a
//! reflexive ancestor bitset that is kept up to date as extends-edges are
//! added, so `is_subtype` is a single bit test and `common_ancestors` is a
//! bitset intersection.
//!
//! Edges may be added after all nodes are declared (the loader does exactly
//! that to allow forward references). Adding `child -> parent` when `parent`
//! already derives from `child` is rejected with `CatalogError::Cycle`.

use crate::errors::CatalogError;
use crate::name::QualName;
use crate::types::{ContainerKind, SupertypeList, TypeId, TypeKind, TypeNode};
use fixedbitset::FixedBitSet;
use qtype_common::limits::MAX_CATALOG_TYPES;
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    nodes: Vec<TypeNode>,
    by_name: FxHashMap<QualName, TypeId>,
    containers: FxHashMap<(ContainerKind, Vec<TypeId>), TypeId>,
    /// Reflexive-transitive supertypes per node.
    ancestors: Vec<FixedBitSet>,
    /// Generic nodes and containers mentioning one.
    polymorphic: FixedBitSet,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Declare a scalar, object or placeholder node with no supertypes yet.
    pub fn declare(&mut self, name: QualName, kind: TypeKind) -> Result<TypeId, CatalogError> {
        self.push_node(name, kind, Vec::new())
    }

    /// Declare a container node over already-declared element types.
    ///
    /// Structurally identical containers (same kind, same elements) may not
    /// be declared twice under different names.
    pub fn declare_container(
        &mut self,
        name: QualName,
        kind: ContainerKind,
        elements: Vec<TypeId>,
    ) -> Result<TypeId, CatalogError> {
        let key = (kind, elements.clone());
        if self.containers.contains_key(&key) {
            return Err(CatalogError::DuplicateType { name });
        }
        let id = self.push_node(name, TypeKind::Container(kind), elements)?;
        self.containers.insert(key, id);
        Ok(id)
    }

    /// Declare a node and attach its supertypes in one step.
    pub fn register(
        &mut self,
        name: QualName,
        kind: TypeKind,
        supertypes: &[TypeId],
    ) -> Result<TypeId, CatalogError> {
        let id = self.declare(name, kind)?;
        self.extend(id, supertypes)?;
        Ok(id)
    }

    fn push_node(
        &mut self,
        name: QualName,
        kind: TypeKind,
        elements: Vec<TypeId>,
    ) -> Result<TypeId, CatalogError> {
        if self.by_name.contains_key(&name) {
            return Err(CatalogError::DuplicateType { name });
        }
        if self.nodes.len() >= MAX_CATALOG_TYPES {
            return Err(CatalogError::TooManyTypes {
                limit: MAX_CATALOG_TYPES,
            });
        }

        let id = TypeId(self.nodes.len() as u32);
        let polymorphic =
            kind.is_type_variable() || elements.iter().any(|&e| self.is_polymorphic(e));

        let mut own = FixedBitSet::with_capacity(id.index() + 1);
        own.insert(id.index());
        self.ancestors.push(own);

        self.polymorphic.grow(id.index() + 1);
        self.polymorphic.set(id.index(), polymorphic);

        trace!(type_id = id.0, name = %name, ?kind, "TypeRegistry::declare");
        self.by_name.insert(name.clone(), id);
        self.nodes.push(TypeNode {
            name,
            kind,
            supertypes: SupertypeList::new(),
            elements,
        });
        Ok(id)
    }

    /// Add extends-edges from `child` to each of `supertypes`.
    ///
    /// Edges are validated one by one; on error the edges already added by
    /// this call remain (the loader discards the whole registry anyway).
    pub fn extend(&mut self, child: TypeId, supertypes: &[TypeId]) -> Result<(), CatalogError> {
        for &parent in supertypes {
            if self.is_subtype(parent, child) {
                return Err(CatalogError::Cycle {
                    child: self.name(child).clone(),
                    parent: self.name(parent).clone(),
                });
            }
            if self.nodes[child.index()].supertypes.contains(&parent) {
                continue;
            }
            self.nodes[child.index()].supertypes.push(parent);

            // Everything that derives from `child` now also derives from
            // everything `parent` derives from.
            let inherited = self.ancestors[parent.index()].clone();
            for bits in &mut self.ancestors {
                if bits.contains(child.index()) {
                    bits.union_with(&inherited);
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    /// The node for `id`.
    ///
    /// # Panics
    /// If `id` was issued by a different registry.
    #[inline]
    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn name(&self, id: TypeId) -> &QualName {
        &self.node(id).name
    }

    #[inline]
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.node(id).kind
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Find the registered container with this exact structure.
    pub fn container(&self, kind: ContainerKind, elements: &[TypeId]) -> Option<TypeId> {
        self.containers.get(&(kind, elements.to_vec())).copied()
    }

    /// True iff `b` is reachable from `a` via zero or more extends-edges.
    #[inline]
    pub fn is_subtype(&self, a: TypeId, b: TypeId) -> bool {
        self.ancestors
            .get(a.index())
            .is_some_and(|bits| bits.contains(b.index()))
    }

    /// All ancestors of `id`, itself included, in ascending `TypeId` order.
    pub fn ancestors(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.ancestors[id.index()].ones().map(|i| TypeId(i as u32))
    }

    /// Nodes reachable from both `a` and `b`, in ascending `TypeId` order.
    pub fn common_ancestors(&self, a: TypeId, b: TypeId) -> Vec<TypeId> {
        self.ancestors[a.index()]
            .intersection(&self.ancestors[b.index()])
            .map(|i| TypeId(i as u32))
            .collect()
    }

    /// True for placeholders and abstract scalars, and for containers that
    /// mention one.
    #[inline]
    pub fn is_polymorphic(&self, id: TypeId) -> bool {
        self.polymorphic.contains(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (TypeId(i as u32), node))
    }

    /// Render a list of types as `'a', 'b'` for messages.
    pub fn display_list(&self, ids: &[TypeId]) -> String {
        ids.iter()
            .map(|&id| format!("'{}'", self.name(id)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
