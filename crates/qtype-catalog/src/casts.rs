//! Cast Graph: permitted conversions between types.
//!
//! A path from `src` to `dst` may mix two kinds of step:
//! - moving from a type to one of its supertypes (always free), and
//! - following a declared cast edge whose tier is at most the requested tier.
//!
//! Identity and subtyping therefore never need an edge. Call resolution only
//! ever asks for `Tier::Implicit`; that closure is precomputed per node when
//! the graph is frozen, other tiers are searched breadth-first on demand.

use crate::errors::CatalogError;
use crate::registry::TypeRegistry;
use crate::types::{Tier, TypeId};
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CastEdge {
    pub source: TypeId,
    pub target: TypeId,
    pub tier: Tier,
}

#[derive(Clone, Debug, Default)]
pub struct CastGraph {
    /// Edges in declaration order.
    edges: Vec<CastEdge>,
    by_pair: FxHashMap<(TypeId, TypeId), usize>,
    outgoing: FxHashMap<TypeId, SmallVec<[usize; 4]>>,
    /// Per-node implicit reachability, filled by `freeze`.
    implicit: Vec<FixedBitSet>,
}

impl CastGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[CastEdge] {
        &self.edges
    }

    /// Declare a cast. At most one edge per `(src, dst)` pair; no self-edges.
    pub fn add_cast(
        &mut self,
        types: &TypeRegistry,
        src: TypeId,
        dst: TypeId,
        tier: Tier,
    ) -> Result<(), CatalogError> {
        if src == dst {
            return Err(CatalogError::SelfCast {
                ty: types.name(src).clone(),
            });
        }
        if let Some(&existing) = self.by_pair.get(&(src, dst)) {
            return Err(CatalogError::DuplicateCast {
                source_type: types.name(src).clone(),
                target: types.name(dst).clone(),
                existing: self.edges[existing].tier,
            });
        }

        let index = self.edges.len();
        self.edges.push(CastEdge {
            source: src,
            target: dst,
            tier,
        });
        self.by_pair.insert((src, dst), index);
        self.outgoing.entry(src).or_default().push(index);
        // Any earlier closure is stale now.
        self.implicit.clear();
        Ok(())
    }

    /// Tier of the directly declared edge, if any.
    pub fn tier_of(&self, src: TypeId, dst: TypeId) -> Option<Tier> {
        self.by_pair.get(&(src, dst)).map(|&i| self.edges[i].tier)
    }

    /// Precompute implicit reachability and reject implicit round trips.
    ///
    /// A cycle of IMPLICIT steps between two distinct types fails with
    /// `CatalogError::CastCycle` naming the first offending edge. Explicit
    /// and assignment round trips are fine.
    pub fn freeze(&mut self, types: &TypeRegistry) -> Result<(), CatalogError> {
        let implicit: Vec<FixedBitSet> = (0..types.len())
            .map(|i| self.closure_from(types, TypeId(i as u32), Tier::Implicit))
            .collect();

        for edge in &self.edges {
            if edge.tier != Tier::Implicit {
                continue;
            }
            if implicit[edge.target.index()].contains(edge.source.index()) {
                return Err(CatalogError::CastCycle {
                    source_type: types.name(edge.source).clone(),
                    target: types.name(edge.target).clone(),
                });
            }
        }

        debug!(
            types = types.len(),
            casts = self.edges.len(),
            "CastGraph::freeze"
        );
        self.implicit = implicit;
        Ok(())
    }

    /// True iff `dst` can be reached from `src` with casts of tier at most
    /// `max_tier`, including the trivial identity and subtype cases.
    ///
    /// # Panics
    ///
    /// If `src` is not registered in `types`.
    pub fn reachable(&self, types: &TypeRegistry, src: TypeId, dst: TypeId, max_tier: Tier) -> bool {
        if src == dst || types.is_subtype(src, dst) {
            return true;
        }
        if max_tier == Tier::Implicit {
            if let Some(bits) = self.implicit.get(src.index()) {
                return bits.contains(dst.index());
            }
        }
        self.cast_distance(types, src, dst, max_tier).is_some()
    }

    /// Fewest cast edges on any path from `src` to `dst` at `max_tier`.
    ///
    /// Supertype moves cost nothing, so identity and subtyping give
    /// `Some(0)`. `None` if `dst` is unreachable.
    ///
    /// # Panics
    ///
    /// If `src` is not registered in `types`.
    pub fn cast_distance(
        &self,
        types: &TypeRegistry,
        src: TypeId,
        dst: TypeId,
        max_tier: Tier,
    ) -> Option<u32> {
        let mut queued = FixedBitSet::with_capacity(types.len());
        let mut expanded = FixedBitSet::with_capacity(types.len());
        let mut queue = VecDeque::new();
        queued.insert(src.index());
        queue.push_back((src, 0u32));

        while let Some((current, distance)) = queue.pop_front() {
            if types.is_subtype(current, dst) {
                return Some(distance);
            }
            for ancestor in types.ancestors(current) {
                if expanded.put(ancestor.index()) {
                    continue;
                }
                for edge in self.edges_from(ancestor, max_tier) {
                    if !queued.put(edge.target.index()) {
                        queue.push_back((edge.target, distance + 1));
                    }
                }
            }
        }
        None
    }

    fn edges_from(&self, src: TypeId, max_tier: Tier) -> impl Iterator<Item = &CastEdge> + '_ {
        self.outgoing
            .get(&src)
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
            .filter(move |edge| edge.tier.usable_at(max_tier))
    }

    /// Every type reachable from `src` at `max_tier`, `src` included.
    fn closure_from(&self, types: &TypeRegistry, src: TypeId, max_tier: Tier) -> FixedBitSet {
        let mut reached = FixedBitSet::with_capacity(types.len());
        let mut queue = VecDeque::new();
        queue.push_back(src);

        while let Some(current) = queue.pop_front() {
            for ancestor in types.ancestors(current) {
                if reached.put(ancestor.index()) {
                    continue;
                }
                for edge in self.edges_from(ancestor, max_tier) {
                    if !reached.contains(edge.target.index()) {
                        queue.push_back(edge.target);
                    }
                }
            }
        }
        reached
    }
}

#[cfg(test)]
#[path = "../tests/casts_tests.rs"]
mod tests;
