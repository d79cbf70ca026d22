//! Call sites and resolution results.

use indexmap::IndexMap;
use qtype_catalog::{Fixity, QualName, SignatureId, TypeId, TypeModifier, Volatility};
use qtype_common::limits::INLINE_CALL_ARGS;
use smallvec::SmallVec;
use std::fmt;

/// Argument types at one call site.
///
/// Named arguments keep their call-site order; that order is part of the
/// rank vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallSite {
    pub positional: SmallVec<[TypeId; INLINE_CALL_ARGS]>,
    pub named: IndexMap<String, TypeId>,
}

impl CallSite {
    pub fn new(positional: impl IntoIterator<Item = TypeId>) -> Self {
        Self {
            positional: positional.into_iter().collect(),
            named: IndexMap::new(),
        }
    }

    /// Add a named argument. A repeated name replaces the earlier type but
    /// keeps its position.
    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, ty: TypeId) -> Self {
        self.named.insert(name.into(), ty);
        self
    }

    pub fn arg_count(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Every argument: positional first, then named in call-site order.
    pub fn args(&self) -> impl Iterator<Item = (ArgSlot, TypeId)> + '_ {
        let positional = self
            .positional
            .iter()
            .enumerate()
            .map(|(i, &ty)| (ArgSlot::Positional(i), ty));
        let named = self
            .named
            .iter()
            .map(|(name, &ty)| (ArgSlot::Named(name.clone()), ty));
        positional.chain(named)
    }

    /// The type of the `index`-th argument in `args()` order.
    pub(crate) fn arg_type(&self, index: usize) -> TypeId {
        match self.positional.get(index) {
            Some(&ty) => ty,
            None => self.named[index - self.positional.len()],
        }
    }
}

/// Where an argument sits at the call site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgSlot {
    Positional(usize),
    Named(String),
}

impl fmt::Display for ArgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional(i) => write!(f, "argument #{}", i + 1),
            Self::Named(name) => write!(f, "argument '{name}'"),
        }
    }
}

/// How well one argument matches its parameter. Lower is better.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchRank {
    Exact = 0,
    Subtype = 1,
    ImplicitCast = 2,
}

impl MatchRank {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundArg {
    pub slot: ArgSlot,
    pub param_index: usize,
    /// Declared parameter type after generic instantiation.
    pub param_type: TypeId,
    pub arg_type: TypeId,
    pub rank: MatchRank,
    /// Cast edges needed to convert the argument; 0 for exact and subtype.
    pub cast_distance: u32,
}

/// Positional arguments absorbed by the variadic parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VariadicSpan {
    pub param_index: usize,
    pub first_arg: usize,
    pub count: usize,
}

/// Placeholder bindings for one resolution, in first-binding order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: SmallVec<[(TypeId, TypeId); 2]>,
}

impl Bindings {
    pub fn get(&self, placeholder: TypeId) -> Option<TypeId> {
        self.entries
            .iter()
            .find(|(p, _)| *p == placeholder)
            .map(|&(_, ty)| ty)
    }

    pub(crate) fn set(&mut self, placeholder: TypeId, ty: TypeId) {
        match self.entries.iter_mut().find(|(p, _)| *p == placeholder) {
            Some(entry) => entry.1 = ty,
            None => self.entries.push((placeholder, ty)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, TypeId)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The selected overload for a call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCall {
    pub signature: SignatureId,
    pub name: QualName,
    pub fixity: Fixity,
    pub return_type: TypeId,
    pub return_modifier: TypeModifier,
    pub bindings: Bindings,
    /// One entry per call-site argument, in `CallSite::args` order.
    pub args: SmallVec<[BoundArg; INLINE_CALL_ARGS]>,
    /// Parameter indexes filled by their default.
    pub defaulted: SmallVec<[usize; 2]>,
    pub variadic: Option<VariadicSpan>,
    pub declared_volatility: Volatility,
}

impl ResolvedCall {
    pub fn rank(&self) -> SmallVec<[MatchRank; INLINE_CALL_ARGS]> {
        self.args.iter().map(|arg| arg.rank).collect()
    }

    /// Positional argument types in call order.
    pub fn positional_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.args
            .iter()
            .filter(|arg| matches!(arg.slot, ArgSlot::Positional(_)))
            .map(|arg| arg.arg_type)
    }
}
