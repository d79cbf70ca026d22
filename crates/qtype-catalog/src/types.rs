//! Type nodes of the scalar lattice.
//!
//! A `TypeId` is a dense handle into the `TypeRegistry` that issued it.
//! Identity comparisons are `TypeId` comparisons; names are only kept for
//! lookup and diagnostics.

use crate::name::QualName;
use qtype_common::limits::INLINE_SUPERTYPES;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Handle to a node in a `TypeRegistry`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Structural family of a container type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKind {
    Array,
    Tuple,
    Range,
    Multirange,
}

/// The generic placeholders a signature may mention.
///
/// | Placeholder | Binds to |
/// |---|---|
/// | `AnyType` | any non-generic type |
/// | `AnyTuple` | tuple containers |
/// | `AnyObject` | object types |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    AnyType,
    AnyTuple,
    AnyObject,
}

impl Placeholder {
    pub const fn name(self) -> &'static str {
        match self {
            Self::AnyType => "anytype",
            Self::AnyTuple => "anytuple",
            Self::AnyObject => "anyobject",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Abstract scalar (`anyint`, `anyreal`): never a value's own type.
    Abstract,
    /// Concrete scalar (`int64`, `str`).
    Concrete,
    /// Object type; the domain of `anyobject`.
    Object,
    /// Array/tuple/range/multirange over element types.
    Container(ContainerKind),
    /// A placeholder bound per call. Only valid in signatures.
    Generic(Placeholder),
}

impl TypeKind {
    #[inline]
    pub const fn is_generic(self) -> bool {
        matches!(self, Self::Generic(_))
    }

    /// Placeholders and abstract scalars: in a signature both stand for one
    /// concrete type chosen per call.
    #[inline]
    pub const fn is_type_variable(self) -> bool {
        matches!(self, Self::Generic(_) | Self::Abstract)
    }

    #[inline]
    pub const fn container(self) -> Option<ContainerKind> {
        match self {
            Self::Container(kind) => Some(kind),
            _ => None,
        }
    }
}

pub type SupertypeList = SmallVec<[TypeId; INLINE_SUPERTYPES]>;

/// A registered node.
#[derive(Clone, Debug)]
pub struct TypeNode {
    pub name: QualName,
    pub kind: TypeKind,
    /// Direct supertypes in declaration order.
    pub supertypes: SupertypeList,
    /// Element types of a container, empty otherwise.
    pub elements: Vec<TypeId>,
}

impl TypeNode {
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.kind.is_generic()
    }

    #[inline]
    pub fn is_container(&self) -> bool {
        self.kind.container().is_some()
    }
}

/// Permission level of a cast. Ordered: `Implicit < Assignment < Explicit`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Implicit,
    Assignment,
    Explicit,
}

impl Tier {
    /// True if a cast declared at `self` may be used where `max_tier` is allowed.
    #[inline]
    pub fn usable_at(self, max_tier: Tier) -> bool {
        self <= max_tier
    }
}
