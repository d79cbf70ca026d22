//! Static type tables for query-language overload resolution.
//!
//! This crate holds the three read-only tables the resolver works against:
//!
//! - **Type Registry**: scalar/abstract/object/container/placeholder nodes in a
//!   multiple-inheritance lattice, with precomputed ancestor bitsets
//! - **Cast Graph**: `(source, target, tier)` edges, subtyping as a free cast,
//!   precomputed implicit reachability
//! - **Signature Table**: overloads per `(name, fixity)` in declaration order
//!
//! All three are produced together by `CatalogBuilder` and frozen into a
//! `Catalog`. A catalog is never mutated after construction.
pub mod builder;
pub mod casts;
pub mod catalog;
pub mod decl;
mod errors;
pub mod name;
pub mod registry;
pub mod signatures;
pub mod types;

pub use builder::CatalogBuilder;
pub use casts::{CastEdge, CastGraph};
pub use catalog::{Catalog, SharedCatalog};
pub use decl::{CastDecl, CatalogDecl, KindDecl, ParamDecl, SignatureDecl, TypeDecl};
pub use errors::CatalogError;
pub use name::QualName;
pub use registry::TypeRegistry;
pub use signatures::{
    CallableKey, Fixity, ParamQualifier, Parameter, Signature, SignatureId, SignatureMeta,
    SignatureTable, TypeModifier, Volatility,
};
pub use types::{ContainerKind, Placeholder, Tier, TypeId, TypeKind, TypeNode};

#[cfg(test)]
#[path = "../tests/name_tests.rs"]
mod name_tests;
