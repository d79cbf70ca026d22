//! Overload resolution for query-language functions and operators.
//!
//! Given a frozen `qtype_catalog::Catalog`, a `Resolver` picks the single
//! best overload for a call site, binds generic placeholders, and reports
//! per-argument match ranks. Failures are `ResolutionError` values; the
//! catalog is never modified.
//!
//! ```ignore
//! let resolver = Resolver::new(&catalog);
//! let call = resolver.resolve_positional("std::+", Fixity::Infix, &[int32, int64])?;
//! assert_eq!(call.return_type, int64);
//! ```
mod binding;
pub mod call;
mod errors;
pub mod metadata;
pub mod rank;
pub mod resolver;
mod shape;
mod typemods;

pub use call::{ArgSlot, BoundArg, Bindings, CallSite, MatchRank, ResolvedCall, VariadicSpan};
pub use errors::{ResolutionError, render_signature};
pub use metadata::{CallableRef, SignatureMetadata, metadata_of, volatility_of};
pub use rank::dominates;
pub use resolver::{Resolver, ResolverPolicy};

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;
