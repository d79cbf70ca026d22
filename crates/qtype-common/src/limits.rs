//! Centralized limits for catalog construction and resolution.
//!
//! The lattice and cast graph are small and static, so these bounds are
//! generous. They exist so that a malformed catalog is rejected at load time
//! instead of degrading every resolution call.

/// Maximum number of type nodes a single catalog may declare.
///
/// `TypeId` is a dense `u32`; ancestor and reachability bitsets are sized by
/// the node count, so the catalog is capped well below `u32::MAX`.
pub const MAX_CATALOG_TYPES: usize = 1 << 16;

/// Maximum number of declared parameters on one signature.
///
/// Variadic parameters count once regardless of how many arguments they
/// absorb at a call site.
pub const MAX_SIGNATURE_PARAMS: usize = 255;

/// Inline capacity for per-node supertype lists.
///
/// Most scalar types extend one or two abstract parents.
pub const INLINE_SUPERTYPES: usize = 2;

/// Inline capacity for per-call rank vectors and argument buffers.
pub const INLINE_CALL_ARGS: usize = 4;
