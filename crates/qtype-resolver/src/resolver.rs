//! Overload resolution.
//!
//! For one call site:
//!
//! 1. gather the overloads of `(name, fixity)` whose parameter lists can
//!    absorb the arguments (see `shape`);
//! 2. bind type variables (generic placeholders and abstract scalars) and
//!    check that every argument implicitly reaches its instantiated
//!    parameter type;
//! 3. rank each argument: exact, proper subtype, or implicit cast;
//! 4. drop fallbacks if anything else survived and keep the candidates no
//!    other candidate dominates.
//!
//! Exactly one survivor is the answer. Everything is examined in
//! declaration order, so the same inputs always give the same result or the
//! same error.

use crate::binding::{BindFailure, Unifier};
use crate::call::{BoundArg, CallSite, MatchRank, ResolvedCall};
use crate::errors::ResolutionError;
use crate::rank::non_dominated;
use crate::shape::match_shape;
use qtype_catalog::{Catalog, Fixity, QualName, Signature, Tier, TypeId};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Knobs for a `Resolver`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Consider signatures declared abstract.
    pub include_abstract: bool,
}

impl ResolverPolicy {
    pub const fn new() -> Self {
        Self {
            include_abstract: false,
        }
    }

    #[must_use]
    pub const fn with_include_abstract(mut self, include: bool) -> Self {
        self.include_abstract = include;
        self
    }
}

/// Why one candidate dropped out.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Rejection {
    Arity,
    Infeasible,
    Conflict {
        placeholder: TypeId,
        bound: TypeId,
        offending: TypeId,
    },
}

impl From<BindFailure> for Rejection {
    fn from(failure: BindFailure) -> Self {
        match failure {
            BindFailure::Infeasible => Self::Infeasible,
            BindFailure::Conflict {
                placeholder,
                bound,
                offending,
            } => Self::Conflict {
                placeholder,
                bound,
                offending,
            },
        }
    }
}

/// Resolves call sites against one catalog snapshot.
///
/// Holds no mutable state; one resolver may serve many threads.
#[derive(Copy, Clone, Debug)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    policy: ResolverPolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_policy(catalog, ResolverPolicy::default())
    }

    pub fn with_policy(catalog: &'a Catalog, policy: ResolverPolicy) -> Self {
        Self { catalog, policy }
    }

    #[inline]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    #[inline]
    pub fn policy(&self) -> ResolverPolicy {
        self.policy
    }

    /// Overloads of `(name, fixity)` visible under the policy.
    pub(crate) fn overloads(
        &self,
        name: &str,
        fixity: Fixity,
    ) -> impl Iterator<Item = &'a Signature> + use<'a> {
        let include_abstract = self.policy.include_abstract;
        self.catalog
            .lookup(name, fixity)
            .filter(move |signature| include_abstract || !signature.meta.is_abstract)
    }

    /// Choose the single best overload of `(name, fixity)` for `call`.
    ///
    /// An argument type that is not registered in this catalog matches
    /// nothing.
    pub fn resolve(
        &self,
        name: &str,
        fixity: Fixity,
        call: &CallSite,
    ) -> Result<ResolvedCall, ResolutionError> {
        let _span = tracing::debug_span!("resolve", name = name, fixity = ?fixity).entered();
        let types = self.catalog.types();
        if call.args().any(|(_, ty)| types.get(ty).is_none()) {
            let err = ResolutionError::NoMatchingOverload {
                name: QualName::new(name),
                fixity,
                arg_types: self.arg_names(call),
            };
            debug!(name = name, error = %err, "Resolver::resolve unknown argument type");
            return Err(err);
        }

        let mut survivors: Vec<ResolvedCall> = Vec::new();
        let mut fallback_only = true;
        let mut conflict = None;

        for signature in self.overloads(name, fixity) {
            match self.try_candidate(signature, call) {
                Ok(candidate) => {
                    fallback_only &= signature.meta.fallback;
                    survivors.push(candidate);
                }
                Err(rejection) => {
                    trace!(
                        name = name,
                        signature = signature.id.0,
                        reason = ?rejection,
                        "Resolver::resolve rejected candidate"
                    );
                    // Abstract scalars that disagree just mean no overload fits.
                    if let Rejection::Conflict {
                        placeholder,
                        bound,
                        offending,
                    } = rejection
                        && types.kind(placeholder).is_generic()
                    {
                        conflict.get_or_insert((placeholder, bound, offending));
                    }
                }
            }
        }

        if !fallback_only {
            let signatures = self.catalog.signatures();
            survivors.retain(|c| !signatures.signature(c.signature).meta.fallback);
        }

        let ranks: Vec<_> = survivors.iter().map(ResolvedCall::rank).collect();
        let mut best = non_dominated(&ranks);

        match best.len() {
            1 => {
                let winner = survivors.swap_remove(best.swap_remove(0));
                debug!(
                    name = name,
                    signature = winner.signature.0,
                    rank = ?winner.rank(),
                    "Resolver::resolve selected"
                );
                Ok(winner)
            }
            0 => {
                let err = match conflict {
                    Some((placeholder, bound, offending)) => {
                        ResolutionError::GenericBindingConflict {
                            name: QualName::new(name),
                            fixity,
                            placeholder: types.name(placeholder).clone(),
                            bound: types.name(bound).clone(),
                            conflicting: types.name(offending).clone(),
                        }
                    }
                    None => ResolutionError::NoMatchingOverload {
                        name: QualName::new(name),
                        fixity,
                        arg_types: self.arg_names(call),
                    },
                };
                debug!(name = name, error = %err, "Resolver::resolve failed");
                Err(err)
            }
            _ => {
                let candidates = best.iter().map(|&i| survivors[i].signature).collect();
                let err = ResolutionError::AmbiguousOverload {
                    name: QualName::new(name),
                    fixity,
                    arg_types: self.arg_names(call),
                    candidates,
                };
                debug!(name = name, error = %err, "Resolver::resolve ambiguous");
                Err(err)
            }
        }
    }

    /// Convenience for calls without named arguments.
    pub fn resolve_positional(
        &self,
        name: &str,
        fixity: Fixity,
        args: &[TypeId],
    ) -> Result<ResolvedCall, ResolutionError> {
        self.resolve(name, fixity, &CallSite::new(args.iter().copied()))
    }

    /// Argument type names for messages. Ids foreign to this catalog render
    /// as `#<index>`.
    fn arg_names(&self, call: &CallSite) -> Vec<QualName> {
        let types = self.catalog.types();
        call.args()
            .map(|(_, ty)| match types.get(ty) {
                Some(node) => node.name.clone(),
                None => QualName::new(format!("#{}", ty.0)),
            })
            .collect()
    }

    fn try_candidate(
        &self,
        signature: &Signature,
        call: &CallSite,
    ) -> Result<ResolvedCall, Rejection> {
        let shape = match_shape(
            signature,
            call.positional.len(),
            call.named.keys().map(String::as_str),
        )
        .ok_or(Rejection::Arity)?;

        let mut unifier = Unifier::new(self.catalog);
        for (arg, &param_index) in shape.slots.iter().enumerate() {
            unifier.bind(signature.params[param_index].ty, call.arg_type(arg))?;
        }

        let types = self.catalog.types();
        let mut args = SmallVec::with_capacity(shape.slots.len());
        for ((slot, arg_type), &param_index) in call.args().zip(&shape.slots) {
            let declared = signature.params[param_index].ty;
            let param_type = unifier.instantiate(declared).ok_or(Rejection::Infeasible)?;
            if !self.catalog.reachable(arg_type, param_type, Tier::Implicit) {
                return Err(Rejection::Infeasible);
            }

            let mut rank = if arg_type == param_type {
                MatchRank::Exact
            } else if types.is_subtype(arg_type, param_type) {
                MatchRank::Subtype
            } else {
                MatchRank::ImplicitCast
            };
            if types.is_polymorphic(declared) {
                rank = rank.max(MatchRank::Subtype);
            }

            args.push(BoundArg {
                slot,
                param_index,
                param_type,
                arg_type,
                rank,
                cast_distance: self
                    .catalog
                    .cast_distance(arg_type, param_type, Tier::Implicit)
                    .unwrap_or(0),
            });
        }

        let return_type = unifier
            .instantiate(signature.return_type)
            .ok_or(Rejection::Infeasible)?;

        Ok(ResolvedCall {
            signature: signature.id,
            name: signature.name.clone(),
            fixity: signature.fixity,
            return_type,
            return_modifier: signature.return_modifier,
            bindings: unifier.into_bindings(),
            args,
            defaulted: shape.defaulted,
            variadic: shape.variadic,
            declared_volatility: signature.meta.volatility,
        })
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
