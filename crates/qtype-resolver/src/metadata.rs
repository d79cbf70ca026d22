//! Metadata propagation: volatility and the operator links a query
//! rewriter needs (commutator, negator, derivative_of).

use crate::call::{CallSite, ResolvedCall};
use crate::errors::ResolutionError;
use crate::resolver::Resolver;
use qtype_catalog::{Catalog, Fixity, QualName, Signature, Volatility};
use smallvec::SmallVec;

/// The volatility of a call expression: the most volatile of the callee's
/// declared volatility and its arguments'. Leaves are `Immutable`.
pub fn volatility_of(call: &ResolvedCall, arg_volatilities: &[Volatility]) -> Volatility {
    arg_volatilities
        .iter()
        .copied()
        .fold(call.declared_volatility, Volatility::max)
}

/// A named reference to another callable, resolved on request.
#[derive(Copy, Clone, Debug)]
pub struct CallableRef<'a> {
    catalog: &'a Catalog,
    pub name: &'a QualName,
    pub fixity: Fixity,
}

impl<'a> CallableRef<'a> {
    /// Overloads of the referenced callable in declaration order.
    pub fn overloads(&self) -> impl Iterator<Item = &'a Signature> + use<'a> {
        self.catalog.lookup(self.name.as_str(), self.fixity)
    }
}

/// Rewriter-facing metadata of one signature.
#[derive(Copy, Clone, Debug)]
pub struct SignatureMetadata<'a> {
    pub commutator: Option<CallableRef<'a>>,
    pub negator: Option<CallableRef<'a>>,
    pub derivative_of: Option<CallableRef<'a>>,
    pub recursive: bool,
}

pub fn metadata_of<'a>(catalog: &'a Catalog, signature: &'a Signature) -> SignatureMetadata<'a> {
    let link = |name: &'a Option<QualName>| {
        name.as_ref().map(|name| CallableRef {
            catalog,
            name,
            fixity: signature.fixity,
        })
    };
    SignatureMetadata {
        commutator: link(&signature.meta.commutator),
        negator: link(&signature.meta.negator),
        derivative_of: link(&signature.meta.derivative_of),
        recursive: signature.meta.recursive,
    }
}

impl Resolver<'_> {
    /// Resolve the commutator of `call`'s operator against the swapped
    /// operands. `None` if no commutator is declared.
    pub fn resolve_commutator(
        &self,
        call: &ResolvedCall,
    ) -> Option<Result<ResolvedCall, ResolutionError>> {
        let signature = self.catalog().signatures().get(call.signature)?;
        let commutator = signature.meta.commutator.as_ref()?;
        let mut operands: SmallVec<[_; 2]> = call.positional_types().collect();
        operands.reverse();
        Some(self.resolve(commutator.as_str(), call.fixity, &CallSite::new(operands)))
    }

    /// Resolve the negator of `call`'s operator against the same operands.
    /// `None` if no negator is declared.
    pub fn resolve_negator(
        &self,
        call: &ResolvedCall,
    ) -> Option<Result<ResolvedCall, ResolutionError>> {
        let signature = self.catalog().signatures().get(call.signature)?;
        let negator = signature.meta.negator.as_ref()?;
        Some(self.resolve(
            negator.as_str(),
            call.fixity,
            &CallSite::new(call.positional_types()),
        ))
    }
}

#[cfg(test)]
#[path = "../tests/metadata_tests.rs"]
mod tests;
