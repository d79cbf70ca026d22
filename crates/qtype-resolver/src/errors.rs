//! Resolution-time errors.
//!
//! These are ordinary values returned per call; the catalog is untouched.

use qtype_catalog::{Catalog, Fixity, QualName, Signature, SignatureId};
use qtype_common::{Diagnostic, diagnostic_codes};
use thiserror::Error;

const CAST_HINT: &str = "Consider using an explicit type cast or a conversion function.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("no {fixity} '{name}' matches argument types ({})", describe_args(.arg_types))]
    NoMatchingOverload {
        name: QualName,
        fixity: Fixity,
        arg_types: Vec<QualName>,
    },

    #[error(
        "{fixity} '{name}' is ambiguous for argument types ({}): {} candidates",
        describe_args(.arg_types),
        .candidates.len()
    )]
    AmbiguousOverload {
        name: QualName,
        fixity: Fixity,
        arg_types: Vec<QualName>,
        /// Tied candidates in declaration order.
        candidates: Vec<SignatureId>,
    },

    #[error(
        "cannot bind '{placeholder}' of {fixity} '{name}' to both '{bound}' and '{conflicting}'"
    )]
    GenericBindingConflict {
        name: QualName,
        fixity: Fixity,
        placeholder: QualName,
        bound: QualName,
        conflicting: QualName,
    },

    #[error("{fixity} '{name}' passes {slot} both as a set and as a single value")]
    AmbiguousTypeModifier {
        name: QualName,
        fixity: Fixity,
        slot: String,
    },
}

fn describe_args(arg_types: &[QualName]) -> String {
    arg_types
        .iter()
        .map(|ty| format!("'{ty}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ResolutionError {
    pub fn code(&self) -> u32 {
        match self {
            Self::NoMatchingOverload { .. } => diagnostic_codes::NO_MATCHING_OVERLOAD,
            Self::AmbiguousOverload { .. } => diagnostic_codes::AMBIGUOUS_OVERLOAD,
            Self::GenericBindingConflict { .. } => diagnostic_codes::GENERIC_BINDING_CONFLICT,
            Self::AmbiguousTypeModifier { .. } => diagnostic_codes::AMBIGUOUS_TYPE_MODIFIER,
        }
    }

    pub fn name(&self) -> &QualName {
        match self {
            Self::NoMatchingOverload { name, .. }
            | Self::AmbiguousOverload { name, .. }
            | Self::GenericBindingConflict { name, .. }
            | Self::AmbiguousTypeModifier { name, .. } => name,
        }
    }

    /// Render for the query author. Candidate signatures are spelled out
    /// using `catalog`, which must be the snapshot the error came from.
    pub fn to_diagnostic(&self, catalog: &Catalog) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code(), self.to_string());
        match self {
            Self::NoMatchingOverload { .. } | Self::GenericBindingConflict { .. } => {
                diagnostic.with_hint(CAST_HINT)
            }
            Self::AmbiguousOverload { candidates, .. } => {
                let related = candidates
                    .iter()
                    .filter_map(|&id| catalog.signatures().get(id))
                    .map(|signature| format!("candidate: {}", render_signature(catalog, signature)));
                diagnostic.with_related(related).with_hint(CAST_HINT)
            }
            Self::AmbiguousTypeModifier { .. } => diagnostic,
        }
    }
}

/// `name(param: type, ...) -> type`, with qualifiers spelled out.
pub fn render_signature(catalog: &Catalog, signature: &Signature) -> String {
    use qtype_catalog::{ParamQualifier, TypeModifier};

    let types = catalog.types();
    let params = signature
        .params
        .iter()
        .map(|param| {
            let qualifier = match param.qualifier {
                ParamQualifier::Single => "",
                ParamQualifier::Optional => "optional ",
                ParamQualifier::SetOf => "set of ",
                ParamQualifier::Variadic => "variadic ",
            };
            let named = if param.named_only { "named only " } else { "" };
            format!("{named}{}: {qualifier}{}", param.name, types.name(param.ty))
        })
        .collect::<Vec<_>>()
        .join(", ");
    let returns = match signature.return_modifier {
        TypeModifier::Single => "",
        TypeModifier::Optional => "optional ",
        TypeModifier::SetOf => "set of ",
    };
    format!(
        "{}({params}) -> {returns}{}",
        signature.name,
        types.name(signature.return_type)
    )
}

#[cfg(test)]
#[path = "../tests/errors_tests.rs"]
mod tests;
