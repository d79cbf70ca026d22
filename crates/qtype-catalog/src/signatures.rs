//! Signature Table: declared overloads per callable.
//!
//! Operators and functions share one table. The lookup key is the callable
//! name plus its fixity, so prefix `-` and infix `-` are distinct callables.
//! Overloads are kept in global declaration order; `SignatureId` is the
//! declaration index and doubles as the total order used for stable
//! diagnostics.

use crate::errors::CatalogError;
use crate::name::QualName;
use crate::types::TypeId;
use indexmap::IndexMap;
use qtype_common::limits::MAX_SIGNATURE_PARAMS;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fixity {
    #[default]
    Function,
    Prefix,
    Infix,
    Ternary,
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Function => "function",
            Self::Prefix => "prefix operator",
            Self::Infix => "infix operator",
            Self::Ternary => "ternary operator",
        })
    }
}

/// Three-level purity classification. Ordered `Immutable < Stable < Volatile`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    #[default]
    Immutable,
    Stable,
    Volatile,
}

/// Cardinality qualifier of a parameter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamQualifier {
    #[default]
    Single,
    Optional,
    #[serde(rename = "setof")]
    SetOf,
    Variadic,
}

/// How an argument is passed to the callee.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeModifier {
    #[default]
    Single,
    Optional,
    #[serde(rename = "setof")]
    SetOf,
}

impl ParamQualifier {
    /// Variadic arguments are passed one element at a time.
    pub const fn type_modifier(self) -> TypeModifier {
        match self {
            Self::Single | Self::Variadic => TypeModifier::Single,
            Self::Optional => TypeModifier::Optional,
            Self::SetOf => TypeModifier::SetOf,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// For a variadic parameter, the type of each absorbed argument.
    pub ty: TypeId,
    pub qualifier: ParamQualifier,
    pub named_only: bool,
    pub has_default: bool,
}

impl Parameter {
    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.qualifier == ParamQualifier::Variadic
    }

    /// Positional and required (no default).
    #[inline]
    pub fn is_required_positional(&self) -> bool {
        !self.named_only && !self.is_variadic() && !self.has_default
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureMeta {
    pub volatility: Volatility,
    pub commutator: Option<QualName>,
    pub negator: Option<QualName>,
    pub derivative_of: Option<QualName>,
    /// Compound-type operands are compared element-wise by the consumer.
    pub recursive: bool,
    /// Usable only when no non-fallback overload matches.
    pub fallback: bool,
    pub is_singleton_set_of: bool,
    /// Declared for inheritance only, never selected by default.
    pub is_abstract: bool,
}

/// Declaration index of a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallableKey {
    pub name: QualName,
    pub fixity: Fixity,
}

#[derive(Clone, Debug)]
pub struct Signature {
    pub id: SignatureId,
    pub name: QualName,
    pub fixity: Fixity,
    pub params: Vec<Parameter>,
    pub return_type: TypeId,
    pub return_modifier: TypeModifier,
    pub meta: SignatureMeta,
    /// Opaque code-generation payload, never interpreted here.
    pub backend: Option<serde_json::Value>,
}

impl Signature {
    pub fn key(&self) -> CallableKey {
        CallableKey {
            name: self.name.clone(),
            fixity: self.fixity,
        }
    }

    pub fn positional(&self) -> impl Iterator<Item = (usize, &Parameter)> + '_ {
        self.params.iter().enumerate().filter(|(_, p)| !p.named_only)
    }

    pub fn variadic(&self) -> Option<(usize, &Parameter)> {
        self.params.iter().enumerate().find(|(_, p)| p.is_variadic())
    }

    /// Enforce the parameter-list shape rules:
    /// at most one variadic, which must be the last positional parameter and
    /// may not be named-only; named-only parameters follow every positional
    /// one; parameter names are unique.
    pub(crate) fn validate_shape(&self) -> Result<(), CatalogError> {
        let malformed = |reason: &str| CatalogError::MalformedSignature {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.params.len() > MAX_SIGNATURE_PARAMS {
            return Err(malformed("too many parameters"));
        }

        let mut names = FxHashSet::default();
        let mut seen_named_only = false;
        let mut seen_variadic = false;
        for param in &self.params {
            if !names.insert(param.name.as_str()) {
                return Err(malformed(&format!("duplicate parameter '{}'", param.name)));
            }
            if param.named_only {
                if param.is_variadic() {
                    return Err(malformed("a variadic parameter cannot be named-only"));
                }
                seen_named_only = true;
                continue;
            }
            if seen_named_only {
                return Err(malformed(
                    "named-only parameters must follow all positional parameters",
                ));
            }
            if seen_variadic {
                return Err(malformed("the variadic parameter must be the last positional one"));
            }
            seen_variadic = param.is_variadic();
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignatureTable {
    signatures: Vec<Signature>,
    /// name -> (fixity, id) in declaration order.
    by_name: IndexMap<QualName, SmallVec<[(Fixity, SignatureId); 4]>>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Add a signature, assigning its `SignatureId`.
    pub fn insert(&mut self, mut signature: Signature) -> Result<SignatureId, CatalogError> {
        let id = SignatureId(self.signatures.len() as u32);
        signature.id = id;
        signature.validate_shape()?;
        self.by_name
            .entry(signature.name.clone())
            .or_default()
            .push((signature.fixity, id));
        self.signatures.push(signature);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: SignatureId) -> Option<&Signature> {
        self.signatures.get(id.0 as usize)
    }

    /// The signature for `id`.
    ///
    /// # Panics
    /// If `id` was issued by a different table.
    #[inline]
    pub fn signature(&self, id: SignatureId) -> &Signature {
        &self.signatures[id.0 as usize]
    }

    /// All overloads of `(name, fixity)` in declaration order.
    pub fn lookup<'a>(
        &'a self,
        name: &str,
        fixity: Fixity,
    ) -> impl Iterator<Item = &'a Signature> + use<'a> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .filter(move |(f, _)| *f == fixity)
            .map(|&(_, id)| self.signature(id))
    }

    pub fn contains(&self, name: &str, fixity: Fixity) -> bool {
        self.lookup(name, fixity).next().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> + '_ {
        self.signatures.iter()
    }

    /// Check that every commutator/negator/derivative_of names an existing
    /// callable of the same fixity.
    pub(crate) fn validate_references(&self) -> Result<(), CatalogError> {
        for signature in &self.signatures {
            let references = [
                ("commutator", &signature.meta.commutator),
                ("negator", &signature.meta.negator),
                ("derivative_of", &signature.meta.derivative_of),
            ];
            for (field, target) in references {
                let Some(target) = target else {
                    continue;
                };
                if !self.contains(target.as_str(), signature.fixity) {
                    return Err(CatalogError::DanglingMetadataReference {
                        signature: signature.name.clone(),
                        fixity: signature.fixity,
                        field,
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/signatures_tests.rs"]
mod tests;
