//! Catalog declarations as produced by a schema loader.
//!
//! Everything here refers to other declarations by name, so declarations may
//! appear in any order. `CatalogBuilder` resolves the names in two passes.
//! The same structs deserialize from JSON:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "std::anyint", "kind": "abstract" },
//!     { "name": "std::int64", "kind": "concrete", "extends": ["std::anyint"] }
//!   ],
//!   "casts": [ { "from": "std::int32", "to": "std::int64", "tier": "implicit" } ],
//!   "signatures": [
//!     { "name": "std::+", "fixity": "infix", "returns": "std::int64",
//!       "params": [ { "name": "l", "type": "std::int64" },
//!                   { "name": "r", "type": "std::int64" } ] }
//!   ]
//! }
//! ```

use crate::name::QualName;
use crate::signatures::{Fixity, ParamQualifier, TypeModifier, Volatility};
use crate::types::{ContainerKind, Placeholder, Tier, TypeKind};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogDecl {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
    #[serde(default)]
    pub casts: Vec<CastDecl>,
    #[serde(default)]
    pub signatures: Vec<SignatureDecl>,
}

/// Flat spelling of `TypeKind` used in declarations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindDecl {
    Abstract,
    Concrete,
    Object,
    Array,
    Tuple,
    Range,
    Multirange,
    AnyType,
    AnyTuple,
    AnyObject,
}

impl From<KindDecl> for TypeKind {
    fn from(kind: KindDecl) -> Self {
        match kind {
            KindDecl::Abstract => TypeKind::Abstract,
            KindDecl::Concrete => TypeKind::Concrete,
            KindDecl::Object => TypeKind::Object,
            KindDecl::Array => TypeKind::Container(ContainerKind::Array),
            KindDecl::Tuple => TypeKind::Container(ContainerKind::Tuple),
            KindDecl::Range => TypeKind::Container(ContainerKind::Range),
            KindDecl::Multirange => TypeKind::Container(ContainerKind::Multirange),
            KindDecl::AnyType => TypeKind::Generic(Placeholder::AnyType),
            KindDecl::AnyTuple => TypeKind::Generic(Placeholder::AnyTuple),
            KindDecl::AnyObject => TypeKind::Generic(Placeholder::AnyObject),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: QualName,
    pub kind: KindDecl,
    #[serde(default)]
    pub extends: Vec<QualName>,
    /// Element types, for containers only.
    #[serde(default)]
    pub elements: Vec<QualName>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CastDecl {
    pub from: QualName,
    pub to: QualName,
    pub tier: Tier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: QualName,
    #[serde(default)]
    pub qualifier: ParamQualifier,
    #[serde(default)]
    pub named_only: bool,
    #[serde(default)]
    pub has_default: bool,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<QualName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            qualifier: ParamQualifier::Single,
            named_only: false,
            has_default: false,
        }
    }

    pub fn with_qualifier(mut self, qualifier: ParamQualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    pub fn named_only(mut self) -> Self {
        self.named_only = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureDecl {
    pub name: QualName,
    #[serde(default)]
    pub fixity: Fixity,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    pub returns: QualName,
    #[serde(default)]
    pub return_modifier: TypeModifier,
    #[serde(default)]
    pub volatility: Volatility,
    #[serde(default)]
    pub commutator: Option<QualName>,
    #[serde(default)]
    pub negator: Option<QualName>,
    #[serde(default)]
    pub derivative_of: Option<QualName>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub is_singleton_set_of: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub backend: Option<serde_json::Value>,
}

impl SignatureDecl {
    pub fn new(name: impl Into<QualName>, fixity: Fixity, returns: impl Into<QualName>) -> Self {
        Self {
            name: name.into(),
            fixity,
            params: Vec::new(),
            returns: returns.into(),
            return_modifier: TypeModifier::Single,
            volatility: Volatility::Immutable,
            commutator: None,
            negator: None,
            derivative_of: None,
            recursive: false,
            fallback: false,
            is_singleton_set_of: false,
            is_abstract: false,
            backend: None,
        }
    }

    pub fn function(name: impl Into<QualName>, returns: impl Into<QualName>) -> Self {
        Self::new(name, Fixity::Function, returns)
    }

    pub fn infix(name: impl Into<QualName>, returns: impl Into<QualName>) -> Self {
        Self::new(name, Fixity::Infix, returns)
    }

    pub fn prefix(name: impl Into<QualName>, returns: impl Into<QualName>) -> Self {
        Self::new(name, Fixity::Prefix, returns)
    }

    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Shorthand for a single positional parameter.
    pub fn arg(self, name: &str, ty: &str) -> Self {
        self.param(ParamDecl::new(name, ty))
    }

    pub fn with_return_modifier(mut self, modifier: TypeModifier) -> Self {
        self.return_modifier = modifier;
        self
    }

    pub fn with_volatility(mut self, volatility: Volatility) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_commutator(mut self, name: impl Into<QualName>) -> Self {
        self.commutator = Some(name.into());
        self
    }

    pub fn with_negator(mut self, name: impl Into<QualName>) -> Self {
        self.negator = Some(name.into());
        self
    }

    pub fn with_derivative_of(mut self, name: impl Into<QualName>) -> Self {
        self.derivative_of = Some(name.into());
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    pub fn singleton_set_of(mut self) -> Self {
        self.is_singleton_set_of = true;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_backend(mut self, backend: serde_json::Value) -> Self {
        self.backend = Some(backend);
        self
    }
}
