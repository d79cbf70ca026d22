//! Load-time errors.
//!
//! Every variant is fatal to catalog construction: `CatalogBuilder::build`
//! returns the first error and no partial catalog is ever published.

use crate::name::QualName;
use crate::signatures::Fixity;
use crate::types::Tier;
use qtype_common::{Diagnostic, diagnostic_codes};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("type '{child}' cannot extend '{parent}': the extends relation would become cyclic")]
    Cycle { child: QualName, parent: QualName },

    #[error("implicit casts form a cycle between '{source_type}' and '{target}'")]
    CastCycle {
        source_type: QualName,
        target: QualName,
    },

    #[error("a cast from '{source_type}' to '{target}' is already declared (as {existing:?})")]
    DuplicateCast {
        source_type: QualName,
        target: QualName,
        existing: Tier,
    },

    #[error("cast from '{ty}' to itself is not allowed")]
    SelfCast { ty: QualName },

    #[error("type '{name}' is already declared")]
    DuplicateType { name: QualName },

    #[error("{field} of {fixity} '{signature}' refers to unknown callable '{target}'")]
    DanglingMetadataReference {
        signature: QualName,
        fixity: Fixity,
        field: &'static str,
        target: QualName,
    },

    #[error("unknown type '{name}' referenced by {context}")]
    UnknownTypeReference { name: QualName, context: String },

    #[error("malformed signature for '{name}': {reason}")]
    MalformedSignature { name: QualName, reason: String },

    #[error("too many types in one catalog (limit {limit})")]
    TooManyTypes { limit: usize },

    #[error("invalid catalog declaration: {message}")]
    Json { message: String },
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

impl CatalogError {
    pub fn code(&self) -> u32 {
        match self {
            Self::Cycle { .. } => diagnostic_codes::INHERITANCE_CYCLE,
            Self::CastCycle { .. } => diagnostic_codes::IMPLICIT_CAST_CYCLE,
            Self::DuplicateCast { .. } => diagnostic_codes::DUPLICATE_CAST,
            Self::SelfCast { .. } => diagnostic_codes::SELF_CAST,
            Self::DuplicateType { .. } => diagnostic_codes::DUPLICATE_TYPE,
            Self::DanglingMetadataReference { .. } => {
                diagnostic_codes::DANGLING_METADATA_REFERENCE
            }
            Self::UnknownTypeReference { .. } => diagnostic_codes::UNKNOWN_TYPE_REFERENCE,
            Self::MalformedSignature { .. } => diagnostic_codes::MALFORMED_SIGNATURE,
            Self::TooManyTypes { .. } | Self::Json { .. } => {
                diagnostic_codes::INVALID_CATALOG_DECLARATION
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string())
    }
}
