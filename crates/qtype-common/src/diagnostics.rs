//! Structured diagnostics.
//!
//! Load-time and resolution-time errors are plain enums in their own crates.
//! A `Diagnostic` is what a compiler front end shows the query author: a
//! stable code, a category, the rendered message and an optional hint.

use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Message,
}

pub mod diagnostic_codes {
    // Load-time (catalog construction)
    pub const INHERITANCE_CYCLE: u32 = 1001;
    pub const IMPLICIT_CAST_CYCLE: u32 = 1002;
    pub const DUPLICATE_CAST: u32 = 1003;
    pub const SELF_CAST: u32 = 1004;
    pub const DUPLICATE_TYPE: u32 = 1005;
    pub const DANGLING_METADATA_REFERENCE: u32 = 1006;
    pub const UNKNOWN_TYPE_REFERENCE: u32 = 1007;
    pub const MALFORMED_SIGNATURE: u32 = 1008;
    pub const INVALID_CATALOG_DECLARATION: u32 = 1009;

    // Resolution-time
    pub const NO_MATCHING_OVERLOAD: u32 = 2001;
    pub const AMBIGUOUS_OVERLOAD: u32 = 2002;
    pub const GENERIC_BINDING_CONFLICT: u32 = 2003;
    pub const AMBIGUOUS_TYPE_MODIFIER: u32 = 2004;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub message_text: String,
    pub hint: Option<String>,
    /// Extra lines shown under the message (e.g. tied candidates).
    pub related: Vec<String>,
}

impl Diagnostic {
    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            message_text: message.into(),
            hint: None,
            related: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, related: impl IntoIterator<Item = String>) -> Self {
        self.related.extend(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };
        write!(f, "{category} Q{}: {}", self.code, self.message_text)?;
        for line in &self.related {
            write!(f, "\n  {line}")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
