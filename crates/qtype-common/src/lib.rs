//! Common types and utilities for the qtype resolver.
//!
//! This crate provides foundational pieces used across all qtype crates:
//! - Centralized limits (`limits`)
//! - Structured diagnostics rendered from load/resolution errors
//! - Tracing subscriber setup driven by `QTYPE_LOG`

// Centralized limits and thresholds
pub mod limits;

// Structured diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, diagnostic_codes};

// Tracing subscriber setup
pub mod tracing_config;
pub use tracing_config::{TracingConfig, init_tracing};
