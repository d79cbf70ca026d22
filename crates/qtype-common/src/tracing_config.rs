//! Subscriber setup for catalog and resolver diagnostics.
//!
//! `QTYPE_LOG` picks what is logged. A bare level (`debug`, `trace`, or `1`
//! for `debug`) applies to the qtype crates only, so an embedding compiler's
//! own targets stay quiet. Anything containing `=` or `,` is a full
//! `EnvFilter` directive list and passes through unchanged. Without
//! `QTYPE_LOG`, `RUST_LOG` is honoured as is.
//!
//! `QTYPE_LOG_FORMAT` picks `text` (default), `tree` (one indented block per
//! `resolve` call, candidates nested under it) or `json`.
//!
//! ```bash
//! # Why did `+` pick that overload?
//! QTYPE_LOG=trace QTYPE_LOG_FORMAT=tree cargo test -p qtype-resolver
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Targets a bare `QTYPE_LOG` level applies to.
pub const QTYPE_TARGETS: [&str; 2] = ["qtype_catalog", "qtype_resolver"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `QTYPE_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Expand a `QTYPE_LOG` value into `EnvFilter` directives.
pub fn filter_directives(value: &str) -> String {
    let value = value.trim();
    let level = match value.to_ascii_lowercase().as_str() {
        "" | "1" | "on" => "debug".to_string(),
        level @ ("error" | "warn" | "info" | "debug" | "trace") => level.to_string(),
        _ => return value.to_string(),
    };
    QTYPE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// What `init_tracing` installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// `None` defers to `RUST_LOG`.
    pub directives: Option<String>,
    pub format: LogFormat,
}

impl TracingConfig {
    /// Read `QTYPE_LOG`, `RUST_LOG` and `QTYPE_LOG_FORMAT`. `None` when
    /// logging was not asked for.
    pub fn from_env() -> Option<Self> {
        let directives = match std::env::var("QTYPE_LOG") {
            Ok(value) => Some(filter_directives(&value)),
            Err(_) if std::env::var_os("RUST_LOG").is_some() => None,
            Err(_) => return None,
        };
        let format = LogFormat::parse(&std::env::var("QTYPE_LOG_FORMAT").unwrap_or_default());
        Some(Self { directives, format })
    }

    fn filter(&self) -> EnvFilter {
        match &self.directives {
            Some(directives) => EnvFilter::builder().parse_lossy(directives),
            None => EnvFilter::from_default_env(),
        }
    }

    /// Install as the global subscriber. A subscriber that is already set
    /// wins; output goes to stderr.
    pub fn install(&self) {
        let filter = self.filter();
        let _ = match self.format {
            LogFormat::Tree => {
                let tree_layer = tracing_tree::HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_deferred_spans(true)
                    .with_bracketed_fields(true);
                Registry::default().with(filter).with(tree_layer).try_init()
            }
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr);
                Registry::default().with(filter).with(json_layer).try_init()
            }
            LogFormat::Text => {
                let text_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
                Registry::default().with(filter).with(text_layer).try_init()
            }
        };
    }
}

/// Install the subscriber described by the environment, if any. Safe to
/// call from every test.
pub fn init_tracing() {
    if let Some(config) = TracingConfig::from_env() {
        config.install();
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
