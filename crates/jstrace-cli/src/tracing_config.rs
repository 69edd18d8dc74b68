//! Tracing configuration.
//!
//! Supports three output formats controlled by `JSTRACE_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, follows the
//!   recursion of the stack-trace analyzer
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Human-readable tree
//! JSTRACE_LOG=debug JSTRACE_LOG_FORMAT=tree jstrace analyze program.json
//!
//! # Only the resolver
//! JSTRACE_LOG="jstrace_analyzer::extractors=trace" jstrace analyze program.json
//!
//! # Analyzer recursion as a tree, with the default filter
//! JSTRACE_LOG_FORMAT=tree jstrace analyze program.json
//! ```
//!
//! The subscriber is only initialised when `JSTRACE_LOG`, `RUST_LOG` or
//! `JSTRACE_LOG_FORMAT` is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `JSTRACE_LOG_FORMAT` value. Unknown values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Filter used when only `JSTRACE_LOG_FORMAT` is set: the resolver and
/// analyzer events, plus per-file progress from the driver.
pub const DEFAULT_FILTER: &str = "jstrace_analyzer=debug,jstrace_cli=info";

/// Filter directives from the logging environment, or `None` to stay silent.
///
/// `JSTRACE_LOG` wins over `RUST_LOG`. When neither is set but a format was
/// requested, [`DEFAULT_FILTER`] is used.
pub fn filter_directives(
    jstrace_log: Option<String>,
    rust_log: Option<String>,
    log_format: Option<&str>,
) -> Option<String> {
    jstrace_log
        .or(rust_log)
        .or_else(|| log_format.map(|_| DEFAULT_FILTER.to_string()))
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when none of `JSTRACE_LOG`, `RUST_LOG` or `JSTRACE_LOG_FORMAT`
/// is set. All output goes to stderr so it never mixes with the JSON written
/// to stdout.
pub fn init_tracing() {
    let log_format = std::env::var("JSTRACE_LOG_FORMAT").ok();
    let Some(directives) = filter_directives(
        std::env::var("JSTRACE_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
        log_format.as_deref(),
    ) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);

    match LogFormat::parse(log_format.as_deref().unwrap_or_default()) {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
