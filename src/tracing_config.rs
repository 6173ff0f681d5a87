//! Tracing setup for the `esast` tool.
//!
//! Logging is off unless `ESAST_LOG` (or `RUST_LOG`) holds a filter.
//! `ESAST_LOG_FORMAT` picks the renderer: `text` (default), `tree` for
//! `tracing-tree` output that nests each layer under its merge, or `json`.
//!
//! ```bash
//! # Which layer contributed what to each kind
//! ESAST_LOG=trace ESAST_LOG_FORMAT=tree esast schema --grammar es2015
//!
//! # Merge summaries only
//! ESAST_LOG=esast_schema=debug esast check
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Anything unrecognised is `Text`.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Logging settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directives in `RUST_LOG` syntax.
    pub directives: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// Resolve settings through `lookup`; `None` means logging stays off.
    ///
    /// `ESAST_LOG` wins over `RUST_LOG`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<LogConfig> {
        let directives = lookup("ESAST_LOG").or_else(|| lookup("RUST_LOG"))?;
        let format = lookup("ESAST_LOG_FORMAT")
            .map(|name| LogFormat::parse(&name))
            .unwrap_or_default();
        Some(LogConfig { directives, format })
    }

    pub fn from_env() -> Option<LogConfig> {
        LogConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Install the global subscriber. Everything is written to stderr so
    /// schema dumps on stdout stay clean.
    pub fn install(self) {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);
        match self.format {
            LogFormat::Tree => {
                let tree_layer = tracing_tree::HierarchicalLayer::default()
                    .with_writer(std::io::stderr)
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_deferred_spans(true)
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
}

/// Install the subscriber if the environment asks for logging.
pub fn init_tracing() {
    if let Some(config) = LogConfig::from_env() {
        config.install();
    }
}
