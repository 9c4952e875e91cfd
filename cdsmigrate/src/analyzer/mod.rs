//! cdsmigrate engine module.
//!
//! This module contains the scanning engine, broken down into:
//! - `types`: Input and output records (`CodeUnit`, `UnitResult`, `BatchSummary`)
//! - `aggregation`: Turning matches into findings and batches into results
//! - `builder`: Builder-style configuration of the `Migrator`
//! - `processing`: Unit, batch, file and rewrite entry points

/// Turning matches into findings.
pub mod aggregation;
mod builder;
mod processing;
/// Input and output records.
pub mod types;

pub use aggregation::{aggregate, collect_results};
pub use processing::ScanReport;
pub use types::{BatchSummary, CodeUnit, EmptyUnitPolicy, UnitMeta, UnitResult};

use crate::constants::{DEFAULT_EXTENSIONS, DEFAULT_SNIPPET_CONTEXT};
use crate::rules::registry::Registry;

/// The scanning engine.
///
/// Holds the active registry and scan options. Scanning never mutates it, so
/// one instance can be shared across threads.
pub struct Migrator {
    /// Obsolete tables and their replacements.
    pub registry: Registry,
    /// Bytes of context on each side of a snippet.
    pub snippet_context: usize,
    /// Whether units without findings are kept in batch output.
    pub empty_unit_policy: EmptyUnitPolicy,
    /// File extensions scanned when walking directories.
    pub extensions: Vec<String>,
    /// Folders to exclude when walking directories.
    pub exclude_folders: Vec<String>,
    /// Progress bar for tracking file scans (thread-safe).
    pub progress_bar: Option<std::sync::Arc<indicatif::ProgressBar>>,
    /// Whether to enable verbose logging.
    pub verbose: bool,
}

impl Default for Migrator {
    fn default() -> Self {
        Self {
            registry: Registry::builtin(),
            snippet_context: DEFAULT_SNIPPET_CONTEXT,
            empty_unit_policy: EmptyUnitPolicy::default(),
            extensions: DEFAULT_EXTENSIONS()
                .iter()
                .map(|&ext| ext.to_owned())
                .collect(),
            exclude_folders: Vec::new(),
            progress_bar: None,
            verbose: false,
        }
    }
}
