//! Processing methods for the `Migrator`.
//!
//! Contains: `scan_unit`, `scan_batch`, `scan_source`, `scan_paths`, `apply_all`

use super::aggregation::{aggregate, collect_results};
use super::types::{BatchSummary, CodeUnit, EmptyUnitPolicy, UnitMeta, UnitResult};
use super::Migrator;
use crate::fix::{ByteRangeRewriter, Edit, RewriteError};
use crate::rules::matcher::scan;
use crate::rules::Finding;
use crate::utils::{collect_source_files_gitignore, normalize_display_path};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of files read and scanned per parallel chunk.
const CHUNK_SIZE: usize = 500;

/// Unit kind given to whole-file units.
const FILE_UNIT_KIND: &str = "FILE";

/// Outcome of scanning files on disk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Unit results, one per scanned file, filtered by the empty-unit policy.
    pub results: Vec<UnitResult>,
    /// Totals over every scanned file.
    pub summary: BatchSummary,
    /// Files that could not be read.
    pub skipped_files: Vec<PathBuf>,
}

impl ScanReport {
    /// Whether any finding was reported.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.summary.total_findings > 0
    }
}

impl Migrator {
    /// Scans one unit and returns its findings in source order.
    #[must_use]
    pub fn scan_unit(&self, unit: &CodeUnit) -> Vec<Finding> {
        aggregate(unit, scan(&unit.code), &self.registry, self.snippet_context)
    }

    /// Scans bare source text with empty metadata.
    #[must_use]
    pub fn scan_code(&self, code: &str) -> Vec<Finding> {
        self.scan_unit(&CodeUnit::from_code(code))
    }

    /// Scans one unit and pairs it with its findings.
    #[must_use]
    pub fn analyze_unit(&self, unit: &CodeUnit) -> UnitResult {
        UnitResult {
            findings: self.scan_unit(unit),
            unit: unit.clone(),
        }
    }

    /// Scans a batch in parallel, keeping input order.
    #[must_use]
    pub fn scan_batch(&self, units: &[CodeUnit], policy: EmptyUnitPolicy) -> Vec<UnitResult> {
        self.scan_batch_with_summary(units, policy).0
    }

    /// Like `scan_batch`, also returning totals over every unit received.
    #[must_use]
    pub fn scan_batch_with_summary(
        &self,
        units: &[CodeUnit],
        policy: EmptyUnitPolicy,
    ) -> (Vec<UnitResult>, BatchSummary) {
        let results: Vec<UnitResult> = units
            .par_iter()
            .map(|unit| self.analyze_unit(unit))
            .collect();
        if self.verbose {
            eprintln!("[VERBOSE] Scanned {} units", results.len());
        }
        collect_results(results, policy)
    }

    /// Scans the contents of one file as a single unit.
    ///
    /// The program name is the file stem and the include name is the
    /// display path.
    #[must_use]
    pub fn scan_source(&self, source: &str, path: &Path) -> UnitResult {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unit = CodeUnit::from_code(source).with_meta(UnitMeta {
            pgm_name: stem.clone(),
            inc_name: normalize_display_path(path),
            kind: FILE_UNIT_KIND.to_owned(),
            name: stem,
            start_line: 1,
            end_line: source.lines().count(),
        });
        self.analyze_unit(&unit)
    }

    /// Walks `paths` and scans every source file found.
    ///
    /// An empty `paths` scans the current directory. Files that cannot be
    /// read are listed in the report and never abort the scan.
    #[must_use]
    pub fn scan_paths(&self, paths: &[PathBuf]) -> ScanReport {
        let files = self.collect_files(paths);
        if self.verbose {
            eprintln!("[VERBOSE] Found {} source files", files.len());
        }
        if let Some(pb) = &self.progress_bar {
            pb.set_length(files.len() as u64);
        }

        let mut scanned = Vec::with_capacity(files.len());
        let mut skipped_files = Vec::new();
        for chunk in files.chunks(CHUNK_SIZE) {
            let chunk_results: Vec<Result<UnitResult, PathBuf>> = chunk
                .par_iter()
                .map(|file_path| self.scan_file(file_path))
                .collect();
            for outcome in chunk_results {
                match outcome {
                    Ok(result) => scanned.push(result),
                    Err(path) => skipped_files.push(path),
                }
            }
        }

        let (results, summary) = collect_results(scanned, self.empty_unit_policy);
        ScanReport {
            results,
            summary,
            skipped_files,
        }
    }

    /// Collects source files from every path, without duplicates.
    fn collect_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let default_root = [PathBuf::from(".")];
        let roots = if paths.is_empty() {
            &default_root[..]
        } else {
            paths
        };

        let mut files = Vec::new();
        for root in roots {
            if !root.exists() {
                if self.verbose {
                    eprintln!("[VERBOSE] Path does not exist: {}", root.display());
                }
                continue;
            }
            files.extend(collect_source_files_gitignore(
                root,
                &self.exclude_folders,
                &self.extensions,
                self.verbose,
            ));
        }
        files.sort();
        files.dedup();
        files
    }

    /// Reads and scans one file, returning the path back when unreadable.
    fn scan_file(&self, file_path: &Path) -> Result<UnitResult, PathBuf> {
        let outcome = match fs::read_to_string(file_path) {
            Ok(source) => Ok(self.scan_source(&source, file_path)),
            Err(e) => {
                if self.verbose {
                    eprintln!("[VERBOSE] Skipping {}: {e}", file_path.display());
                }
                Err(file_path.to_path_buf())
            }
        };
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
        outcome
    }

    /// Applies the suggestion of every finding to `text` at its span.
    ///
    /// `findings` must come from scanning `text`. An empty slice returns the
    /// text unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if two findings overlap or a span does not fit `text`.
    pub fn apply_all(&self, text: &str, findings: &[Finding]) -> Result<String, RewriteError> {
        let mut rewriter = ByteRangeRewriter::new(text);
        rewriter.add_edits(findings.iter().map(|finding| {
            Edit::from_span(finding.span, finding.suggestion.as_str())
                .with_description(finding.message.as_str())
        }));
        rewriter.apply()
    }

    /// Scans `code` and applies every suggestion, returning the new text and
    /// the findings it was built from.
    ///
    /// # Errors
    ///
    /// Returns an error if the rewrite fails.
    pub fn fix_code(&self, code: &str) -> Result<(String, Vec<Finding>), RewriteError> {
        let findings = self.scan_code(code);
        let fixed = self.apply_all(code, &findings)?;
        Ok((fixed, findings))
    }
}
