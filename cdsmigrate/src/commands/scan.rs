//! Default command: scan source files for obsolete tables.

use super::utils::write_output;
use crate::analyzer::Migrator;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Options for the scan command.
#[derive(Debug, Default, Clone)]
pub struct ScanOptions {
    /// Print unit results as JSON instead of tables.
    pub json: bool,
    /// Return exit code 1 when findings exist.
    pub fail_on_findings: bool,
    /// Write the report to this file instead of the writer.
    pub output_file: Option<String>,
    /// Containment root for `output_file`.
    pub root: Option<PathBuf>,
}

/// Scans `paths` and prints the report.
///
/// Returns the process exit code.
///
/// # Errors
///
/// Returns an error if serialization or writing the report fails.
pub fn run_scan<W: Write>(
    migrator: Migrator,
    paths: &[PathBuf],
    options: &ScanOptions,
    writer: &mut W,
) -> Result<i32> {
    let verbose = migrator.verbose && !options.json;
    let start_time = Instant::now();

    let progress = if options.json {
        None
    } else {
        Some(Arc::new(crate::output::create_progress_bar(0)))
    };
    let migrator = match &progress {
        Some(pb) => migrator.with_progress(Arc::clone(pb)),
        None => migrator,
    };

    let report = migrator.scan_paths(paths);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if verbose {
        eprintln!(
            "[VERBOSE] Scan completed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
        eprintln!("   Files scanned: {}", report.summary.total_units);
        eprintln!("   Lines scanned: {}", report.summary.total_lines);
        eprintln!("   Findings: {}", report.summary.total_findings);
        eprintln!();
    }

    if options.json {
        let content = serde_json::to_string_pretty(&report.results)?;
        write_output(
            writer,
            &content,
            options.output_file.as_deref(),
            options.root.as_deref(),
        )?;
    } else if let Some(path) = options.output_file.as_deref() {
        let mut buffer = Vec::new();
        crate::output::print_report(&mut buffer, &report)?;
        let content = String::from_utf8_lossy(&buffer);
        write_output(writer, &content, Some(path), options.root.as_deref())?;
    } else {
        crate::output::print_report(writer, &report)?;
        writeln!(
            writer,
            "\n[TIME] Completed in {:.2}s",
            start_time.elapsed().as_secs_f64()
        )?;
    }

    if options.fail_on_findings && report.has_findings() {
        if !options.json {
            eprintln!(
                "\n[GATE] Obsolete tables: {} findings - FAILED",
                report.summary.total_findings
            );
        }
        return Ok(1);
    }
    Ok(0)
}
