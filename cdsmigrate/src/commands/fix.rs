//! Fix preview: print sources with every suggestion applied.
//!
//! Source files are only read. The rewritten text goes to the writer.

use crate::analyzer::{EmptyUnitPolicy, Migrator};
use crate::utils::normalize_display_path;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

/// Options for the fix command.
#[derive(Debug, Default, Clone)]
pub struct FixOptions {
    /// Print only the before and after text of each finding.
    pub diff_only: bool,
}

/// Prints the rewritten text of every file under `paths` that has findings.
///
/// Returns exit code 1 when a file could not be rewritten.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn run_fix<W: Write>(
    migrator: Migrator,
    paths: &[PathBuf],
    options: &FixOptions,
    writer: &mut W,
) -> Result<i32> {
    let migrator = migrator.with_empty_unit_policy(EmptyUnitPolicy::Omit);
    let report = migrator.scan_paths(paths);

    if !report.has_findings() {
        writeln!(writer, "{}", "[OK] Nothing to fix.".green())?;
        return Ok(0);
    }

    let mut exit_code = 0;
    for result in &report.results {
        let display = normalize_display_path(std::path::Path::new(&result.unit.meta.inc_name));
        writeln!(
            writer,
            "{} {} ({} findings)",
            "---".dimmed(),
            display.bold(),
            result.findings.len()
        )?;

        if options.diff_only {
            for finding in &result.findings {
                writeln!(writer, "@@ line {} @@", finding.line)?;
                writeln!(writer, "{}", format!("- {}", finding.detail.original_statement).red())?;
                for line in finding.suggestion.lines() {
                    writeln!(writer, "{}", format!("+ {line}").green())?;
                }
            }
            continue;
        }

        match migrator
            .apply_all(&result.unit.code, &result.findings)
            .with_context(|| format!("Failed to rewrite {display}"))
        {
            Ok(fixed) => {
                writer.write_all(fixed.as_bytes())?;
                if !fixed.ends_with('\n') {
                    writeln!(writer)?;
                }
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                exit_code = 1;
            }
        }
    }

    if migrator.verbose {
        let skipped: Vec<String> = report
            .skipped_files
            .iter()
            .map(|p| normalize_display_path(p))
            .collect();
        if !skipped.is_empty() {
            eprintln!("[VERBOSE] Unreadable files: {skipped:?}");
        }
    }
    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SOURCE: &str = "DATA ls_branch TYPE j_1bbranch.\nWRITE 'done'.\n";

    #[test]
    fn test_run_fix_prints_rewritten_text_and_keeps_file() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let path = dir.path().join("zfix.abap");
        fs::write(&path, SOURCE).unwrap();

        let mut out = Vec::new();
        let code = run_fix(
            Migrator::default(),
            &[dir.path().to_path_buf()],
            &FixOptions::default(),
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 0);

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("DATA ls_branch TYPE P_BusinessPlace\n* TODO: J_1BBRANCH"));
        assert!(output.contains("WRITE 'done'."));
        assert_eq!(fs::read_to_string(&path).unwrap(), SOURCE);
    }

    #[test]
    fn test_run_fix_diff_only() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("zfix.abap"), SOURCE).unwrap();

        let mut out = Vec::new();
        run_fix(
            Migrator::default(),
            &[dir.path().to_path_buf()],
            &FixOptions { diff_only: true },
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("@@ line 1 @@"));
        assert!(output.contains("- TYPE j_1bbranch"));
        assert!(output.contains("+ TYPE P_BusinessPlace"));
        assert!(!output.contains("WRITE 'done'."));
    }
}
