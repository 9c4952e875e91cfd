use crate::analyzer::{BatchSummary, ScanReport, UnitResult};
use crate::rules::registry::Registry;
use crate::rules::Finding;
use crate::utils::normalize_display_path;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let defaults = crate::constants::DEFAULT_EXCLUDE_FOLDERS();
        let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
        sorted_defaults.sort_unstable();
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            sorted_defaults.join(", ").dimmed()
        )?;
    } else {
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), folders.join(", "))?;
    }
    Ok(())
}

/// Create a progress bar with file count.
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("scanning...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Obsolete Table Usage Results          ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print summary with colored "pills".
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_pills(
    writer: &mut impl Write,
    summary: &BatchSummary,
    skipped: usize,
) -> std::io::Result<()> {
    fn pill(label: &str, count: usize) -> String {
        if count == 0 {
            format!("{}: {}", label, count.to_string().green())
        } else {
            format!("{}: {}", label, count.to_string().red().bold())
        }
    }

    writeln!(
        writer,
        "{}  {}  {}",
        pill("Findings", summary.total_findings),
        pill("Affected units", summary.units_with_findings),
        pill("Unreadable", skipped),
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Print scan statistics (units and lines processed).
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_scan_stats(writer: &mut impl Write, summary: &BatchSummary) -> std::io::Result<()> {
    writeln!(
        writer,
        "{}",
        format!(
            "Scanned {} files ({} lines)",
            summary.total_units.to_string().bold(),
            summary.total_lines.to_string().bold()
        )
        .dimmed()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Helper to map severity string to Comfy Table Color
fn get_severity_color(severity: &str) -> Color {
    match severity.to_uppercase().as_str() {
        "ERROR" => Color::Red,
        "WARNING" => Color::Yellow,
        "INFO" => Color::Blue,
        _ => Color::White,
    }
}

/// Where a finding is, for display.
fn finding_location(finding: &Finding) -> String {
    let unit = &finding.unit;
    if unit.inc_name.is_empty() {
        format!("line {}", finding.line)
    } else {
        // Unit lines are relative to the unit; shift into the include.
        let offset = unit.start_line.saturating_sub(1);
        format!(
            "{}:{}",
            normalize_display_path(std::path::Path::new(&unit.inc_name)),
            finding.line + offset
        )
    }
}

/// Print every finding in a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_findings(
    writer: &mut impl Write,
    title: &str,
    results: &[UnitResult],
) -> std::io::Result<()> {
    let findings: Vec<&Finding> = results.iter().flat_map(|r| &r.findings).collect();
    if findings.is_empty() {
        return Ok(());
    }

    writeln!(writer, "\n{}", title.bold().underline())?;

    let mut table = create_table(vec!["Table", "Replacement", "Location", "Statement", "Severity"]);

    for f in findings {
        table.add_row(vec![
            Cell::new(&f.detail.original_resource).add_attribute(Attribute::Bold),
            Cell::new(&f.detail.replacement_resource).fg(Color::Green),
            Cell::new(finding_location(f)),
            Cell::new(&f.detail.original_statement).add_attribute(Attribute::Dim),
            Cell::new(&f.severity).fg(get_severity_color(&f.severity)),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print files that could not be read.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_skipped_files(
    writer: &mut impl Write,
    skipped: &[std::path::PathBuf],
) -> std::io::Result<()> {
    if skipped.is_empty() {
        return Ok(());
    }
    writeln!(writer, "\n{}", "Unreadable Files".bold().underline())?;
    for path in skipped {
        writeln!(writer, "  {}", normalize_display_path(path).red())?;
    }
    Ok(())
}

/// Print the full scan report.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_report(writer: &mut impl Write, report: &ScanReport) -> std::io::Result<()> {
    print_header(writer)?;
    print_summary_pills(writer, &report.summary, report.skipped_files.len())?;
    print_scan_stats(writer, &report.summary)?;

    if !report.has_findings() {
        writeln!(writer, "{}", "[OK] No obsolete tables found!".green().bold())?;
    } else {
        print_findings(writer, "Obsolete Tables", &report.results)?;
    }
    print_skipped_files(writer, &report.skipped_files)?;
    Ok(())
}

/// Print the active registry.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_registry(writer: &mut impl Write, registry: &Registry) -> std::io::Result<()> {
    let mut table = create_table(vec!["Obsolete Table", "Replacement", "SAP Note"]);
    for entry in registry.entries() {
        table.add_row(vec![
            Cell::new(&entry.obsolete_name).add_attribute(Attribute::Bold),
            Cell::new(&entry.replacement_name).fg(Color::Green),
            Cell::new(&entry.note),
        ]);
    }
    writeln!(writer, "{table}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Migrator;
    use std::path::Path;

    fn report() -> ScanReport {
        let migrator = Migrator::default();
        let result = migrator.scan_source(
            "REPORT zdemo.\nTABLES j_1bbranch.\n",
            Path::new("./src/zdemo.abap"),
        );
        let mut summary = BatchSummary::default();
        summary.record(&result);
        ScanReport {
            results: vec![result],
            summary,
            skipped_files: Vec::new(),
        }
    }

    #[test]
    fn test_print_report_lists_findings() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        print_report(&mut buffer, &report()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Findings: 1"));
        assert!(output.contains("j_1bbranch"));
        assert!(output.contains("P_BusinessPlace"));
        assert!(output.contains("src/zdemo.abap:2"));
    }

    #[test]
    fn test_print_report_clean() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        print_report(&mut buffer, &ScanReport::default()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("No obsolete tables found"));
    }

    #[test]
    fn test_print_registry() {
        let mut buffer = Vec::new();
        print_registry(&mut buffer, &Registry::builtin()).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("J_1BBRANCH"));
        assert!(output.contains("3404390"));
    }
}
