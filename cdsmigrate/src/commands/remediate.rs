//! Batch remediation: JSON array of code units in, unit results out.

use super::utils::read_input;
use crate::analyzer::{CodeUnit, EmptyUnitPolicy, Migrator};
use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;

/// Parses a JSON array of code units.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of units.
pub fn parse_units(json: &str) -> Result<Vec<CodeUnit>> {
    serde_json::from_str(json).context("Input must be a JSON array of code units")
}

/// Reads units from `input` (or `stdin`), scans them and writes the results.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or writing fails.
pub fn run_remediate<R: Read, W: Write>(
    migrator: &Migrator,
    input: Option<&Path>,
    policy: EmptyUnitPolicy,
    pretty: bool,
    stdin: &mut R,
    writer: &mut W,
) -> Result<i32> {
    let content = read_input(input, stdin)?;
    let units = parse_units(&content)?;
    if migrator.verbose {
        eprintln!("[VERBOSE] Received {} units", units.len());
    }

    let results = migrator.scan_batch(&units, policy);
    let json = if pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    writeln!(writer, "{json}")?;
    Ok(0)
}
