//! List the active obsolete table mappings.

use crate::rules::registry::{MappingSpec, Registry};
use anyhow::Result;
use std::io::Write;

/// Prints the registry as a table or as a JSON array of mappings.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn run_registry<W: Write>(registry: &Registry, json: bool, writer: &mut W) -> Result<i32> {
    if json {
        let mappings: Vec<MappingSpec> = registry
            .entries()
            .iter()
            .map(|entry| {
                MappingSpec::new(&entry.obsolete_name, &entry.replacement_name)
                    .with_note(&entry.note)
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&mappings)?)?;
    } else {
        crate::output::print_registry(writer, registry)?;
    }
    Ok(0)
}
