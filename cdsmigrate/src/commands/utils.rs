//! Shared utilities for command implementations.

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

/// Writes output to either a file or a writer.
///
/// A file path must stay inside `root` (or the current directory).
pub fn write_output<W: Write>(
    writer: &mut W,
    content: &str,
    output_file: Option<&str>,
    root: Option<&Path>,
) -> Result<()> {
    if let Some(path) = output_file {
        let target = crate::utils::validate_output_path(Path::new(path), root)?;
        let mut file = fs::File::create(&target)
            .with_context(|| format!("Failed to create {}", target.display()))?;
        writeln!(file, "{content}")?;
    } else {
        writeln!(writer, "{content}")?;
    }
    Ok(())
}

/// Reads all of `input`, or all of `stdin` when `input` is absent or `-`.
pub fn read_input<R: Read>(input: Option<&Path>, stdin: &mut R) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_input_dash_uses_stdin() {
        let mut stdin = "[]".as_bytes();
        let content = read_input(Some(Path::new("-")), &mut stdin).unwrap();
        assert_eq!(content, "[]");
    }

    #[test]
    fn test_read_input_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("units.json");
        fs::write(&path, "[{}]").unwrap();
        let mut stdin = "ignored".as_bytes();
        assert_eq!(read_input(Some(&path), &mut stdin).unwrap(), "[{}]");
    }

    #[test]
    fn test_write_output_to_file_inside_root() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.json");
        let mut sink = Vec::new();
        write_output(
            &mut sink,
            "[]",
            Some(target.to_str().unwrap()),
            Some(dir.path()),
        )
        .unwrap();
        assert!(sink.is_empty());
        assert_eq!(fs::read_to_string(target).unwrap(), "[]\n");
    }
}
