//! Path utilities for cdsmigrate.
//!
//! - Cross-platform path normalization
//! - Output path containment checks
//! - ABAP source discovery with gitignore support

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;
use std::path::{Component, Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use cdsmigrate::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\zreport.abap")), "src/zreport.abap");
/// assert_eq!(normalize_display_path(Path::new("./src/zinclude.abap")), "src/zinclude.abap");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Validates that an output path doesn't escape the allowed root.
///
/// When `root` is `None`, the current working directory is the boundary.
/// The longest existing ancestor is canonicalized to resolve symlinks, and
/// the not-yet-existing remainder may not contain `..`.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or the path escapes it.
pub fn validate_output_path(path: &Path, root: Option<&Path>) -> anyhow::Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    let root_dir = root.unwrap_or(&current_dir);
    let canonical_root = root_dir.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize root directory {}: {}",
            root_dir.display(),
            e
        )
    })?;

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    let mut ancestor = absolute_path.as_path();
    while !ancestor.exists() {
        match ancestor.parent() {
            Some(p) => ancestor = p,
            None => break,
        }
    }

    let canonical_ancestor = ancestor.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize ancestor path {}: {}",
            ancestor.display(),
            e
        )
    })?;

    if !canonical_ancestor.starts_with(&canonical_root) {
        anyhow::bail!(
            "Output path '{}' is outside '{}'.\n\
             Hint: Use a relative path like './findings.json' or run the command from the target directory.",
            normalize_display_path(&canonical_ancestor),
            normalize_display_path(&canonical_root)
        );
    }

    if let Ok(remainder) = absolute_path.strip_prefix(ancestor) {
        if remainder
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            anyhow::bail!(
                "Security Error: Path contains '..' in non-existent portion: '{}'",
                path.display()
            );
        }
    }

    Ok(absolute_path)
}

/// Collects ABAP source files below `root` with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude and the
/// global gitignore in addition to the default exclusions. A `root` that is a
/// file is returned as-is regardless of its extension.
///
/// # Arguments
/// * `root` - File or directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `extensions` - File extensions (without dot) treated as sources
/// * `verbose` - Whether to print walk errors to stderr
#[must_use]
pub fn collect_source_files_gitignore(
    root: &Path,
    exclude: &[String],
    extensions: &[String],
    verbose: bool,
) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let excludes_for_filter: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    let root_for_filter = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !is_excluded(name, &excludes_for_filter))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                let path = entry.path();
                let is_source = path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| {
                    extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext))
                });
                if is_source {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => {
                if verbose {
                    eprintln!("[VERBOSE] Walk error: {e}");
                }
            }
        }
    }

    files.sort();
    files
}
