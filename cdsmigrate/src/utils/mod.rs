//! Utilities module for cdsmigrate.
//!
//! Offset-to-line mapping, snippet extraction and path helpers.

mod paths;

pub use paths::{collect_source_files_gitignore, is_excluded, normalize_display_path, validate_output_path};

/// A utility struct to convert byte offsets to line numbers.
///
/// Matches are located by byte offset, but findings are reported with
/// 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    /// Uses byte iteration since '\n' is always a single byte in UTF-8.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                // Record the start of the next line (current newline index + 1)
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    ///
    /// Equals the number of newlines strictly before `offset`, plus one.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Number of lines in the indexed source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// 1-based line number of `offset` in `text`.
#[must_use]
pub fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// One-line excerpt around `[start, end)` with `context` bytes on each side.
///
/// Newlines are rendered as the two characters `\n`. The window is widened
/// to the nearest character boundary, so multi-byte text never splits.
#[must_use]
pub fn snippet_at(text: &str, start: usize, end: usize, context: usize) -> String {
    let mut s = start.saturating_sub(context).min(text.len());
    while !text.is_char_boundary(s) {
        s -= 1;
    }
    let mut e = end.saturating_add(context).min(text.len());
    while !text.is_char_boundary(e) {
        e += 1;
    }
    text[s..e].replace('\n', "\\n")
}
