//! Byte-range safe code rewriter.
//!
//! Applies edits from the rightmost span to the leftmost, so the offsets of
//! edits not yet applied stay valid. Overlapping edits are rejected rather
//! than spliced into already-rewritten text.
//!
//! # Usage
//!
//! ```
//! use cdsmigrate::fix::{ByteRangeRewriter, Edit};
//!
//! let source = "TABLES j_1bbranch.";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(Edit::new(7, 17, "P_BusinessPlace"));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, "TABLES P_BusinessPlace.");
//! ```

use crate::rules::matcher::Span;

/// A single edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
    /// Optional description for logging
    pub description: Option<String>,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: None,
        }
    }

    /// Create an edit replacing a span
    #[must_use]
    pub fn from_span(span: Span, replacement: impl Into<String>) -> Self {
        Self::new(span.start, span.end, replacement)
    }

    /// Attach a description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Length of the range being replaced
    #[must_use]
    pub const fn range_len(&self) -> usize {
        self.end_byte.saturating_sub(self.start_byte)
    }

    /// Check if this edit overlaps with another.
    ///
    /// Adjacent ranges do not overlap. Two insertions at the same position
    /// do, since their relative order would be ambiguous.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        if self.start_byte == self.end_byte || other.start_byte == other.end_byte {
            return self.start_byte == other.start_byte
                || (self.start_byte > other.start_byte && self.start_byte < other.end_byte)
                || (other.start_byte > self.start_byte && other.start_byte < self.end_byte);
        }
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges
    #[error("Overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds or reversed
    #[error("Edit {edit_index} out of bounds: {start_byte}..{end_byte} in source of length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// Start byte of the edit
        start_byte: usize,
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Edit range splits a multi-byte character
    #[error("Edit {edit_index} does not fall on a character boundary")]
    NotCharBoundary {
        /// Index of the bad edit
        edit_index: usize,
    },
}

/// Safe code rewriter using byte ranges
///
/// This rewriter applies edits in reverse order to preserve byte positions,
/// and validates that edits don't overlap.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    /// Original source code
    source: String,
    /// Pending edits
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Get the number of pending edits
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Check if there are any pending edits
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a character
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.start_byte > edit.end_byte || edit.end_byte > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    start_byte: edit.start_byte,
                    end_byte: edit.end_byte,
                    source_len: self.source.len(),
                });
            }
            if !self.source.is_char_boundary(edit.start_byte)
                || !self.source.is_char_boundary(edit.end_byte)
            {
                return Err(RewriteError::NotCharBoundary { edit_index: i });
            }
        }

        // Sorted neighbour check: any overlap shows up between adjacent edits.
        let mut order: Vec<usize> = (0..self.edits.len()).collect();
        order.sort_by_key(|&i| (self.edits[i].start_byte, self.edits[i].end_byte));
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if self.edits[a].overlaps(&self.edits[b]) {
                return Err(RewriteError::OverlappingEdits {
                    edit_a: a.min(b),
                    edit_b: a.max(b),
                });
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified source
    ///
    /// Edits are applied in reverse order (by start position) to preserve
    /// byte offsets as we modify the string.
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a character
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;

        // Sort by start position descending (apply from end to start)
        sorted_edits.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

        for edit in sorted_edits {
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left-to-right application that shifts later offsets by each edit's delta.
    fn apply_ascending(source: &str, mut edits: Vec<Edit>) -> String {
        edits.sort_by_key(|e| e.start_byte);
        let mut result = source.to_owned();
        let mut shift: isize = 0;
        for edit in edits {
            let start = (edit.start_byte as isize + shift) as usize;
            let end = (edit.end_byte as isize + shift) as usize;
            result.replace_range(start..end, &edit.replacement);
            shift += edit.replacement.len() as isize - edit.range_len() as isize;
        }
        result
    }

    #[test]
    fn test_simple_replacement() {
        let mut rewriter = ByteRangeRewriter::new("TABLES t001.");
        rewriter.add_edit(Edit::new(7, 11, "I_CompanyCode"));
        assert_eq!(rewriter.apply().unwrap(), "TABLES I_CompanyCode.");
    }

    #[test]
    fn test_empty_edits() {
        let source = "DATA ls TYPE t001.";
        let rewriter = ByteRangeRewriter::new(source);
        assert!(!rewriter.has_edits());
        assert_eq!(rewriter.apply().unwrap(), source);
    }

    #[test]
    fn test_descending_equals_ascending_with_shifts() {
        let source = "TABLES a. DATA x TYPE bb. SELECT * FROM ccc INTO @y.";
        let edits = vec![
            Edit::new(7, 8, "LONG_NAME_A"),
            Edit::new(22, 24, "B"),
            Edit::new(40, 43, ""),
            Edit::new(0, 0, "* header\n"),
        ];
        let mut rewriter = ByteRangeRewriter::new(source);
        rewriter.add_edits(edits.clone());
        assert_eq!(rewriter.edit_count(), 4);
        assert_eq!(rewriter.apply().unwrap(), apply_ascending(source, edits));
    }

    #[test]
    fn test_overlapping_edits_error() {
        let mut rewriter = ByteRangeRewriter::new("hello world");
        rewriter.add_edit(Edit::new(0, 8, "hi"));
        rewriter.add_edit(Edit::new(5, 10, "there"));
        assert_eq!(
            rewriter.apply(),
            Err(RewriteError::OverlappingEdits { edit_a: 0, edit_b: 1 })
        );
    }

    #[test]
    fn test_overlap_reported_regardless_of_insertion_order() {
        let mut rewriter = ByteRangeRewriter::new("abcdefghij");
        rewriter.add_edit(Edit::new(8, 9, "X"));
        rewriter.add_edit(Edit::new(4, 6, "Y"));
        rewriter.add_edit(Edit::new(0, 5, "Z"));
        assert!(matches!(
            rewriter.validate(),
            Err(RewriteError::OverlappingEdits { edit_a: 1, edit_b: 2 })
        ));
    }

    #[test]
    fn test_same_position_insertions_conflict() {
        let mut rewriter = ByteRangeRewriter::new("abc");
        rewriter.add_edit(Edit::new(1, 1, "x"));
        rewriter.add_edit(Edit::new(1, 1, "y"));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn test_insertion_inside_replacement_conflicts() {
        let mut rewriter = ByteRangeRewriter::new("abcdef");
        rewriter.add_edit(Edit::new(1, 4, "X"));
        rewriter.add_edit(Edit::new(2, 2, "y"));
        assert!(rewriter.validate().is_err());
    }

    #[test]
    fn test_adjacent_non_overlapping_edits() {
        let mut rewriter = ByteRangeRewriter::new("abcdef");
        rewriter.add_edit(Edit::new(0, 3, "XXX"));
        rewriter.add_edit(Edit::new(3, 6, "YYY"));
        rewriter.add_edit(Edit::new(6, 6, "!"));
        assert_eq!(rewriter.apply().unwrap(), "XXXYYY!");
    }

    #[test]
    fn test_out_of_bounds_error() {
        let mut rewriter = ByteRangeRewriter::new("short");
        rewriter.add_edit(Edit::new(0, 100, "long"));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OutOfBounds { .. })
        ));

        let mut rewriter = ByteRangeRewriter::new("short");
        rewriter.add_edit(Edit::new(4, 2, "x"));
        assert!(matches!(
            rewriter.apply(),
            Err(RewriteError::OutOfBounds { edit_index: 0, .. })
        ));
    }

    #[test]
    fn test_char_boundary_error() {
        let mut rewriter = ByteRangeRewriter::new("ä");
        rewriter.add_edit(Edit::new(1, 2, "a"));
        assert_eq!(
            rewriter.apply(),
            Err(RewriteError::NotCharBoundary { edit_index: 0 })
        );
    }

    #[test]
    fn test_deletion_and_insertion() {
        let mut rewriter = ByteRangeRewriter::new("hello world");
        rewriter.add_edit(Edit::new(5, 11, ""));
        rewriter.add_edit(Edit::new(0, 0, ">> "));
        assert_eq!(rewriter.apply().unwrap(), ">> hello");
    }

    #[test]
    fn test_from_span_with_description() {
        let edit = Edit::from_span(Span::new(3, 9), "V").with_description("swap table");
        assert_eq!(edit.range_len(), 6);
        assert_eq!(edit.description.as_deref(), Some("swap table"));
    }
}
