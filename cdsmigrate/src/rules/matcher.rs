//! Lexical matcher for statements that reference a database table.
//!
//! Recognized shapes, case-insensitive and spanning newlines:
//! - `SELECT ... FROM <table>`
//! - `JOIN <table>`
//! - `TABLES <table>`
//! - `TYPE|LIKE TABLE OF <table>`
//! - `TYPE|LIKE <table>`
//!
//! Matches never overlap: each search resumes after the previous match, so a
//! `TYPE` token inside a `SELECT ... FROM` construct is not reported again.

use crate::constants::TABLE_USAGE_RE;
use serde::Serialize;

/// Half-open byte range `[start, end)` into a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One located table reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMatch<'src> {
    /// Everything matched before the table name (keyword, projection, whitespace).
    pub statement_prefix: &'src str,
    /// The obsolete-resource name (an ABAP table) as written in the source.
    pub resource_name: &'src str,
    /// Byte span of the whole construct.
    pub span: Span,
}

impl<'src> TableMatch<'src> {
    /// The full matched statement text (`statement_prefix` + `resource_name`).
    #[must_use]
    pub fn statement<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.start..self.span.end]
    }
}

/// Iterate over every recognized table reference in `source`, left to right.
///
/// The iterator is lazy and borrows `source`; calling this twice on the same
/// text yields identical results.
pub fn scan(source: &str) -> impl Iterator<Item = TableMatch<'_>> + '_ {
    TABLE_USAGE_RE().captures_iter(source).filter_map(|caps| {
        let whole = caps.get(0)?;
        let keyword = caps.name("keyword")?;
        let table = caps.name("table")?;
        Some(TableMatch {
            statement_prefix: keyword.as_str(),
            resource_name: table.as_str(),
            span: Span::new(whole.start(), whole.end()),
        })
    })
}
