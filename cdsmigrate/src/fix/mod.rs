//! Span-based rewriting of source buffers.
//!
//! The core component is `ByteRangeRewriter`, which applies edits using
//! byte offsets. It backs `Migrator::apply_all` and the `fix` command.

mod rewriter;

pub use rewriter::{ByteRangeRewriter, Edit, RewriteError};
