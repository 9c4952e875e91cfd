use crate::analyzer::types::UnitMeta;
use crate::rules::matcher::Span;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Names involved in one obsolete table reference.
pub struct FindingDetail {
    /// Table name as written in the source.
    pub original_resource: String,
    /// Released CDS view to use instead.
    pub replacement_resource: String,
    /// The matched statement text, trimmed.
    pub original_statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single obsolete table usage with its suggested remediation.
pub struct Finding {
    /// Metadata of the unit the finding belongs to.
    #[serde(flatten)]
    pub unit: UnitMeta,
    /// Kind of issue (always `ObsoleteTableUsage`).
    pub issue_type: String,
    /// Severity level.
    pub severity: String,
    /// 1-based line within the unit's code.
    pub line: usize,
    /// Description of the issue.
    pub message: String,
    /// Rewritten statement followed by the migration comment.
    pub suggestion: String,
    /// One-line excerpt around the match.
    pub snippet: String,
    /// Original and replacement names.
    #[serde(rename = "meta")]
    pub detail: FindingDetail,
    /// Byte span of the matched statement in the unit's code.
    pub span: Span,
}

/// Module containing the statement-shape matcher.
pub mod matcher;
/// Module containing the obsolete table registry.
pub mod registry;
/// Module containing replacement text generation.
pub mod remediation;
