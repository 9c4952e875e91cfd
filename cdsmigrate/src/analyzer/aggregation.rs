//! Folding matches into findings, and unit results into batch output.

use super::types::{BatchSummary, CodeUnit, EmptyUnitPolicy, UnitResult};
use crate::constants::{ISSUE_TYPE_OBSOLETE_TABLE, SEVERITY_WARNING};
use crate::rules::matcher::TableMatch;
use crate::rules::registry::Registry;
use crate::rules::remediation::remediate;
use crate::rules::{Finding, FindingDetail};
use crate::utils::{snippet_at, LineIndex};

/// Build findings for the matches of one unit.
///
/// Matches whose table is not in the registry contribute nothing.
#[must_use]
pub fn aggregate<'src>(
    unit: &'src CodeUnit,
    matches: impl IntoIterator<Item = TableMatch<'src>>,
    registry: &Registry,
    snippet_context: usize,
) -> Vec<Finding> {
    let source = unit.code.as_str();
    let mut line_index: Option<LineIndex> = None;
    let mut findings = Vec::new();

    for m in matches {
        let Some(remediation) = remediate(registry, m.statement_prefix, m.resource_name) else {
            continue;
        };
        let entry = remediation.entry;
        let line = line_index
            .get_or_insert_with(|| LineIndex::new(source))
            .line_index(m.span.start);

        findings.push(Finding {
            unit: unit.meta.clone(),
            issue_type: ISSUE_TYPE_OBSOLETE_TABLE.to_owned(),
            severity: SEVERITY_WARNING.to_owned(),
            line,
            message: format!(
                "Obsolete table {} used. Replace with CDS view {} per SAP Note {}.",
                m.resource_name, entry.replacement_name, entry.note
            ),
            suggestion: remediation.suggestion,
            snippet: snippet_at(source, m.span.start, m.span.end, snippet_context),
            detail: FindingDetail {
                original_resource: m.resource_name.to_owned(),
                replacement_resource: entry.replacement_name.clone(),
                original_statement: m.statement(source).trim().to_owned(),
            },
            span: m.span,
        });
    }

    findings
}

/// Apply the empty-unit policy to scanned units, keeping input order.
#[must_use]
pub fn collect_results(
    results: Vec<UnitResult>,
    policy: EmptyUnitPolicy,
) -> (Vec<UnitResult>, BatchSummary) {
    let mut summary = BatchSummary::default();
    let mut kept = Vec::with_capacity(results.len());
    for result in results {
        summary.record(&result);
        if policy.keeps(&result) {
            kept.push(result);
        }
    }
    (kept, summary)
}
