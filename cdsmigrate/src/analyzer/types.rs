//! Input and output records of a remediation run.

use crate::rules::Finding;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Caller metadata identifying where a block of code comes from.
///
/// Never inspected by the engine, only copied onto findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMeta {
    /// Main program name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pgm_name: String,
    /// Include name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inc_name: String,
    /// Unit kind (method, form, function module, ...).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Unit name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// First line of the unit in its include.
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_line: usize,
    /// Last line of the unit in its include.
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_line: usize,
}

/// A block of source code to scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeUnit {
    /// Caller metadata, echoed back on output.
    #[serde(flatten)]
    pub meta: UnitMeta,
    /// Source text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

impl CodeUnit {
    /// Create a unit from source text with empty metadata.
    #[must_use]
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            meta: UnitMeta::default(),
            code: code.into(),
        }
    }

    /// Set the metadata.
    #[must_use]
    pub fn with_meta(mut self, meta: UnitMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Identifier derived from program, include and unit name.
    #[must_use]
    pub fn unit_id(&self) -> String {
        format!(
            "{}/{}/{}",
            self.meta.pgm_name, self.meta.inc_name, self.meta.name
        )
    }
}

/// A scanned unit echoed back with its findings.
#[derive(Debug, Clone, Serialize)]
pub struct UnitResult {
    /// The unit as received.
    #[serde(flatten)]
    pub unit: CodeUnit,
    /// Obsolete table findings, in source order.
    pub findings: Vec<Finding>,
}

impl UnitResult {
    /// Whether any obsolete table was found.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// What to do with units that have no findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyUnitPolicy {
    /// Leave them out of the result.
    #[default]
    Omit,
    /// Keep them with an empty findings list.
    Include,
}

impl EmptyUnitPolicy {
    /// Policy from an `include_empty` flag.
    #[must_use]
    pub fn from_include_empty(include_empty: bool) -> Self {
        if include_empty {
            Self::Include
        } else {
            Self::Omit
        }
    }

    /// Whether `result` belongs in the output under this policy.
    #[must_use]
    pub fn keeps(self, result: &UnitResult) -> bool {
        match self {
            Self::Omit => result.has_findings(),
            Self::Include => true,
        }
    }
}

/// Totals over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Units received.
    pub total_units: usize,
    /// Units with at least one finding.
    pub units_with_findings: usize,
    /// Findings across all units.
    pub total_findings: usize,
    /// Source lines scanned.
    pub total_lines: usize,
}

impl BatchSummary {
    /// Fold one unit into the totals.
    pub fn record(&mut self, result: &UnitResult) {
        self.total_units += 1;
        self.total_findings += result.findings.len();
        if result.has_findings() {
            self.units_with_findings += 1;
        }
        self.total_lines += result.unit.code.lines().count();
    }
}
