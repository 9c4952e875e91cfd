//! End-to-end tests for scanning and rewriting through the public API.
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use cdsmigrate::analyzer::{CodeUnit, EmptyUnitPolicy, Migrator, UnitMeta};
use cdsmigrate::fix::{ByteRangeRewriter, Edit, RewriteError};
use cdsmigrate::rules::matcher::scan;
use cdsmigrate::rules::registry::{MappingSpec, Registry};
use cdsmigrate::rules::remediation::suggest;
use cdsmigrate::utils::{line_of, snippet_at};
use serde_json::Value;

const COMMENT: &str = "* TODO: J_1BBRANCH is obsolete in S/4HANA (SAP Note 3404390). \
                       Use released CDS view P_BusinessPlace instead. Adjust field mappings accordingly.";

// =============================================================================
// Registry gating
// =============================================================================

#[test]
fn test_unregistered_tables_never_produce_findings() {
    let code = "SELECT * FROM mara.\nDATA x TYPE t001.\nTABLES bkpf.\nINNER JOIN vbak ON 1 = 1.";
    assert_eq!(scan(code).count(), 4);
    assert!(Migrator::default().scan_code(code).is_empty());
}

#[test]
fn test_lookup_ignores_case() {
    let migrator = Migrator::default();
    for code in ["TABLES J_1BBRANCH.", "tables j_1bbranch.", "Tables J_1bBranch."] {
        assert_eq!(migrator.scan_code(code).len(), 1, "{code}");
    }
}

// =============================================================================
// Suggestion shapes
// =============================================================================

#[test]
fn test_select_rewrite_discards_projection() {
    let registry = Registry::builtin();
    let suggestion = suggest(&registry, "SELECT bukrs branch name FROM ", "J_1BBRANCH").unwrap();
    assert_eq!(suggestion, format!("SELECT * FROM P_BusinessPlace\n{COMMENT}"));
}

#[test]
fn test_non_select_shapes_keep_keywords() {
    let registry = Registry::builtin();
    let cases = [
        ("TYPE ", "TYPE P_BusinessPlace"),
        ("LIKE ", "LIKE P_BusinessPlace"),
        ("TYPE TABLE OF ", "TYPE TABLE OF P_BusinessPlace"),
        ("like table of ", "like table of P_BusinessPlace"),
        ("TABLES ", "TABLES P_BusinessPlace"),
        ("JOIN ", "JOIN P_BusinessPlace"),
    ];
    for (prefix, expected) in cases {
        let suggestion = suggest(&registry, prefix, "j_1bbranch").unwrap();
        assert_eq!(suggestion, format!("{expected}\n{COMMENT}"), "{prefix}");
    }
}

// =============================================================================
// Whole example
// =============================================================================

#[test]
fn test_two_statement_example() {
    let code = "DATA: lt_tab TYPE TABLE OF J_1BBRANCH.\nSELECT * FROM J_1BBRANCH WHERE bukrs = '1000'.";
    let unit = CodeUnit::from_code(code).with_meta(UnitMeta {
        pgm_name: "ZBRANCH_REPORT".to_owned(),
        inc_name: "ZBRANCH_REPORT".to_owned(),
        kind: "PROG".to_owned(),
        name: "ZBRANCH_REPORT".to_owned(),
        start_line: 1,
        end_line: 2,
    });
    let findings = Migrator::default().scan_unit(&unit);
    assert_eq!(findings.len(), 2);

    assert_eq!(findings[0].line, 1);
    assert_eq!(
        findings[0].suggestion,
        format!("TYPE TABLE OF P_BusinessPlace\n{COMMENT}")
    );
    assert_eq!(findings[0].detail.original_statement, "TYPE TABLE OF J_1BBRANCH");

    assert_eq!(findings[1].line, 2);
    assert_eq!(
        findings[1].suggestion,
        format!("SELECT * FROM P_BusinessPlace\n{COMMENT}")
    );
    assert_eq!(findings[1].detail.original_statement, "SELECT * FROM J_1BBRANCH");

    for finding in &findings {
        assert_eq!(finding.unit, unit.meta);
        assert_eq!(finding.detail.replacement_resource, "P_BusinessPlace");
        assert!(!finding.snippet.contains('\n'));
    }
}

#[test]
fn test_finding_json_shape() {
    let findings = Migrator::default().scan_code("TABLES j_1bbranch.");
    let value: Value = serde_json::to_value(&findings[0]).unwrap();
    for key in [
        "pgm_name",
        "inc_name",
        "type",
        "name",
        "start_line",
        "end_line",
        "issue_type",
        "severity",
        "line",
        "message",
        "suggestion",
        "snippet",
        "meta",
        "span",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(value["meta"]["original_resource"], "j_1bbranch");
    assert_eq!(value["meta"]["original_statement"], "TABLES j_1bbranch");
    assert_eq!(value["span"]["start"], 0);
    assert_eq!(value["span"]["end"], 17);
}

#[test]
fn test_empty_input_has_no_findings_and_rewrites_to_itself() {
    let migrator = Migrator::default();
    assert!(migrator.scan_code("").is_empty());
    assert_eq!(migrator.apply_all("", &[]).unwrap(), "");
}

// =============================================================================
// Location and context
// =============================================================================

#[test]
fn test_line_offset_round_trip() {
    let code = "REPORT z.\n\nSELECT * FROM j_1bbranch.\n  TABLES j_1bbranch.";
    for finding in Migrator::default().scan_code(code) {
        let line_start = code[..finding.span.start].rfind('\n').map_or(0, |i| i + 1);
        assert_eq!(line_of(code, line_start), finding.line);
        assert_eq!(line_of(code, finding.span.start), finding.line);
    }
}

#[test]
fn test_snippet_window() {
    let text = format!("{}TABLES j_1bbranch.{}", "a".repeat(100), "b".repeat(100));
    let snippet = snippet_at(&text, 100, 117, 60);
    assert_eq!(snippet.len(), 60 + 17 + 60);
    assert!(snippet.starts_with('a'));
    assert!(snippet.ends_with('b'));
}

// =============================================================================
// Rewriting
// =============================================================================

#[test]
fn test_span_rewrite_matches_forward_splice() {
    let source = "0123456789abcdefghij";
    let edits = vec![
        Edit::new(15, 18, "XY"),
        Edit::new(2, 4, "long replacement"),
        Edit::new(8, 8, "+"),
    ];

    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits(edits.clone());
    let rewritten = rewriter.apply().unwrap();

    let mut sorted = edits;
    sorted.sort_by_key(|e| e.start_byte);
    let mut expected = String::new();
    let mut cursor = 0;
    for edit in &sorted {
        expected.push_str(&source[cursor..edit.start_byte]);
        expected.push_str(&edit.replacement);
        cursor = edit.end_byte;
    }
    expected.push_str(&source[cursor..]);

    assert_eq!(rewritten, expected);
}

#[test]
fn test_overlap_rejected_adjacent_accepted() {
    let mut overlapping = ByteRangeRewriter::new("abcdefgh");
    overlapping.add_edits([Edit::new(0, 4, "X"), Edit::new(3, 6, "Y")]);
    assert!(matches!(
        overlapping.apply(),
        Err(RewriteError::OverlappingEdits { .. })
    ));

    let mut adjacent = ByteRangeRewriter::new("abcdefgh");
    adjacent.add_edits([Edit::new(0, 4, "X"), Edit::new(4, 6, "Y")]);
    assert_eq!(adjacent.apply().unwrap(), "XYgh");
}

#[test]
fn test_apply_all_on_scanned_findings() {
    let code = "SELECT bukrs FROM j_1bbranch INTO TABLE @DATA(lt).\nDATA ls TYPE j_1bbranch.";
    let migrator = Migrator::default();
    let findings = migrator.scan_code(code);
    let fixed = migrator.apply_all(code, &findings).unwrap();
    assert_eq!(
        fixed,
        format!(
            "SELECT * FROM P_BusinessPlace\n{COMMENT} INTO TABLE @DATA(lt).\nDATA ls TYPE P_BusinessPlace\n{COMMENT}."
        )
    );
}

// =============================================================================
// Batches and custom registries
// =============================================================================

#[test]
fn test_batch_policy_and_order() {
    let units = vec![
        CodeUnit::from_code("TABLES t001."),
        CodeUnit::from_code("TABLES j_1bbranch."),
        CodeUnit::from_code(""),
        CodeUnit::from_code("DATA x LIKE j_1bbranch."),
    ];
    let migrator = Migrator::default();

    let omitted = migrator.scan_batch(&units, EmptyUnitPolicy::Omit);
    assert_eq!(omitted.len(), 2);
    assert_eq!(omitted[0].unit.code, "TABLES j_1bbranch.");
    assert_eq!(omitted[1].unit.code, "DATA x LIKE j_1bbranch.");

    let included = migrator.scan_batch(&units, EmptyUnitPolicy::Include);
    assert_eq!(included.len(), 4);
    assert!(included[2].findings.is_empty());
}

#[test]
fn test_custom_registry() {
    let registry = Registry::from_mappings(&[
        MappingSpec::new("T001W", "I_Plant").with_note("1111111"),
        MappingSpec::new("KNA1", "I_Customer"),
    ])
    .unwrap();
    let migrator = Migrator::default().with_registry(registry);
    let findings = migrator.scan_code("SELECT * FROM kna1.\nTABLES t001w.\nTABLES j_1bbranch.");
    assert_eq!(findings.len(), 2);
    assert!(findings[0].suggestion.starts_with("SELECT * FROM I_Customer\n* TODO: KNA1"));
    assert!(findings[1].message.ends_with("per SAP Note 1111111."));
}
