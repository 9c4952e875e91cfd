//! Suggested replacement text for obsolete table references.

use crate::constants::ABAP_COMMENT_MARKER;
use crate::rules::registry::{Registry, RegistryEntry};

/// A suggested rewrite for one obsolete table reference.
#[derive(Debug, Clone)]
pub struct Remediation<'r> {
    /// Registry entry that triggered the rewrite.
    pub entry: &'r RegistryEntry,
    /// Two lines: the rewritten statement, then the migration comment.
    pub suggestion: String,
}

/// Build the migration comment for an entry.
#[must_use]
pub fn migration_comment(entry: &RegistryEntry) -> String {
    format!(
        "{ABAP_COMMENT_MARKER} TODO: {} is obsolete in S/4HANA (SAP Note {}). \
         Use released CDS view {} instead. Adjust field mappings accordingly.",
        entry.obsolete_name, entry.note, entry.replacement_name
    )
}

/// Suggest a rewrite for `statement_prefix` + `resource_name`.
///
/// Returns `None` when the table is not obsolete. `SELECT` statements are
/// rewritten to `SELECT * FROM <view>` because field names may differ between
/// the table and the view; every other shape keeps its keywords and only has
/// the table name replaced.
#[must_use]
pub fn remediate<'r>(
    registry: &'r Registry,
    statement_prefix: &str,
    resource_name: &str,
) -> Option<Remediation<'r>> {
    let entry = registry.lookup(resource_name)?;
    let comment = migration_comment(entry);

    let statement = if statement_prefix
        .trim()
        .to_uppercase()
        .starts_with("SELECT")
    {
        format!("SELECT * FROM {}", entry.replacement_name)
    } else {
        entry.replace_whole_words(&format!("{statement_prefix}{resource_name}"))
    };

    Some(Remediation {
        entry,
        suggestion: format!("{statement}\n{comment}"),
    })
}

/// Suggestion text only; see [`remediate`].
#[must_use]
pub fn suggest(registry: &Registry, statement_prefix: &str, resource_name: &str) -> Option<String> {
    remediate(registry, statement_prefix, resource_name).map(|r| r.suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::registry::MappingSpec;

    fn registry() -> Registry {
        Registry::from_mappings(&[MappingSpec::new("X", "Y")]).unwrap()
    }

    #[test]
    fn test_unknown_table_yields_nothing() {
        let registry = registry();
        for prefix in ["SELECT a FROM ", "JOIN ", "TABLES ", "TYPE TABLE OF ", "LIKE "] {
            assert!(suggest(&registry, prefix, "MARA").is_none());
            assert!(suggest(&registry, prefix, "XFOO").is_none());
        }
    }

    #[test]
    fn test_select_discards_field_list() {
        let suggestion = suggest(&registry(), "SELECT field1, field2 FROM ", "X").unwrap();
        let mut lines = suggestion.lines();
        assert_eq!(lines.next(), Some("SELECT * FROM Y"));
        assert!(lines.next().unwrap().starts_with("* TODO: X is obsolete"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_select_detection_ignores_case_and_whitespace() {
        let suggestion = suggest(&registry(), "\n  select f\nfrom ", "x").unwrap();
        assert!(suggestion.starts_with("SELECT * FROM Y\n"));
    }

    #[test]
    fn test_tables_keeps_shape() {
        let suggestion = suggest(&registry(), "TABLES ", "X").unwrap();
        assert_eq!(suggestion.lines().next(), Some("TABLES Y"));
    }

    #[test]
    fn test_type_table_of_keeps_shape() {
        let suggestion = suggest(&registry(), "type table of ", "x").unwrap();
        assert_eq!(suggestion.lines().next(), Some("type table of Y"));
    }

    #[test]
    fn test_whole_word_substitution_only() {
        // A prefix that happens to contain the name as a substring keeps it.
        let suggestion = suggest(&registry(), "JOIN ", "X").unwrap();
        assert_eq!(suggestion.lines().next(), Some("JOIN Y"));

        let registry = Registry::from_mappings(&[MappingSpec::new("TAB", "V_TAB")]).unwrap();
        let suggestion = suggest(&registry, "TABLES ", "TAB").unwrap();
        assert_eq!(suggestion.lines().next(), Some("TABLES V_TAB"));
    }

    #[test]
    fn test_comment_cites_note_and_names() {
        let registry = Registry::builtin();
        let remediation = remediate(&registry, "TABLES ", "j_1bbranch").unwrap();
        assert_eq!(remediation.entry.obsolete_name, "J_1BBRANCH");
        assert_eq!(
            remediation.suggestion,
            "TABLES P_BusinessPlace\n\
             * TODO: J_1BBRANCH is obsolete in S/4HANA (SAP Note 3404390). \
             Use released CDS view P_BusinessPlace instead. Adjust field mappings accordingly."
        );
    }
}
