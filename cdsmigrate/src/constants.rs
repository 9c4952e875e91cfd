use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the project-level configuration file.
pub const CONFIG_FILENAME: &str = ".cdsmigrate.toml";

/// Issue type attached to every obsolete-table finding.
pub const ISSUE_TYPE_OBSOLETE_TABLE: &str = "ObsoleteTableUsage";

/// Severity attached to every obsolete-table finding.
pub const SEVERITY_WARNING: &str = "warning";

/// SAP Note cited when a mapping does not name its own.
pub const DEFAULT_NOTE: &str = "3404390";

/// Bytes of context kept on each side of a match in a snippet.
pub const DEFAULT_SNIPPET_CONTEXT: usize = 60;

/// Marker that starts a full-line ABAP comment.
pub const ABAP_COMMENT_MARKER: char = '*';

/// Built-in obsolete table mappings: `(obsolete, replacement, note)`.
pub const BUILTIN_MAPPINGS: &[(&str, &str, &str)] = &[("J_1BBRANCH", "P_BusinessPlace", DEFAULT_NOTE)];

/// Regex recognizing the statement shapes that name a database table.
///
/// Alternatives are tried in order at each position, so `SELECT ... FROM`
/// and `TYPE TABLE OF` win over the bare `TYPE`/`LIKE` form.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_table_usage_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(
            r"(?isx)
            \b
            (?P<keyword>
                SELECT\b.*?\bFROM\b\s+
              | JOIN\b\s+
              | TABLES\b\s+
              | (?:TYPE|LIKE)\b\s+TABLE\s+OF\s+
              | (?:TYPE|LIKE)\b\s+
            )
            (?P<table>\w+)",
        )
        .expect("Invalid table usage regex pattern")
    })
}

/// Regex for a valid registry identifier (letters, digits, underscore).
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"^\w+$").expect("Invalid identifier regex pattern"))
}

/// File extensions treated as ABAP sources when walking directories.
pub fn get_default_extensions() -> &'static [&'static str] {
    &["abap"]
}

/// Folders skipped by default when walking directories.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert(".git");
        s.insert(".abapgit");
        s.insert("node_modules");
        s.insert("target");
        s.insert("build");
        s.insert("dist");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_default_extensions as DEFAULT_EXTENSIONS;
pub use get_identifier_re as IDENTIFIER_RE;
pub use get_table_usage_re as TABLE_USAGE_RE;
