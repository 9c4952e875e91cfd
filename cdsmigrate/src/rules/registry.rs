//! Registry of obsolete tables and their released replacements.
//!
//! The registry is built once and then only read. Lookups ignore case, and
//! every entry carries a precompiled whole-word pattern so the remediation
//! step never has to compile a regex per match.

use crate::constants::{BUILTIN_MAPPINGS, DEFAULT_NOTE, IDENTIFIER_RE};
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two entries share the same obsolete name (ignoring case).
    #[error("Duplicate obsolete table in registry: {0}")]
    DuplicateEntry(String),
    /// A name is empty or contains non-identifier characters.
    #[error("Invalid table or view name: {0:?}")]
    InvalidName(String),
}

/// A single obsolete-to-replacement mapping as declared by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSpec {
    /// Obsolete table name.
    pub obsolete: String,
    /// Released CDS view that replaces it.
    pub replacement: String,
    /// SAP Note cited in the migration comment.
    #[serde(default = "default_note")]
    pub note: String,
}

fn default_note() -> String {
    DEFAULT_NOTE.to_owned()
}

impl MappingSpec {
    /// Create a mapping citing the default SAP Note.
    #[must_use]
    pub fn new(obsolete: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            obsolete: obsolete.into(),
            replacement: replacement.into(),
            note: default_note(),
        }
    }

    /// Set the SAP Note cited for this mapping.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// A validated registry entry.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Obsolete table name, upper-cased.
    pub obsolete_name: String,
    /// Replacement view name, as declared.
    pub replacement_name: String,
    /// SAP Note identifier.
    pub note: String,
    /// Case-insensitive whole-word pattern for the obsolete name.
    word_re: Regex,
}

impl RegistryEntry {
    fn from_spec(spec: &MappingSpec) -> Result<Self, RegistryError> {
        for name in [&spec.obsolete, &spec.replacement] {
            if !IDENTIFIER_RE().is_match(name) {
                return Err(RegistryError::InvalidName(name.clone()));
            }
        }
        let obsolete_name = spec.obsolete.to_uppercase();
        let word_re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&obsolete_name)))
            .map_err(|_| RegistryError::InvalidName(spec.obsolete.clone()))?;
        Ok(Self {
            obsolete_name,
            replacement_name: spec.replacement.clone(),
            note: spec.note.clone(),
            word_re,
        })
    }

    /// Replace every whole-word occurrence of the obsolete name in `text`.
    #[must_use]
    pub fn replace_whole_words(&self, text: &str) -> String {
        self.word_re
            .replace_all(text, regex::NoExpand(&self.replacement_name))
            .into_owned()
    }
}

/// Immutable lookup table of obsolete tables.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    by_name: FxHashMap<String, usize>,
}

impl Registry {
    /// Build a registry from mapping declarations.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is invalid or two mappings share an obsolete name.
    pub fn from_mappings<'a>(
        mappings: impl IntoIterator<Item = &'a MappingSpec>,
    ) -> Result<Self, RegistryError> {
        let mut entries = Vec::new();
        let mut by_name = FxHashMap::default();
        for spec in mappings {
            let entry = RegistryEntry::from_spec(spec)?;
            if by_name.contains_key(&entry.obsolete_name) {
                return Err(RegistryError::DuplicateEntry(entry.obsolete_name));
            }
            by_name.insert(entry.obsolete_name.clone(), entries.len());
            entries.push(entry);
        }
        Ok(Self { entries, by_name })
    }

    /// The built-in mappings shipped with the tool.
    #[must_use]
    pub fn builtin_mappings() -> Vec<MappingSpec> {
        BUILTIN_MAPPINGS
            .iter()
            .map(|(old, new, note)| MappingSpec::new(*old, *new).with_note(*note))
            .collect()
    }

    /// Registry holding only the built-in mappings.
    ///
    /// # Panics
    ///
    /// Panics if the built-in mapping table is invalid.
    #[must_use]
    pub fn builtin() -> Self {
        #[allow(clippy::expect_used)] // Static table validated by tests
        Self::from_mappings(&Self::builtin_mappings()).expect("Invalid built-in registry")
    }

    /// Built-in mappings extended by `extra`. An extra mapping with the same
    /// obsolete name as a built-in one replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if `extra` is invalid or repeats an obsolete name.
    pub fn builtin_with(extra: &[MappingSpec]) -> Result<Self, RegistryError> {
        let overridden: Vec<String> = extra.iter().map(|m| m.obsolete.to_uppercase()).collect();
        let merged: Vec<MappingSpec> = Self::builtin_mappings()
            .into_iter()
            .filter(|m| !overridden.contains(&m.obsolete.to_uppercase()))
            .chain(extra.iter().cloned())
            .collect();
        Self::from_mappings(&merged)
    }

    /// Look up an obsolete table, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&RegistryEntry> {
        self.by_name
            .get(&name.to_uppercase())
            .map(|&idx| &self.entries[idx])
    }

    /// All entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
