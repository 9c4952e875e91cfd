use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;
use crate::rules::registry::{MappingSpec, Registry, RegistryError};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for cdsmigrate.
    pub cdsmigrate: CdsMigrateConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for cdsmigrate.
pub struct CdsMigrateConfig {
    /// Keep units without findings in batch output.
    pub include_empty_units: Option<bool>,
    /// Bytes of context on each side of a snippet.
    pub snippet_context: Option<usize>,
    /// File extensions scanned when walking directories.
    pub extensions: Option<Vec<String>>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// Exit with status 1 when any finding is reported.
    pub fail_on_findings: Option<bool>,
    /// Extra obsolete table mappings.
    #[serde(default)]
    pub mappings: Vec<MappingSpec>,
}

impl Config {
    /// Loads configuration from the current directory or its ancestors.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// A file that exists but does not parse is skipped, and the search
    /// continues with the parent directory.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }
        // Relative paths run out of components before reaching the filesystem root.
        if let Ok(absolute) = current.canonicalize() {
            current = absolute;
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Builds the active registry: built-in mappings plus configured ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured mapping is invalid or two configured
    /// mappings share an obsolete name.
    pub fn registry(&self) -> Result<Registry, RegistryError> {
        Registry::builtin_with(&self.cdsmigrate.mappings)
    }
}
