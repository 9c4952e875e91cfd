//! Builder-style methods for the `Migrator`.

use super::{EmptyUnitPolicy, Migrator};
use crate::config::Config;
use crate::rules::registry::{Registry, RegistryError};

impl Migrator {
    /// Creates an engine from a loaded configuration.
    ///
    /// Mappings from the config extend the built-in registry, and override
    /// built-in entries with the same obsolete name.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured mappings are invalid or collide.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let registry = config.registry()?;
        let section = &config.cdsmigrate;
        let mut migrator = Self::default().with_registry(registry);
        if let Some(context) = section.snippet_context {
            migrator.snippet_context = context;
        }
        if let Some(include_empty) = section.include_empty_units {
            migrator.empty_unit_policy = EmptyUnitPolicy::from_include_empty(include_empty);
        }
        if let Some(extensions) = &section.extensions {
            migrator.extensions.clone_from(extensions);
        }
        if let Some(folders) = &section.exclude_folders {
            migrator.exclude_folders.clone_from(folders);
        }
        Ok(migrator)
    }

    /// Builder-style method to set the registry.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Builder-style method to set the snippet context width.
    #[must_use]
    pub fn with_snippet_context(mut self, context: usize) -> Self {
        self.snippet_context = context;
        self
    }

    /// Builder-style method to set the empty-unit policy.
    #[must_use]
    pub fn with_empty_unit_policy(mut self, policy: EmptyUnitPolicy) -> Self {
        self.empty_unit_policy = policy;
        self
    }

    /// Builder-style method to set scanned file extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Builder-style method to add excluded folders.
    #[must_use]
    pub fn with_excludes(mut self, folders: Vec<String>) -> Self {
        self.exclude_folders.extend(folders);
        self
    }

    /// Builder-style method to set verbose mode.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builder-style method to attach a progress bar.
    #[must_use]
    pub fn with_progress(mut self, progress_bar: std::sync::Arc<indicatif::ProgressBar>) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }
}
