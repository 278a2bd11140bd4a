//! Loaded configuration set
//!
//! The combined view of every file listed by a meta-config, keyed by the
//! resolved file path in listing order, with the provenance of each file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_yaml::Value;
use tracing::{debug, info};

use super::defaults::default_meta_config_path;
use super::error::ConfigError;
use super::lookup;
use super::merge::merge_documents;
use super::meta::MetaConfig;
use super::path::ParamPath;
use super::raw::{load_with_digest, write_config};

/// Provenance of a loaded config file
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfigSource {
    /// Resolved file path
    pub path: PathBuf,

    /// SHA-256 digest of raw file bytes
    pub digest: String,
}

/// A config file and its parsed document
#[derive(Debug, Clone, Serialize)]
pub struct ConfigEntry {
    pub source: ConfigSource,
    pub config: Value,
}

/// All config documents listed by one meta-config
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSet {
    /// Meta-config the set was loaded from
    pub meta_config: PathBuf,

    /// When the set was loaded
    pub loaded_at: DateTime<Utc>,

    /// Member files in listing order
    pub entries: Vec<ConfigEntry>,
}

impl ConfigSet {
    pub fn new(meta_config: PathBuf) -> Self {
        Self {
            meta_config,
            loaded_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    /// Load every file listed by the meta-config at `meta_config`
    pub fn load(meta_config: &Path) -> Result<Self, ConfigError> {
        let meta = MetaConfig::load(meta_config)?;
        let mut set = Self::new(meta_config.to_path_buf());

        for path in meta.resolved_files()? {
            let (config, digest) = load_with_digest(&path)?;
            set.insert(ConfigSource { path, digest }, config);
        }

        info!(
            meta_config = %meta_config.display(),
            files = set.entries.len(),
            "loaded configuration"
        );
        Ok(set)
    }

    /// Add a document. A path that is already present keeps its position
    /// and has its document replaced.
    pub fn insert(&mut self, source: ConfigSource, config: Value) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.source.path == source.path) {
            debug!(path = %source.path.display(), "config file listed twice, replacing");
            existing.source = source;
            existing.config = config;
        } else {
            self.entries.push(ConfigEntry { source, config });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths of the member files in listing order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.source.path.as_path())
    }

    /// Document of a member file
    pub fn document(&self, path: &Path) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.source.path == path)
            .map(|e| &e.config)
    }

    /// Look up a parameter.
    ///
    /// The first file whose top level holds `path[0]` is searched; later
    /// files are never consulted even if the rest of the path is missing.
    /// Returns the value and the file it came from.
    pub fn get_param(&self, path: &ParamPath) -> Result<(&Value, &Path), ConfigError> {
        let entry = &self.entries[self.owner_index(path)?];
        let value = lookup::get_param(&entry.config, path)?;
        Ok((value, entry.source.path.as_path()))
    }

    /// Replace an existing parameter in the file that owns it.
    ///
    /// Only the in-memory document changes; call [`ConfigSet::save_file`]
    /// with the returned path to persist it.
    pub fn set_param(&mut self, path: &ParamPath, value: Value) -> Result<PathBuf, ConfigError> {
        let index = self.owner_index(path)?;
        let entry = &mut self.entries[index];
        *lookup::get_param_mut(&mut entry.config, path)? = value;
        debug!(path = %path, file = %entry.source.path.display(), "updated parameter");
        Ok(entry.source.path.clone())
    }

    /// Write one member document back to its file
    pub fn save_file(&self, path: &Path) -> Result<(), ConfigError> {
        let config = self.document(path).ok_or_else(|| {
            ConfigError::Config(format!(
                "config file {} is not part of the loaded configuration",
                path.display()
            ))
        })?;
        write_config(config, path)
    }

    /// All documents merged in listing order, later files taking precedence
    pub fn merged(&self) -> Value {
        merge_documents(self.entries.iter().map(|e| e.config.clone()))
    }

    fn owner_index(&self, path: &ParamPath) -> Result<usize, ConfigError> {
        let first = path
            .first()
            .ok_or_else(|| ConfigError::entry_not_found(path))?;
        self.entries
            .iter()
            .position(|e| lookup::contains_root_key(&e.config, first))
            .ok_or_else(|| ConfigError::entry_not_found(path))
    }
}

/// Load the configuration described by a meta-config.
///
/// Uses the default meta-config location when `meta_config` is `None`.
pub fn load_config(meta_config: Option<&Path>) -> Result<ConfigSet, ConfigError> {
    match meta_config {
        Some(path) => ConfigSet::load(path),
        None => ConfigSet::load(&default_meta_config_path()?),
    }
}
