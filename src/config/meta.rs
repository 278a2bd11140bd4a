//! Meta-config handling
//!
//! A meta-config is a YAML mapping whose `config_files` entry lists the
//! config files that make up a full configuration, in precedence order.

use std::convert::Infallible;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde_yaml::Value;
use tracing::info;

use super::error::ConfigError;
use super::lookup;
use super::path::ParamPath;
use super::raw::{load_raw_config, write_config};

/// Key of the file listing inside a meta-config
pub const META_CONFIG_FILES_ENTRY: &str = "config_files";

/// A loaded meta-config document
#[derive(Debug, Clone)]
pub struct MetaConfig {
    path: PathBuf,
    document: Value,
}

/// Entry to remove from a meta-config listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// Position in the listing; negative values count from the end
    Index(i64),
    /// Literal path as it appears in the listing
    Path(String),
}

impl From<&str> for RemoveTarget {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(index) => RemoveTarget::Index(index),
            Err(_) => RemoveTarget::Path(s.to_string()),
        }
    }
}

impl FromStr for RemoveTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RemoveTarget::from(s))
    }
}

impl fmt::Display for RemoveTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveTarget::Index(i) => write!(f, "{}", i),
            RemoveTarget::Path(p) => write!(f, "{}", p),
        }
    }
}

impl MetaConfig {
    /// Load a meta-config from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let document = load_raw_config(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Directory that relative listing entries are resolved against
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// The listed config files, exactly as written
    pub fn files(&self) -> Result<Vec<String>, ConfigError> {
        let entry = lookup::get_param(&self.document, &files_entry_path())?;

        let seq = match entry {
            Value::Sequence(seq) => seq,
            Value::Null => return Ok(Vec::new()),
            _ => {
                return Err(ConfigError::Config(format!(
                    "'{}' in {} must be a list of file paths",
                    META_CONFIG_FILES_ENTRY,
                    self.path.display()
                )))
            }
        };

        seq.iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    ConfigError::Config(format!(
                        "'{}' in {} contains a non-string entry",
                        META_CONFIG_FILES_ENTRY,
                        self.path.display()
                    ))
                })
            })
            .collect()
    }

    /// Listed files resolved to usable paths
    pub fn resolved_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let base = self.base_dir();
        Ok(self
            .files()?
            .into_iter()
            .map(|f| {
                let path = PathBuf::from(f);
                if path.is_absolute() {
                    path
                } else {
                    base.join(path)
                }
            })
            .collect())
    }

    /// Append files to the listing.
    ///
    /// Relative paths are made absolute against `cwd`. Every file must exist;
    /// nothing is changed if any of them is missing. Returns the added entries.
    pub fn add<P: AsRef<Path>>(&mut self, files: &[P], cwd: &Path) -> Result<Vec<String>, ConfigError> {
        let mut listing = self.files()?;

        let mut added = Vec::with_capacity(files.len());
        for file in files {
            let file = file.as_ref();
            let absolute = if file.is_absolute() {
                file.to_path_buf()
            } else {
                normalize(&cwd.join(file))
            };
            if !absolute.is_file() {
                return Err(ConfigError::FileNotFound(absolute));
            }
            let entry = absolute.to_str().ok_or_else(|| {
                ConfigError::Config(format!("path {} is not valid UTF-8", absolute.display()))
            })?;
            added.push(entry.to_string());
        }

        listing.extend(added.iter().cloned());
        self.set_files(listing)?;
        Ok(added)
    }

    /// Remove entries from the listing.
    ///
    /// Targets apply in order, each against the listing left by the previous
    /// ones. Nothing is changed if any target doesn't match. Returns the
    /// removed entries.
    pub fn remove(&mut self, targets: &[RemoveTarget]) -> Result<Vec<String>, ConfigError> {
        let mut listing = self.files()?;

        let mut removed = Vec::with_capacity(targets.len());
        for target in targets {
            let position = match target {
                RemoveTarget::Index(i) => resolve_index(*i, listing.len()),
                RemoveTarget::Path(p) => listing.iter().position(|f| f == p),
            };
            let Some(position) = position else {
                return Err(ConfigError::Config(format!(
                    "config file {} was not found in the meta-config",
                    target
                )));
            };
            removed.push(listing.remove(position));
        }

        self.set_files(listing)?;
        Ok(removed)
    }

    /// Write the meta-config back to where it was loaded from
    pub fn save(&self) -> Result<(), ConfigError> {
        write_config(&self.document, &self.path)
    }

    fn set_files(&mut self, files: Vec<String>) -> Result<(), ConfigError> {
        let map = match &mut self.document {
            Value::Mapping(map) => map,
            _ => {
                return Err(ConfigError::Config(format!(
                    "meta-config {} is not a mapping",
                    self.path.display()
                )))
            }
        };
        map.insert(
            Value::from(META_CONFIG_FILES_ENTRY),
            Value::Sequence(files.into_iter().map(Value::from).collect()),
        );
        Ok(())
    }
}

/// Return the listing of a meta-config file
pub fn meta_config_files(meta_config: &Path) -> Result<Vec<String>, ConfigError> {
    MetaConfig::load(meta_config)?.files()
}

/// Add config files to a meta-config and write it back
pub fn meta_config_add<P: AsRef<Path>>(
    meta_config: &Path,
    files: &[P],
    cwd: &Path,
) -> Result<Vec<String>, ConfigError> {
    let mut meta = MetaConfig::load(meta_config)?;
    let added = meta.add(files, cwd)?;
    meta.save()?;
    info!(meta_config = %meta_config.display(), count = added.len(), "added config files");
    Ok(added)
}

/// Remove config files from a meta-config and write it back
pub fn meta_config_remove(
    meta_config: &Path,
    targets: &[RemoveTarget],
) -> Result<Vec<String>, ConfigError> {
    let mut meta = MetaConfig::load(meta_config)?;
    let removed = meta.remove(targets)?;
    meta.save()?;
    info!(meta_config = %meta_config.display(), count = removed.len(), "removed config files");
    Ok(removed)
}

fn files_entry_path() -> ParamPath {
    ParamPath::from(&[META_CONFIG_FILES_ENTRY][..])
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Lexically normalize a path: drop `.` and fold `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn meta_in(dir: &TempDir, contents: &str) -> MetaConfig {
        let path = dir.path().join("meta.yaml");
        fs::write(&path, contents).unwrap();
        MetaConfig::load(&path).unwrap()
    }

    #[test]
    fn test_files_listing() {
        let dir = TempDir::new().unwrap();
        let meta = meta_in(&dir, "config_files:\n  - a.yaml\n  - /etc/b.yaml\n");
        assert_eq!(meta.files().unwrap(), vec!["a.yaml", "/etc/b.yaml"]);
    }

    #[test]
    fn test_resolved_files_relative_to_meta_dir() {
        let dir = TempDir::new().unwrap();
        let meta = meta_in(&dir, "config_files:\n  - a.yaml\n  - /etc/b.yaml\n");
        let resolved = meta.resolved_files().unwrap();
        assert_eq!(resolved[0], dir.path().join("a.yaml"));
        assert_eq!(resolved[1], PathBuf::from("/etc/b.yaml"));
    }

    #[test]
    fn test_missing_entry() {
        let dir = TempDir::new().unwrap();
        let meta = meta_in(&dir, "other: 1\n");
        let err = meta.files().unwrap_err();
        assert!(err.to_string().contains("{ config_files }"));
    }

    #[test]
    fn test_null_entry_is_empty_listing() {
        let dir = TempDir::new().unwrap();
        let meta = meta_in(&dir, "config_files:\n");
        assert!(meta.files().unwrap().is_empty());
    }

    #[test]
    fn test_non_list_entry() {
        let dir = TempDir::new().unwrap();
        let meta = meta_in(&dir, "config_files: a.yaml\n");
        assert!(matches!(meta.files().unwrap_err(), ConfigError::Config(_)));
    }

    #[test]
    fn test_add_relative_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/new.yaml"), "x: 1\n").unwrap();
        let mut meta = meta_in(&dir, "config_files: []\n");

        let added = meta.add(&["./sub/../sub/new.yaml"], dir.path()).unwrap();

        let expected = dir.path().join("sub/new.yaml");
        assert_eq!(added, vec![expected.to_str().unwrap().to_string()]);
        assert_eq!(meta.files().unwrap(), added);
    }

    #[test]
    fn test_add_missing_file_changes_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("real.yaml"), "x: 1\n").unwrap();
        let mut meta = meta_in(&dir, "config_files: [a.yaml]\n");

        let err = meta.add(&["real.yaml", "ghost.yaml"], dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::FileNotFound(_)));
        assert_eq!(meta.files().unwrap(), vec!["a.yaml"]);
    }

    #[test]
    fn test_remove_by_path_and_index() {
        let dir = TempDir::new().unwrap();
        let mut meta = meta_in(&dir, "config_files: [a.yaml, b.yaml, c.yaml, d.yaml]\n");

        let removed = meta
            .remove(&[
                RemoveTarget::Path("b.yaml".to_string()),
                RemoveTarget::Index(0),
                RemoveTarget::Index(-1),
            ])
            .unwrap();

        assert_eq!(removed, vec!["b.yaml", "a.yaml", "d.yaml"]);
        assert_eq!(meta.files().unwrap(), vec!["c.yaml"]);
    }

    #[test]
    fn test_indices_shift_after_each_removal() {
        let dir = TempDir::new().unwrap();
        let mut meta = meta_in(&dir, "config_files: [a.yaml, b.yaml, c.yaml]\n");

        let removed = meta
            .remove(&[RemoveTarget::Index(0), RemoveTarget::Index(0)])
            .unwrap();

        assert_eq!(removed, vec!["a.yaml", "b.yaml"]);
    }

    #[test]
    fn test_remove_unknown_path() {
        let dir = TempDir::new().unwrap();
        let mut meta = meta_in(&dir, "config_files: [a.yaml]\n");

        let err = meta.remove(&[RemoveTarget::Path("z.yaml".to_string())]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "config file z.yaml was not found in the meta-config"
        );
        assert_eq!(meta.files().unwrap(), vec!["a.yaml"]);
    }

    #[test]
    fn test_remove_index_out_of_range() {
        let dir = TempDir::new().unwrap();
        let mut meta = meta_in(&dir, "config_files: [a.yaml]\n");

        let err = meta.remove(&[RemoveTarget::Index(3)]).unwrap_err();
        assert!(matches!(err, ConfigError::Config(_)));
        assert!(meta.remove(&[RemoveTarget::Index(-2)]).is_err());
    }

    #[test]
    fn test_remove_target_parsing() {
        assert_eq!("2".parse::<RemoveTarget>().unwrap(), RemoveTarget::Index(2));
        assert_eq!("-1".parse::<RemoveTarget>().unwrap(), RemoveTarget::Index(-1));
        assert_eq!(
            "cfg/a.yaml".parse::<RemoveTarget>().unwrap(),
            RemoveTarget::Path("cfg/a.yaml".to_string())
        );
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let mut meta = meta_in(&dir, "note: lab A\nconfig_files: [a.yaml, b.yaml]\n");
        meta.remove(&[RemoveTarget::Index(1)]).unwrap();
        meta.save().unwrap();

        let reloaded = MetaConfig::load(meta.path()).unwrap();
        assert_eq!(reloaded.files().unwrap(), vec!["a.yaml"]);
        assert_eq!(reloaded.document()["note"], Value::from("lab A"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
    }
}
