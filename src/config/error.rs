//! Configuration errors

use std::io;
use std::path::PathBuf;

use super::path::ParamPath;

/// Errors raised while loading, querying or editing config files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config document did not contain the requested parameter
    #[error("Config file was expected to contain parameter: {{ {path} }} but it wasn't found.")]
    EntryNotFound { path: ParamPath },

    /// General config error, e.g. removing a file that isn't listed
    #[error("{0}")]
    Config(String),

    #[error("file {} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("YAML parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn entry_not_found(path: &ParamPath) -> Self {
        ConfigError::EntryNotFound { path: path.clone() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::EntryNotFound { .. } => 2,
            _ => 1,
        }
    }
}
