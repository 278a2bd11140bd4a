//! Raw YAML file access
//!
//! Reads and writes single config documents without interpreting them.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::error::ConfigError;

/// Load a config document from a YAML file.
///
/// An empty file yields `Value::Null`.
pub fn load_raw_config(path: &Path) -> Result<Value, ConfigError> {
    load_with_digest(path).map(|(value, _)| value)
}

/// Load a config document and the SHA-256 digest (hex) of its raw bytes
pub fn load_with_digest(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path).map_err(|e| ConfigError::io(path, e))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::Config(format!("{} is not valid UTF-8: {}", path.display(), e)))?;

    let value = parse_document(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), %digest, "loaded config file");
    Ok((value, digest))
}

/// Parse a YAML document from a string
pub fn parse_document(contents: &str) -> Result<Value, serde_yaml::Error> {
    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(contents)
}

/// Write a config document to a YAML file, replacing its contents
pub fn write_config(value: &Value, path: &Path) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(value)?;
    fs::write(path, yaml).map_err(|e| ConfigError::io(path, e))?;
    debug!(path = %path.display(), "wrote config file");
    Ok(())
}
