//! Default meta-config location

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use super::error::ConfigError;

/// Environment variable overriding the default meta-config path
pub const META_CONFIG_ENV: &str = "NSPYRE_META_CONFIG";

/// File name of the client meta-config
pub const META_CONFIG_FILE_NAME: &str = "client_meta_config.yaml";

/// Directory (relative to `$HOME`) holding the client meta-config
pub const META_CONFIG_DIR: &str = ".config/nspyre";

/// Resolve the default meta-config path from the environment
pub fn default_meta_config_path() -> Result<PathBuf, ConfigError> {
    resolve_meta_config_path(env::var_os(META_CONFIG_ENV), env::var_os("HOME"))
}

/// `$NSPYRE_META_CONFIG` wins; otherwise `~/.config/nspyre/client_meta_config.yaml`
pub(crate) fn resolve_meta_config_path(
    override_path: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let home = home.filter(|h| !h.is_empty()).ok_or_else(|| {
        ConfigError::io(
            META_CONFIG_FILE_NAME,
            io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set"),
        )
    })?;

    Ok(PathBuf::from(home)
        .join(META_CONFIG_DIR)
        .join(META_CONFIG_FILE_NAME))
}
