//! YAML configuration system
//!
//! Loads a meta-config, which lists the config files making up the full
//! configuration, and exposes the listed documents for lookup, editing
//! and merging:
//! 1. Raw file access (load / write a single YAML document)
//! 2. Meta-config listing (list / add / remove files)
//! 3. Parameter lookup along a key path
//! 4. Deep merge into a single document

mod defaults;
mod error;
mod lookup;
mod merge;
mod meta;
mod path;
mod raw;
mod set;

pub use defaults::{default_meta_config_path, META_CONFIG_ENV, META_CONFIG_FILE_NAME};
pub use error::ConfigError;
pub use lookup::{get_param, get_param_mut};
pub use merge::{deep_merge, merge_documents};
pub use meta::{
    meta_config_add, meta_config_files, meta_config_remove, MetaConfig, RemoveTarget,
    META_CONFIG_FILES_ENTRY,
};
pub use path::ParamPath;
pub use raw::{load_raw_config, load_with_digest, parse_document, write_config};
pub use set::{load_config, ConfigEntry, ConfigSet, ConfigSource};
