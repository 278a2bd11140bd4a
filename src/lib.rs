//! nspyre-config - meta-config driven YAML configuration
//!
//! This crate loads the YAML configuration of an nspyre experiment setup.
//! A meta-config lists the individual config files; they are loaded in
//! listing order, can be queried along a key path, edited in place, and
//! merged into a single document.

pub mod config;
pub mod logging;

pub use config::{
    get_param, load_config, load_raw_config, meta_config_add, meta_config_files,
    meta_config_remove, write_config, ConfigError, ConfigSet, MetaConfig, ParamPath, RemoveTarget,
};
