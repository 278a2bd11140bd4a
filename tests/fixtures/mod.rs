//! Test fixtures for config tree tests
//!
//! Builds a scratch directory holding a meta-config and the config files it
//! lists, laid out the way a lab machine would have them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Instrument server settings
pub const INSTRUMENTS_YAML: &str = r#"
instrument_server:
  port: 42068
  devices:
    sg:
      driver: lantz.drivers.sg396.SG396
      address: TCPIP::192.168.1.20::INSTR
    daq:
      driver: nidaqmx.Task
      channels: [ai0, ai1]
"#;

/// Data server settings
pub const DATASERV_YAML: &str = r#"
data_server:
  address: localhost
  port: 30000
"#;

/// Local overrides reusing a root key already owned by an earlier file
pub const OVERRIDES_YAML: &str = r#"
data_server:
  port: 31000
  timeout: 5
"#;

/// Scratch config tree rooted in a temporary directory
pub struct ConfigTree {
    dir: TempDir,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the tree root, creating parent directories
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    /// Write `meta.yaml` listing the given entries verbatim
    pub fn meta(&self, entries: &[&str]) -> PathBuf {
        let mut contents = String::from("config_files:\n");
        for entry in entries {
            contents.push_str(&format!("  - {}\n", entry));
        }
        self.write("meta.yaml", &contents)
    }

    /// Standard lab layout: two relative entries plus an absolute one
    pub fn standard(&self) -> PathBuf {
        self.write("instruments.yaml", INSTRUMENTS_YAML);
        self.write("servers/dataserv.yaml", DATASERV_YAML);
        let overrides = self.write("local/overrides.yaml", OVERRIDES_YAML);
        let overrides = overrides.to_str().expect("temp path is UTF-8").to_string();
        self.meta(&["instruments.yaml", "servers/dataserv.yaml", &overrides])
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).expect("Failed to read fixture")
    }
}
