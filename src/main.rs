//! nspyre-config CLI
//!
//! Entry point for the `nspyre-config` command-line tool.

use clap::{ArgAction, Parser, Subcommand};
use nspyre_config::config::{default_meta_config_path, parse_document};
use nspyre_config::{
    load_config, meta_config_add, meta_config_files, meta_config_remove, logging, ConfigError,
    ParamPath, RemoveTarget,
};
use serde::Serialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "nspyre-config")]
#[command(about = "Inspect and edit nspyre YAML configuration", version)]
struct Cli {
    /// Path to the meta-config (default: $NSPYRE_META_CONFIG or ~/.config/nspyre/client_meta_config.yaml)
    #[arg(long, short = 'm', global = true)]
    meta_config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the config files of the meta-config
    Files {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Add config files to the meta-config
    Add {
        /// Files to add (relative paths are resolved against the current directory)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Remove config files from the meta-config
    Remove {
        /// Listing index (negative counts from the end) or file path as listed
        #[arg(required = true, allow_negative_numbers = true)]
        targets: Vec<String>,
    },

    /// Look up a parameter
    Get {
        /// Key path, either dotted (`sg.address`) or as separate words
        #[arg(required = true)]
        key: Vec<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Replace an existing parameter and save the file that holds it
    Set {
        /// Dotted key path
        key: String,

        /// New value, parsed as YAML
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Print the loaded configuration
    Show {
        /// Print all files merged into one document
        #[arg(long)]
        merged: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let meta_config = match cli.meta_config {
        Some(path) => path,
        None => default_meta_config_path().unwrap_or_else(|e| fail(&e)),
    };

    let result = match cli.command {
        Commands::Files { json } => run_files(&meta_config, json),
        Commands::Add { files } => run_add(&meta_config, &files),
        Commands::Remove { targets } => run_remove(&meta_config, &targets),
        Commands::Get { key, json } => run_get(&meta_config, &key, json),
        Commands::Set { key, value } => run_set(&meta_config, &key, &value),
        Commands::Show { merged, json } => run_show(&meta_config, merged, json),
    };

    if let Err(e) = result {
        fail(&e);
    }
}

fn fail(err: &ConfigError) -> ! {
    eprintln!("Error: {}", err);
    process::exit(err.exit_code());
}

fn run_files(meta_config: &Path, json_output: bool) -> Result<(), ConfigError> {
    let files = meta_config_files(meta_config)?;

    if json_output {
        print_json(&files);
    } else if files.is_empty() {
        println!("No config files listed in {}", meta_config.display());
    } else {
        for (i, file) in files.iter().enumerate() {
            println!("{:>3}  {}", i, file);
        }
    }
    Ok(())
}

fn run_add(meta_config: &Path, files: &[PathBuf]) -> Result<(), ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;

    for added in meta_config_add(meta_config, files, &cwd)? {
        println!("Added: {}", added);
    }
    Ok(())
}

fn run_remove(meta_config: &Path, targets: &[String]) -> Result<(), ConfigError> {
    let targets: Vec<RemoveTarget> = targets.iter().map(|t| RemoveTarget::from(t.as_str())).collect();

    for removed in meta_config_remove(meta_config, &targets)? {
        println!("Removed: {}", removed);
    }
    Ok(())
}

fn run_get(meta_config: &Path, key: &[String], json_output: bool) -> Result<(), ConfigError> {
    let set = load_config(Some(meta_config))?;
    let path = ParamPath::from_args(key);
    let (value, owner) = set.get_param(&path)?;

    eprintln!("# from {}", owner.display());
    if json_output {
        print_json(value);
    } else {
        print_yaml(value)?;
    }
    Ok(())
}

fn run_set(meta_config: &Path, key: &str, raw_value: &str) -> Result<(), ConfigError> {
    let value = parse_document(raw_value)
        .map_err(|e| ConfigError::Config(format!("invalid YAML value '{}': {}", raw_value, e)))?;

    let mut set = load_config(Some(meta_config))?;
    let path = ParamPath::parse_dotted(key);
    let owner = set.set_param(&path, value)?;
    set.save_file(&owner)?;

    println!("Updated {} in {}", path, owner.display());
    Ok(())
}

fn run_show(meta_config: &Path, merged: bool, json_output: bool) -> Result<(), ConfigError> {
    let set = load_config(Some(meta_config))?;

    if merged {
        let value = set.merged();
        if json_output {
            print_json(&value);
        } else {
            print_yaml(&value)?;
        }
        return Ok(());
    }

    if json_output {
        print_json(&set);
        return Ok(());
    }

    if set.is_empty() {
        println!("No config files listed in {}", meta_config.display());
        return Ok(());
    }

    for entry in &set.entries {
        println!("# {}", entry.source.path.display());
        print_yaml(&entry.config)?;
        println!();
    }
    Ok(())
}

fn print_yaml(value: &Value) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(value)?;
    print!("{}", yaml);
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
