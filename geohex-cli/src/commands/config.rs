//! Configuration management CLI commands.
//!
//! Provides `config path`, `config list` and `config init` for inspecting
//! and creating ~/.geohex/config.ini.

use clap::Subcommand;
use geohex::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// List all configuration settings
    List,

    /// Write a default configuration file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::List => run_list(),
        ConfigCommands::Init => run_init(),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// List all configuration settings.
fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    println!();
    println!("[tessellation]");
    println!("  cell_size = {}", config.tessellation.cell_size);
    println!("  region_tolerance = {}", config.tessellation.region_tolerance);
    println!("  lookup_tolerance = {}", config.tessellation.lookup_tolerance);
    println!();
    println!("[rule]");
    println!("  west = {}", config.rule.west);
    println!("  south_east = {}", config.rule.south_east);
    println!("  south_west = {}", config.rule.south_west);
    println!();
    println!("[logging]");
    println!("  file = {}", config.logging.file.display());

    Ok(())
}

/// Create the default config file.
fn run_init() -> Result<(), CliError> {
    let existed = config_file_path().exists();
    let path = ConfigFile::ensure_exists()?;

    if existed {
        println!("Configuration already exists: {}", path.display());
    } else {
        println!("Created configuration: {}", path.display());
    }
    Ok(())
}
