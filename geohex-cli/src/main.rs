//! geohex CLI - Command-line interface
//!
//! This binary provides a command-line interface to the geohex library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::common::GridArgs;
use commands::config::ConfigCommands;
use commands::generate::GenerateArgs;
use commands::locate::LocateArgs;
use error::CliError;
use geohex::coord::{parse_point, GeoPoint};

#[derive(Parser)]
#[command(name = "geohex")]
#[command(version = geohex::VERSION)]
#[command(about = "Hexagonal pitch-class tessellation over UTM zones", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream the tessellation of a region as WKT lines
    Generate {
        #[command(flatten)]
        grid: GridArgs,

        /// Output file (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Mirror log output to stderr
        #[arg(long, short)]
        verbose: bool,

        /// Enable debug-level logging
        #[arg(long)]
        debug: bool,
    },

    /// Print the pitch class of the cell containing a point
    Locate {
        #[command(flatten)]
        grid: GridArgs,

        /// Point as LON,LAT in degrees
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        point: GeoPoint,

        /// Mirror log output to stderr
        #[arg(long, short)]
        verbose: bool,

        /// Enable debug-level logging
        #[arg(long)]
        debug: bool,
    },

    /// Manage ~/.geohex/config.ini
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        e.exit();
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Generate {
            grid,
            output,
            verbose,
            debug,
        } => commands::generate::run(GenerateArgs {
            grid,
            output,
            verbose,
            debug,
        }),
        Commands::Locate {
            grid,
            point,
            verbose,
            debug,
        } => commands::locate::run(LocateArgs {
            grid,
            point,
            verbose,
            debug,
        }),
        Commands::Config { command } => commands::config::run(command),
    }
}
