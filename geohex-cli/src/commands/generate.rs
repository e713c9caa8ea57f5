//! Generate command - stream a tessellation as WKT lines.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use geohex::export::write_wkt;
use tracing::info;

use super::common::{build_generator, GridArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the generate command.
pub struct GenerateArgs {
    pub grid: GridArgs,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub debug: bool,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose, args.debug)?;
    runner.log_startup("generate");

    let generator = build_generator(&args.grid, runner.config())?;
    let start = Instant::now();

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|error| CliError::FileWrite {
                path: path.display().to_string(),
                error,
            })?;
            let count = write_wkt(&mut BufWriter::new(file), generator)?;
            println!("Wrote {} cells to {}", count, path.display());
            count
        }
        None => {
            let stdout = io::stdout();
            let count = write_wkt(&mut BufWriter::new(stdout.lock()), generator)?;
            // stdout carries the cells
            eprintln!("Wrote {} cells", count);
            count
        }
    };

    info!(
        cells = written,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Generate finished"
    );
    Ok(())
}
