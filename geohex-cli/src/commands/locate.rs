//! Locate command - find the cell that contains a point.

use geohex::coord::GeoPoint;
use geohex::geo_index::CellIndex;
use tracing::info;

use super::common::{build_generator, GridArgs};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the locate command.
pub struct LocateArgs {
    pub grid: GridArgs,
    pub point: GeoPoint,
    pub verbose: bool,
    pub debug: bool,
}

/// Run the locate command.
///
/// Materializes the whole grid, then answers a single point query.
pub fn run(args: LocateArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.verbose, args.debug)?;
    runner.log_startup("locate");

    let generator = build_generator(&args.grid, runner.config())?;
    let index = CellIndex::build(generator)?;
    info!(cells = index.len(), point = %args.point, "Grid materialized");

    let cell = index
        .locate(args.point)
        .ok_or(CliError::NotCovered(args.point))?;

    println!("{}", cell.value);
    println!("  Zone:     {}", cell.zone);
    println!("  Row:      {}", cell.row);
    println!("  Column:   {}", cell.column);
    println!("  Centroid: {}", cell.centroid);

    Ok(())
}
