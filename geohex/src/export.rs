//! Plain-text export of tessellation cells.
//!
//! One line per cell:
//!
//! ```text
//! POLYGON ((lon lat, lon lat, ...))<TAB>value<TAB>zone<TAB>row
//! ```
//!
//! The polygon is OGC Well-Known Text with coordinates in WGS84 degrees.

use std::fmt::Display;
use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::tessellation::{Cell, TessellationError};

/// Decimal places written for each coordinate (about 1 cm at the equator).
const COORD_PRECISION: usize = 7;

/// Errors that can occur while exporting cells.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing to the destination failed.
    #[error("Failed to write cells: {0}")]
    Io(#[from] io::Error),

    /// The cell stream failed before it was fully written.
    #[error("Tessellation failed after {written} cells: {source}")]
    Tessellation {
        written: usize,
        #[source]
        source: TessellationError,
    },
}

/// WKT text of a cell's polygon.
pub fn polygon_wkt<V>(cell: &Cell<V>) -> String {
    let coords: Vec<String> = cell
        .polygon
        .ring()
        .iter()
        .map(|p| format!("{:.*} {:.*}", COORD_PRECISION, p.lon, COORD_PRECISION, p.lat))
        .collect();
    format!("POLYGON (({}))", coords.join(", "))
}

/// Write one line per cell and return how many were written.
///
/// Accepts the generator directly. The first tessellation error stops the
/// export; lines already written stay in `writer`.
pub fn write_wkt<W, V, I>(writer: &mut W, cells: I) -> Result<usize, ExportError>
where
    W: Write,
    V: Display,
    I: IntoIterator<Item = Result<Cell<V>, TessellationError>>,
{
    let mut written = 0;
    for cell in cells {
        let cell = cell.map_err(|source| ExportError::Tessellation { written, source })?;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            polygon_wkt(&cell),
            cell.value,
            cell.zone,
            cell.row
        )?;
        written += 1;
    }
    writer.flush()?;
    debug!(cells = written, "Exported cells");
    Ok(written)
}
