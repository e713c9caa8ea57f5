//! Lazy hexagonal tessellation across projection zones.
//!
//! [`TessellationGenerator`] walks a geographic region row by row and yields
//! one [`Cell`] per hexagon. Hexagon geometry is computed in the planar
//! coordinates of a local projection zone; when the walk leaves a zone's
//! valid domain the generator switches zones and keeps later rows on the
//! lattice already established in each zone.
//!
//! Each cell's value is derived from exactly one already generated neighbor
//! through a [`PropagationRule`](crate::rule::PropagationRule): the western
//! neighbor within a row, and the south-west or south-east neighbor for the
//! first cell of a row or the first cell after re-entering a zone.
//!
//! Only two rows of index state are kept per zone, and zones not used on
//! the previous row are dropped, so memory stays proportional to the width
//! of the region rather than its area.

mod error;
mod generator;
mod hexagon;
mod zone;

pub use error::TessellationError;
pub use generator::TessellationGenerator;
pub use hexagon::{GeoPolygon, HexMetrics, RING_LEN};
pub use zone::{RowAnchor, Zone, ZoneIndex};

pub(crate) use zone::Intersecting;

use crate::coord::{GeoPoint, PlanarPoint};
use crate::projection::ZoneId;

/// One emitted hexagon.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<V> {
    /// Closed hexagon ring in geographic coordinates
    pub polygon: GeoPolygon,
    /// Value derived by the propagation rule
    pub value: V,
    /// Zone whose planar coordinates the hexagon was built in
    pub zone: ZoneId,
    /// Row index, counted from the south
    pub row: u64,
    /// Ordinal of the cell within its row, counted from the west
    pub column: u64,
    /// Planar centre in the cell's zone
    pub center: PlanarPoint,
    /// Geographic image of the centre
    pub centroid: GeoPoint,
}
