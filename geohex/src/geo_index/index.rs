//! CellIndex: R-tree lookup of realized cells.

use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

use crate::coord::GeoPoint;
use crate::tessellation::{Cell, Intersecting, TessellationError};

/// Tree entry pointing back into the cell list.
struct CellEntry {
    envelope: AABB<[f64; 2]>,
    ordinal: usize,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A fully realized tessellation with point lookup.
///
/// Built once, then read-only.
pub struct CellIndex<V> {
    cells: Vec<Cell<V>>,
    tree: RTree<CellEntry>,
}

impl<V> CellIndex<V> {
    /// Index already realized cells, keeping their order.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell<V>>) -> Self {
        let cells: Vec<Cell<V>> = cells.into_iter().collect();
        let entries = cells
            .iter()
            .enumerate()
            .filter_map(|(ordinal, cell)| {
                let bounds = cell.polygon.bounds()?;
                Some(CellEntry {
                    envelope: AABB::from_corners(
                        [bounds.min_lon, bounds.min_lat],
                        [bounds.max_lon, bounds.max_lat],
                    ),
                    ordinal,
                })
            })
            .collect();
        let tree = RTree::bulk_load(entries);
        debug!(cells = cells.len(), "Built cell index");
        Self { cells, tree }
    }

    /// Drain a cell stream into an index.
    ///
    /// Stops at the first error; no partial index is returned.
    pub fn build<I>(cells: I) -> Result<Self, TessellationError>
    where
        I: IntoIterator<Item = Result<Cell<V>, TessellationError>>,
    {
        let cells = cells.into_iter().collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_cells(cells))
    }

    /// The cell whose hexagon contains `point`.
    ///
    /// Where hexagons overlap, the one generated first wins.
    pub fn locate(&self, point: GeoPoint) -> Option<&Cell<V>> {
        let point_box = AABB::from_point([point.lon, point.lat]);
        self.tree
            .locate_with_selection_function(Intersecting(point_box))
            .map(|entry| entry.ordinal)
            .filter(|&ordinal| self.cells[ordinal].polygon.contains(point))
            .min()
            .map(|ordinal| &self.cells[ordinal])
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell<V>> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::PlanarPoint;
    use crate::projection::ZoneId;
    use crate::tessellation::GeoPolygon;

    fn square(min_lon: f64, min_lat: f64, size: f64, value: &'static str) -> Cell<&'static str> {
        let ring = vec![
            GeoPoint::new(min_lon, min_lat),
            GeoPoint::new(min_lon + size, min_lat),
            GeoPoint::new(min_lon + size, min_lat + size),
            GeoPoint::new(min_lon, min_lat + size),
            GeoPoint::new(min_lon, min_lat),
        ];
        Cell {
            polygon: GeoPolygon::new(ring),
            value,
            zone: ZoneId(1),
            row: 0,
            column: 0,
            center: PlanarPoint::new(0.0, 0.0),
            centroid: GeoPoint::new(min_lon + size / 2.0, min_lat + size / 2.0),
        }
    }

    #[test]
    fn test_new_empty() {
        let index: CellIndex<&str> = CellIndex::from_cells(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.locate(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_locate_finds_containing_cell() {
        let index = CellIndex::from_cells(vec![
            square(0.0, 0.0, 1.0, "a"),
            square(1.0, 0.0, 1.0, "b"),
        ]);
        assert_eq!(index.locate(GeoPoint::new(0.5, 0.5)).unwrap().value, "a");
        assert_eq!(index.locate(GeoPoint::new(1.5, 0.5)).unwrap().value, "b");
        assert!(index.locate(GeoPoint::new(2.5, 0.5)).is_none());
    }

    #[test]
    fn test_locate_checks_polygon_not_just_bbox() {
        let triangle = Cell {
            polygon: GeoPolygon::new(vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(1.0, 0.0),
                GeoPoint::new(0.0, 1.0),
                GeoPoint::new(0.0, 0.0),
            ]),
            ..square(0.0, 0.0, 1.0, "t")
        };
        let index = CellIndex::from_cells(vec![triangle]);
        assert!(index.locate(GeoPoint::new(0.2, 0.2)).is_some());
        assert!(index.locate(GeoPoint::new(0.9, 0.9)).is_none());
    }

    #[test]
    fn test_overlap_resolves_to_first_generated() {
        let index = CellIndex::from_cells(vec![
            square(0.0, 0.0, 1.0, "first"),
            square(0.5, 0.0, 1.0, "second"),
        ]);
        assert_eq!(index.locate(GeoPoint::new(0.75, 0.5)).unwrap().value, "first");
        assert_eq!(index.locate(GeoPoint::new(1.25, 0.5)).unwrap().value, "second");
    }

    #[test]
    fn test_build_propagates_error() {
        let items = vec![
            Ok(square(0.0, 0.0, 1.0, "a")),
            Err(TessellationError::InvalidConfig("boom".to_string())),
            Ok(square(1.0, 0.0, 1.0, "b")),
        ];
        let result = CellIndex::build(items);
        assert!(matches!(result, Err(TessellationError::InvalidConfig(_))));
    }

    #[test]
    fn test_iter_keeps_generation_order() {
        let index = CellIndex::build(vec![
            Ok(square(3.0, 0.0, 1.0, "x")),
            Ok(square(0.0, 0.0, 1.0, "y")),
        ])
        .unwrap();
        let values: Vec<_> = index.iter().map(|c| c.value).collect();
        assert_eq!(values, vec!["x", "y"]);
        assert_eq!(index.len(), 2);
    }
}
