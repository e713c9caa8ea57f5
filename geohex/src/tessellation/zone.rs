//! Per-zone state of a running tessellation.
//!
//! Every projection zone the generator enters gets a [`Zone`]: its planar
//! domain, the row anchor used to keep later rows on the same lattice, and
//! a [`ZoneIndex`] of the cells recently placed in it. Only the
//! current and the previous row are indexed; a cell further south can never
//! be the direct neighbor of a cell still to be generated.

use rstar::{Envelope, RTree, RTreeObject, SelectionFunction, AABB};

use crate::coord::{PlanarBounds, PlanarPoint};

/// An indexed cell: its planar bounding box and value.
struct IndexedCell<V> {
    envelope: AABB<[f64; 2]>,
    value: V,
}

impl<V> RTreeObject for IndexedCell<V> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Selects every object whose envelope intersects the query box.
pub(crate) struct Intersecting(pub AABB<[f64; 2]>);

impl<T> SelectionFunction<T> for Intersecting
where
    T: RTreeObject<Envelope = AABB<[f64; 2]>>,
{
    fn should_unpack_parent(&self, envelope: &T::Envelope) -> bool {
        envelope.intersects(&self.0)
    }

    fn should_unpack_leaf(&self, leaf: &T) -> bool {
        leaf.envelope().intersects(&self.0)
    }
}

pub(crate) fn to_aabb(bounds: &PlanarBounds) -> AABB<[f64; 2]> {
    AABB::from_corners([bounds.min_x, bounds.min_y], [bounds.max_x, bounds.max_y])
}

fn squared_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

/// Spatial index over cells placed in one zone, keyed by planar bounding box.
///
/// Cells are kept for two rows: `active` receives the row being generated
/// and `settled` holds the row before it.
pub struct ZoneIndex<V> {
    active: RTree<IndexedCell<V>>,
    settled: RTree<IndexedCell<V>>,
}

impl<V: Clone> ZoneIndex<V> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            active: RTree::new(),
            settled: RTree::new(),
        }
    }

    /// Record a cell of the current row.
    pub fn insert(&mut self, bounds: PlanarBounds, value: V) {
        self.active.insert(IndexedCell {
            envelope: to_aabb(&bounds),
            value,
        });
    }

    /// Value of the cell whose bounding box intersects `bounds`.
    ///
    /// When several boxes intersect, the cell whose box centre is closest
    /// to the query centre wins.
    pub fn query(&self, bounds: PlanarBounds) -> Option<V> {
        let query = to_aabb(&bounds);
        let target = query.center();
        self.active
            .locate_with_selection_function(Intersecting(query))
            .chain(self.settled.locate_with_selection_function(Intersecting(query)))
            .min_by(|a, b| {
                squared_distance(a.envelope.center(), target)
                    .total_cmp(&squared_distance(b.envelope.center(), target))
            })
            .map(|cell| cell.value.clone())
    }

    /// Retire the previous row and start indexing a new one.
    pub fn advance_row(&mut self) {
        self.settled = std::mem::replace(&mut self.active, RTree::new());
    }

    /// Number of indexed cells across both rows.
    pub fn len(&self) -> usize {
        self.active.size() + self.settled.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for ZoneIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Planar centre and row of the first cell a zone received in a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowAnchor {
    pub position: PlanarPoint,
    pub row: u64,
}

impl RowAnchor {
    /// Snap `position` onto this anchor's lattice for `row`.
    ///
    /// The northing is recomputed from the anchor, the easting moves to the
    /// nearest column, and odd row distances shift the lattice by half a
    /// cell width.
    pub fn align(&self, position: PlanarPoint, row: u64, width: f64, row_spacing: f64) -> PlanarPoint {
        let rows = row as f64 - self.row as f64;
        let indent = if (row.abs_diff(self.row)) % 2 == 1 {
            width / 2.0
        } else {
            0.0
        };
        let origin = self.position.x + indent;
        let columns = ((position.x - origin) / width).round();
        PlanarPoint::new(origin + columns * width, self.position.y + row_spacing * rows)
    }
}

/// Everything the generator tracks for one projection zone.
pub struct Zone<V> {
    domain: PlanarBounds,
    anchor: Option<RowAnchor>,
    last_row: u64,
    index: ZoneIndex<V>,
}

impl<V: Clone> Zone<V> {
    /// Zone with planar `domain`, entered during `row`.
    pub fn new(domain: PlanarBounds, row: u64) -> Self {
        Self {
            domain,
            anchor: None,
            last_row: row,
            index: ZoneIndex::new(),
        }
    }

    /// Planar bounding box of the projection's valid domain.
    pub fn domain(&self) -> PlanarBounds {
        self.domain
    }

    pub fn anchor(&self) -> Option<RowAnchor> {
        self.anchor
    }

    /// Last row in which a cell was placed in this zone.
    pub fn last_row(&self) -> u64 {
        self.last_row
    }

    pub fn index(&self) -> &ZoneIndex<V> {
        &self.index
    }

    /// Record a placed cell. The first cell per row becomes the row anchor.
    pub fn record(&mut self, center: PlanarPoint, bounds: PlanarBounds, row: u64, value: V) {
        if self.anchor.map(|a| a.row) != Some(row) {
            self.anchor = Some(RowAnchor {
                position: center,
                row,
            });
        }
        self.last_row = row;
        self.index.insert(bounds, value);
    }

    /// Move the index on to a new row.
    pub fn advance_row(&mut self) {
        self.index.advance_row();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;
    use crate::projection::{PlanarProjection, ProjectionService, UtmProjectionService};

    fn cell_box(x: f64, y: f64) -> PlanarBounds {
        PlanarBounds::around(PlanarPoint::new(x, y), 5.0)
    }

    #[test]
    fn test_query_finds_intersecting_cell() {
        let mut index = ZoneIndex::new();
        index.insert(cell_box(0.0, 0.0), "a");
        index.insert(cell_box(20.0, 0.0), "b");

        let query_box = PlanarBounds::around(PlanarPoint::new(19.0, 1.0), 0.5);
        assert_eq!(index.query(query_box), Some("b"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_query_misses_empty_space() {
        let mut index = ZoneIndex::new();
        index.insert(cell_box(0.0, 0.0), 1);
        let query_box = PlanarBounds::around(PlanarPoint::new(50.0, 50.0), 1.0);
        assert_eq!(index.query(query_box), None);
    }

    #[test]
    fn test_query_prefers_closest_centre() {
        let mut index = ZoneIndex::new();
        index.insert(cell_box(0.0, 0.0), "west");
        index.insert(cell_box(8.0, 0.0), "east");

        // Both boxes overlap the query; the east box centre is nearer.
        let query_box = PlanarBounds::around(PlanarPoint::new(4.5, 0.0), 0.1);
        assert_eq!(index.query(query_box), Some("east"));
    }

    #[test]
    fn test_advance_row_keeps_two_rows() {
        let mut index = ZoneIndex::new();
        index.insert(cell_box(0.0, 0.0), 0);
        index.advance_row();
        index.insert(cell_box(0.0, 10.0), 1);

        assert_eq!(index.len(), 2);
        assert_eq!(index.query(cell_box(0.0, 0.0)), Some(0));

        index.advance_row();
        assert_eq!(index.len(), 1);
        assert_eq!(index.query(PlanarBounds::around(PlanarPoint::new(0.0, 0.0), 1.0)), None);
        assert_eq!(index.query(PlanarBounds::around(PlanarPoint::new(0.0, 10.0), 1.0)), Some(1));

        index.advance_row();
        assert!(index.is_empty());
    }

    #[test]
    fn test_anchor_align_same_parity() {
        let anchor = RowAnchor {
            position: PlanarPoint::new(100.0, 1000.0),
            row: 2,
        };
        let aligned = anchor.align(PlanarPoint::new(137.0, 1234.5), 4, 10.0, 7.5);
        assert!((aligned.x - 140.0).abs() < 1e-9);
        assert!((aligned.y - 1015.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_align_odd_row_distance_indents() {
        let anchor = RowAnchor {
            position: PlanarPoint::new(100.0, 1000.0),
            row: 2,
        };
        let aligned = anchor.align(PlanarPoint::new(131.0, 0.0), 3, 10.0, 7.5);
        assert!((aligned.x - 135.0).abs() < 1e-9);
        assert!((aligned.y - 1007.5).abs() < 1e-9);

        // Rows before the anchor work the same way.
        let aligned = anchor.align(PlanarPoint::new(90.0, 0.0), 1, 10.0, 7.5);
        assert!((aligned.x - 85.0).abs() < 1e-9 || (aligned.x - 95.0).abs() < 1e-9);
        assert!((aligned.y - 992.5).abs() < 1e-9);
    }

    #[test]
    fn test_zone_records_first_cell_per_row_as_anchor() {
        let mut zone: Zone<u8> = Zone::new(PlanarBounds::new(0.0, 0.0, 100.0, 100.0), 0);
        assert!(zone.anchor().is_none());

        zone.record(PlanarPoint::new(1.0, 2.0), cell_box(1.0, 2.0), 0, 7);
        zone.record(PlanarPoint::new(20.0, 2.0), cell_box(20.0, 2.0), 0, 8);
        assert_eq!(zone.anchor().unwrap().position, PlanarPoint::new(1.0, 2.0));

        zone.advance_row();
        zone.record(PlanarPoint::new(11.0, 9.5), cell_box(11.0, 9.5), 1, 9);
        let anchor = zone.anchor().unwrap();
        assert_eq!(anchor.row, 1);
        assert_eq!(anchor.position, PlanarPoint::new(11.0, 9.5));
        assert_eq!(zone.last_row(), 1);
        assert_eq!(zone.index().len(), 3);
    }

    #[test]
    fn test_zone_domain_from_utm_projection() {
        let projection = UtmProjectionService::new()
            .resolve(GeoPoint::new(2.0, 41.0))
            .unwrap();
        let zone: Zone<u8> = Zone::new(projection.domain(), 3);
        let inside = projection.to_planar(GeoPoint::new(2.0, 41.0)).unwrap();
        assert!(zone.domain().contains(inside));
        assert_eq!(zone.last_row(), 3);
    }
}
