//! Pointy-top hexagon geometry.

use crate::coord::{GeoBounds, GeoPoint, PlanarBounds, PlanarPoint};

/// Number of points in a closed hexagon ring (first point repeated).
pub const RING_LEN: usize = 7;

/// Planar dimensions of a pointy-top hexagon derived from its outer radius.
///
/// `width` is the distance between the two vertical edges and also the
/// spacing between cells of one row. `height` is the tip-to-tip extent;
/// consecutive rows are `0.75 * height` apart so that the tips of one row
/// meet the side vertices of the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexMetrics {
    size: f64,
    width: f64,
    height: f64,
}

impl HexMetrics {
    /// Metrics for cells with outer-circle radius `size` (metres).
    pub fn new(size: f64) -> Self {
        Self {
            size,
            width: 3f64.sqrt() * size,
            height: 1.5 * size,
        }
    }

    /// Outer-circle radius.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Half the cell width, the horizontal indentation of odd rows.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Vertical distance between the centres of consecutive rows.
    pub fn row_spacing(&self) -> f64 {
        0.75 * self.height
    }

    /// Closed vertex ring around `center`, counter-clockwise from the
    /// lower-left side vertex.
    pub fn vertices(&self, center: PlanarPoint) -> [PlanarPoint; RING_LEN] {
        let hw = self.width / 2.0;
        let tip = self.height / 2.0;
        let side = self.height / 4.0;
        [
            center.offset(-hw, -side),
            center.offset(0.0, -tip),
            center.offset(hw, -side),
            center.offset(hw, side),
            center.offset(0.0, tip),
            center.offset(-hw, side),
            center.offset(-hw, -side),
        ]
    }

    /// Planar bounding box of the hexagon around `center`.
    pub fn bounds(&self, center: PlanarPoint) -> PlanarBounds {
        PlanarBounds::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            center.x + self.width / 2.0,
            center.y + self.height / 2.0,
        )
    }
}

/// A closed polygon ring in geographic coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygon {
    ring: Vec<GeoPoint>,
}

impl GeoPolygon {
    /// Wrap a ring. The ring is expected to repeat its first point last.
    pub fn new(ring: Vec<GeoPoint>) -> Self {
        Self { ring }
    }

    /// Ring vertices, first point repeated at the end.
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Distinct vertices (the ring without its closing point).
    pub fn vertices(&self) -> &[GeoPoint] {
        match self.ring.split_last() {
            Some((last, rest)) if rest.first() == Some(last) => rest,
            _ => &self.ring,
        }
    }

    /// Geographic bounding box of the ring, or `None` when it is empty.
    pub fn bounds(&self) -> Option<GeoBounds> {
        let first = self.ring.first()?;
        let mut bounds = GeoBounds {
            min_lon: first.lon,
            min_lat: first.lat,
            max_lon: first.lon,
            max_lat: first.lat,
        };
        for p in &self.ring[1..] {
            bounds.min_lon = bounds.min_lon.min(p.lon);
            bounds.min_lat = bounds.min_lat.min(p.lat);
            bounds.max_lon = bounds.max_lon.max(p.lon);
            bounds.max_lat = bounds.max_lat.max(p.lat);
        }
        Some(bounds)
    }

    /// Even-odd point-in-polygon test. Points exactly on an edge may fall
    /// either way.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let vertices = self.vertices();
        if vertices.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let (a, b) = (vertices[i], vertices[j]);
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let crossing = (b.lon - a.lon) * (point.lat - a.lat) / (b.lat - a.lat) + a.lon;
                if point.lon < crossing {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
