//! Universal Transverse Mercator zones on the WGS84 ellipsoid.
//!
//! UTM divides the world into 60 zones of 6° longitude per hemisphere,
//! starting at -180° for zone 1. Northern zones are EPSG:326zz, southern
//! zones EPSG:327zz with a false northing of 10 000 km.
//!
//! The transforms are the Transverse Mercator series from Snyder,
//! "Map Projections: A Working Manual" (USGS PP 1395), which stay at
//! millimetre accuracy well beyond the edges of a zone.

use crate::coord::{GeoPoint, PlanarBounds, PlanarPoint};

use super::{PlanarProjection, ProjectionError, ProjectionService, ZoneId};

const WGS84_A: f64 = 6_378_137.0;
const WGS84_F: f64 = 1.0 / 298.257_223_563;
const E2: f64 = WGS84_F * (2.0 - WGS84_F);
const EP2: f64 = E2 / (1.0 - E2);

const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Southern limit of UTM coverage (degrees).
pub const MIN_UTM_LAT: f64 = -80.0;
/// Northern limit of UTM coverage (degrees).
pub const MAX_UTM_LAT: f64 = 84.0;

const ZONE_WIDTH_DEG: f64 = 6.0;
const ZONE_COUNT: u8 = 60;
const EPSG_NORTH_BASE: u32 = 32600;
const EPSG_SOUTH_BASE: u32 = 32700;

/// Samples per edge when tracing a zone's outline into planar space.
const DOMAIN_EDGE_SAMPLES: usize = 32;

/// A single UTM zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmProjection {
    zone: u8,
    north: bool,
    central_meridian: f64,
    domain: PlanarBounds,
}

impl UtmProjection {
    /// Create the projection for `zone` (1-60) in the given hemisphere.
    ///
    /// Returns `None` for an out-of-range zone number.
    pub fn zone(zone: u8, north: bool) -> Option<Self> {
        if !(1..=ZONE_COUNT).contains(&zone) {
            return None;
        }
        let central_meridian = -183.0 + ZONE_WIDTH_DEG * f64::from(zone);
        let mut projection = Self {
            zone,
            north,
            central_meridian,
            domain: PlanarBounds::new(0.0, 0.0, 0.0, 0.0),
        };
        projection.domain = projection.trace_domain();
        Some(projection)
    }

    /// Zone number (1-60).
    pub fn zone_number(&self) -> u8 {
        self.zone
    }

    /// True for the northern hemisphere zone.
    pub fn is_north(&self) -> bool {
        self.north
    }

    /// Central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    /// Geographic extent of the zone as `(west, south, east, north)`.
    pub fn geographic_extent(&self) -> (f64, f64, f64, f64) {
        let west = self.central_meridian - ZONE_WIDTH_DEG / 2.0;
        let east = self.central_meridian + ZONE_WIDTH_DEG / 2.0;
        if self.north {
            (west, 0.0, east, MAX_UTM_LAT)
        } else {
            (west, MIN_UTM_LAT, east, 0.0)
        }
    }

    fn false_northing(&self) -> f64 {
        if self.north {
            0.0
        } else {
            FALSE_NORTHING_SOUTH
        }
    }

    /// Bounding box of the zone outline, densified so curved edges are covered.
    fn trace_domain(&self) -> PlanarBounds {
        let (west, south, east, north) = self.geographic_extent();
        let steps = DOMAIN_EDGE_SAMPLES as f64;
        let mut outline = Vec::with_capacity(DOMAIN_EDGE_SAMPLES * 4 + 4);
        for i in 0..=DOMAIN_EDGE_SAMPLES {
            let t = i as f64 / steps;
            let lon = west + (east - west) * t;
            let lat = south + (north - south) * t;
            outline.push(self.forward(south, lon));
            outline.push(self.forward(north, lon));
            outline.push(self.forward(lat, west));
            outline.push(self.forward(lat, east));
        }
        PlanarBounds::enclosing(outline).unwrap_or(PlanarBounds::new(0.0, 0.0, 0.0, 0.0))
    }

    fn forward(&self, lat: f64, lon: f64) -> PlanarPoint {
        let phi = lat.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = WGS84_A / (1.0 - E2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = EP2 * cos_phi * cos_phi;
        let a = (lon - self.central_meridian).to_radians() * cos_phi;
        let m = meridian_arc(phi);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let x = SCALE_FACTOR
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * EP2) * a5 / 120.0)
            + FALSE_EASTING;
        let y = SCALE_FACTOR
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * EP2) * a6 / 720.0))
            + self.false_northing();

        PlanarPoint::new(x, y)
    }

    fn inverse(&self, point: PlanarPoint) -> GeoPoint {
        let x = point.x - FALSE_EASTING;
        let m = (point.y - self.false_northing()) / SCALE_FACTOR;

        let e4 = E2 * E2;
        let e6 = e4 * E2;
        let mu = m / (WGS84_A * (1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let root = (1.0 - E2).sqrt();
        let e1 = (1.0 - root) / (1.0 + root);
        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        let (sin_phi1, cos_phi1) = phi1.sin_cos();
        let tan_phi1 = phi1.tan();
        let t1 = tan_phi1 * tan_phi1;
        let c1 = EP2 * cos_phi1 * cos_phi1;
        let w = 1.0 - E2 * sin_phi1 * sin_phi1;
        let n1 = WGS84_A / w.sqrt();
        let r1 = WGS84_A * (1.0 - E2) / (w * w.sqrt());
        let d = x / (n1 * SCALE_FACTOR);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * EP2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * EP2 - 3.0 * c1 * c1)
                        * d6
                        / 720.0);
        let lon = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * EP2 + 24.0 * t1 * t1) * d5
                / 120.0)
            / cos_phi1;

        GeoPoint::new(self.central_meridian + lon.to_degrees(), lat.to_degrees())
    }
}

/// Distance along the meridian from the equator to latitude `phi` (radians).
fn meridian_arc(phi: f64) -> f64 {
    let e4 = E2 * E2;
    let e6 = e4 * E2;
    WGS84_A
        * ((1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * E2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
}

impl PlanarProjection for UtmProjection {
    fn id(&self) -> ZoneId {
        let base = if self.north {
            EPSG_NORTH_BASE
        } else {
            EPSG_SOUTH_BASE
        };
        ZoneId(base + u32::from(self.zone))
    }

    fn domain(&self) -> PlanarBounds {
        self.domain
    }

    fn to_planar(&self, point: GeoPoint) -> Result<PlanarPoint, ProjectionError> {
        let planar = self.forward(point.lat, point.lon);
        if !planar.x.is_finite() || !planar.y.is_finite() {
            return Err(ProjectionError::NonFinite {
                zone: self.id(),
                x: planar.x,
                y: planar.y,
            });
        }
        Ok(planar)
    }

    fn to_geo(&self, point: PlanarPoint) -> Result<GeoPoint, ProjectionError> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ProjectionError::NonFinite {
                zone: self.id(),
                x: point.x,
                y: point.y,
            });
        }
        let geo = self.inverse(point);
        if !geo.lon.is_finite() || !geo.lat.is_finite() {
            return Err(ProjectionError::NonFinite {
                zone: self.id(),
                x: point.x,
                y: point.y,
            });
        }
        Ok(geo)
    }
}

/// Resolves the UTM zone covering a geographic point.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtmProjectionService;

impl UtmProjectionService {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectionService for UtmProjectionService {
    type Projection = UtmProjection;

    fn resolve(&self, point: GeoPoint) -> Result<UtmProjection, ProjectionError> {
        if !point.lat.is_finite() || !(MIN_UTM_LAT..=MAX_UTM_LAT).contains(&point.lat) {
            return Err(ProjectionError::OutsideDomain {
                point,
                reason: format!(
                    "UTM covers latitudes {} to {}",
                    MIN_UTM_LAT, MAX_UTM_LAT
                ),
            });
        }
        if !point.lon.is_finite() || !(-180.0..=180.0).contains(&point.lon) {
            return Err(ProjectionError::OutsideDomain {
                point,
                reason: "longitude must be between -180 and 180".to_string(),
            });
        }

        let zone = (((point.lon + 180.0) / ZONE_WIDTH_DEG).floor() as u8 + 1).min(ZONE_COUNT);
        let north = point.lat >= 0.0;
        UtmProjection::zone(zone, north).ok_or_else(|| ProjectionError::OutsideDomain {
            point,
            reason: format!("no UTM zone numbered {}", zone),
        })
    }
}
