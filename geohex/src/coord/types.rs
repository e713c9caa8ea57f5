//! Coordinate type definitions

use std::fmt;

/// Valid latitude range (WGS84 degrees)
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range (WGS84 degrees)
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geographic position in WGS84 decimal degrees.
///
/// Stored as `(lon, lat)` to match the x/y order used by planar positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Longitude in degrees, positive east
    pub lon: f64,
    /// Latitude in degrees, positive north
    pub lat: f64,
}

impl GeoPoint {
    /// Create a geographic point from longitude and latitude.
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Create a validated geographic point.
    pub fn try_new(lon: f64, lat: f64) -> Result<Self, CoordError> {
        if !lat.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self { lon, lat })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// An axis-aligned region in geographic coordinates.
///
/// This is the requested region of a tessellation. [`GeoBounds::contains`]
/// is the one membership test used for every placement decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    /// Create validated bounds from the south-west and north-east corners.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self, CoordError> {
        let south_west = GeoPoint::try_new(min_lon, min_lat)?;
        let north_east = GeoPoint::try_new(max_lon, max_lat)?;
        if south_west.lon > north_east.lon || south_west.lat > north_east.lat {
            return Err(CoordError::InvertedBounds {
                south_west,
                north_east,
            });
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    /// South-west corner, where tessellation starts.
    #[inline]
    pub fn south_west(&self) -> GeoPoint {
        GeoPoint::new(self.min_lon, self.min_lat)
    }

    /// North-east corner.
    #[inline]
    pub fn north_east(&self) -> GeoPoint {
        GeoPoint::new(self.max_lon, self.max_lat)
    }

    /// Inclusive containment test widened by `tolerance` degrees on every side.
    #[inline]
    pub fn contains(&self, point: GeoPoint, tolerance: f64) -> bool {
        point.lon >= self.min_lon - tolerance
            && point.lon <= self.max_lon + tolerance
            && point.lat >= self.min_lat - tolerance
            && point.lat <= self.max_lat + tolerance
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// A position in some zone's planar coordinate system (metres).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
}

impl PlanarPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned bounding box in planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PlanarBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box enclosing all `points`, or `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = PlanarPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(first.x, first.y, first.x, first.y);
        for p in points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Square box of half-size `radius` centred on `center`.
    pub fn around(center: PlanarPoint, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, point: PlanarPoint) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }
}

/// Errors that can occur when building coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-90.0 to 90.0)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// South-west corner lies north or east of the north-east corner
    InvertedBounds {
        south_west: GeoPoint,
        north_east: GeoPoint,
    },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvertedBounds {
                south_west,
                north_east,
            } => {
                write!(
                    f,
                    "Invalid bounds: south-west corner {} is not south-west of north-east corner {}",
                    south_west, north_east
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
