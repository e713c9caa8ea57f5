//! Local planar projections.
//!
//! Hexagon geometry is only metrically correct on a plane, so the engine
//! works inside a local planar coordinate system and converts each finished
//! hexagon back to geographic coordinates. A [`ProjectionService`] picks the
//! projection that is valid at a given geographic point; the projection
//! knows its own valid domain and converts in both directions.
//!
//! # Example
//!
//! ```
//! use geohex::coord::GeoPoint;
//! use geohex::projection::{PlanarProjection, ProjectionService, UtmProjectionService};
//!
//! let service = UtmProjectionService::new();
//! let zone = service.resolve(GeoPoint::new(2.35, 48.85)).unwrap();
//! assert_eq!(zone.id().to_string(), "EPSG:32631");
//!
//! let planar = zone.to_planar(GeoPoint::new(2.35, 48.85)).unwrap();
//! assert!(zone.domain().contains(planar));
//! ```

pub mod utm;

use std::fmt;

use thiserror::Error;

use crate::coord::{GeoPoint, PlanarBounds, PlanarPoint};

pub use utm::{UtmProjection, UtmProjectionService};

/// Identifier of a planar projection zone.
///
/// For the UTM service this is the EPSG code of the zone's CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Errors raised when a point cannot be projected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// No projection zone covers the given geographic point.
    #[error("No projection zone covers {point}: {reason}")]
    OutsideDomain { point: GeoPoint, reason: String },

    /// A transform produced or received a non-finite coordinate.
    #[error("Non-finite coordinate in {zone} transform: ({x}, {y})")]
    NonFinite { zone: ZoneId, x: f64, y: f64 },
}

/// One local planar coordinate system.
pub trait PlanarProjection: Clone {
    /// Identifier of this projection.
    fn id(&self) -> ZoneId;

    /// Planar bounding box of the geographic domain in which the projection
    /// is valid.
    fn domain(&self) -> PlanarBounds;

    /// Geographic → planar.
    fn to_planar(&self, point: GeoPoint) -> Result<PlanarPoint, ProjectionError>;

    /// Planar → geographic.
    fn to_geo(&self, point: PlanarPoint) -> Result<GeoPoint, ProjectionError>;
}

/// Selects the local planar projection for a geographic point.
///
/// Implementations must be pure functions of the point; the tessellation
/// generator calls `resolve` whenever a position leaves the active zone.
pub trait ProjectionService {
    type Projection: PlanarProjection;

    fn resolve(&self, point: GeoPoint) -> Result<Self::Projection, ProjectionError>;
}

impl<S: ProjectionService + ?Sized> ProjectionService for &S {
    type Projection = S::Projection;

    fn resolve(&self, point: GeoPoint) -> Result<Self::Projection, ProjectionError> {
        (**self).resolve(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_id_display() {
        assert_eq!(ZoneId(32631).to_string(), "EPSG:32631");
    }

    #[test]
    fn test_zone_id_ordering() {
        assert!(ZoneId(32631) < ZoneId(32632));
    }

    #[test]
    fn test_projection_error_display() {
        let err = ProjectionError::OutsideDomain {
            point: GeoPoint::new(0.0, 89.0),
            reason: "latitude above 84".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("89.000000"));
        assert!(msg.contains("latitude above 84"));
    }

    #[test]
    fn test_service_by_reference() {
        fn resolve_with<S: ProjectionService>(service: S) -> ZoneId {
            service.resolve(GeoPoint::new(-74.0, 40.7)).unwrap().id()
        }
        let service = UtmProjectionService::new();
        assert_eq!(resolve_with(&service), ZoneId(32618));
    }
}
