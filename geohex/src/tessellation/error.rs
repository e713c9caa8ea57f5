//! Tessellation error types.

use thiserror::Error;

use crate::projection::{ProjectionError, ZoneId};

/// Errors that abort a tessellation.
///
/// Every variant is fatal: the generator yields the error once and then
/// ends. There is no partial-output mode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TessellationError {
    /// The projection service could not resolve or transform a position.
    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    /// Neither diagonal neighbor of a re-anchored cell was found in the
    /// zone's index.
    #[error(
        "No south-west or south-east neighbor indexed in {zone} for row {row} cell at ({x:.3}, {y:.3})"
    )]
    NeighborLookup { zone: ZoneId, row: u64, x: f64, y: f64 },

    /// The tessellation configuration is unusable.
    #[error("Invalid tessellation config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::GeoPoint;

    #[test]
    fn test_from_projection_error() {
        let err: TessellationError = ProjectionError::OutsideDomain {
            point: GeoPoint::new(0.0, 88.0),
            reason: "polar".to_string(),
        }
        .into();
        assert!(matches!(err, TessellationError::Projection(_)));
        assert!(err.to_string().starts_with("Projection failed"));
    }

    #[test]
    fn test_neighbor_lookup_display() {
        let err = TessellationError::NeighborLookup {
            zone: ZoneId(32632),
            row: 7,
            x: 166021.4433,
            y: 4430000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("EPSG:32632"));
        assert!(msg.contains("row 7"));
        assert!(msg.contains("166021.443"));
    }
}
