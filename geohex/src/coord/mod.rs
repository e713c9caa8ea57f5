//! Coordinate types
//!
//! Geographic positions and regions (WGS84 degrees) and planar positions
//! and boxes (metres in one zone's projected coordinate system).

mod types;

pub use types::{
    CoordError, GeoBounds, GeoPoint, PlanarBounds, PlanarPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};

/// Parses a `MIN_LON,MIN_LAT,MAX_LON,MAX_LAT` string into validated bounds.
///
/// Whitespace around the separators is ignored.
pub fn parse_bounds(text: &str) -> Result<GeoBounds, String> {
    let values = parse_numbers(text, 4)?;
    GeoBounds::new(values[0], values[1], values[2], values[3]).map_err(|e| e.to_string())
}

/// Parses a `LON,LAT` string into a validated point.
pub fn parse_point(text: &str) -> Result<GeoPoint, String> {
    let values = parse_numbers(text, 2)?;
    GeoPoint::try_new(values[0], values[1]).map_err(|e| e.to_string())
}

fn parse_numbers(text: &str, expected: usize) -> Result<Vec<f64>, String> {
    let values = text
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() != expected {
        return Err(format!(
            "expected {} comma-separated numbers, got {}",
            expected,
            values.len()
        ));
    }
    Ok(values)
}

#[cfg(test)]
mod tests;
