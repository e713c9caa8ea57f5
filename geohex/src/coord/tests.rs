//! Tests for coordinate types

use super::*;

#[test]
fn test_geo_point_rejects_invalid_latitude() {
    let result = GeoPoint::try_new(0.0, 91.0);
    assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
}

#[test]
fn test_geo_point_rejects_nan_longitude() {
    let result = GeoPoint::try_new(f64::NAN, 10.0);
    assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
}

#[test]
fn test_bounds_rejects_inverted_corners() {
    let result = GeoBounds::new(3.0, 40.0, 1.0, 42.0);
    assert!(matches!(result, Err(CoordError::InvertedBounds { .. })));
}

#[test]
fn test_bounds_contains_is_inclusive() {
    let bounds = GeoBounds::new(1.0, 40.0, 3.0, 42.0).unwrap();

    assert!(bounds.contains(GeoPoint::new(1.0, 40.0), 0.0));
    assert!(bounds.contains(GeoPoint::new(3.0, 42.0), 0.0));
    assert!(bounds.contains(GeoPoint::new(2.0, 41.0), 0.0));
    assert!(!bounds.contains(GeoPoint::new(3.0001, 41.0), 0.0));
}

#[test]
fn test_bounds_contains_honours_tolerance() {
    let bounds = GeoBounds::new(1.0, 40.0, 3.0, 42.0).unwrap();
    let just_outside = GeoPoint::new(3.0 + 1e-10, 41.0);

    assert!(!bounds.contains(just_outside, 0.0));
    assert!(bounds.contains(just_outside, 1e-9));
}

#[test]
fn test_bounds_corners_and_size() {
    let bounds = GeoBounds::new(-74.5, 40.0, -73.0, 41.0).unwrap();
    assert_eq!(bounds.south_west(), GeoPoint::new(-74.5, 40.0));
    assert_eq!(bounds.north_east(), GeoPoint::new(-73.0, 41.0));
    assert!((bounds.width() - 1.5).abs() < 1e-12);
    assert!((bounds.height() - 1.0).abs() < 1e-12);
}

#[test]
fn test_planar_bounds_enclosing() {
    let bounds = PlanarBounds::enclosing([
        PlanarPoint::new(3.0, -1.0),
        PlanarPoint::new(-2.0, 4.0),
        PlanarPoint::new(1.0, 1.0),
    ])
    .unwrap();

    assert_eq!(bounds, PlanarBounds::new(-2.0, -1.0, 3.0, 4.0));
    assert!(PlanarBounds::enclosing(Vec::new()).is_none());
}

#[test]
fn test_planar_bounds_around() {
    let bounds = PlanarBounds::around(PlanarPoint::new(10.0, 20.0), 0.5);
    assert!(bounds.contains(PlanarPoint::new(10.5, 19.5)));
    assert!(!bounds.contains(PlanarPoint::new(10.6, 20.0)));
}

#[test]
fn test_parse_bounds() {
    let bounds = parse_bounds("1, 40,3 ,42").unwrap();
    assert_eq!(bounds, GeoBounds::new(1.0, 40.0, 3.0, 42.0).unwrap());
}

#[test]
fn test_parse_bounds_wrong_arity() {
    let err = parse_bounds("1,2,3").unwrap_err();
    assert!(err.contains("expected 4"));
}

#[test]
fn test_parse_point_rejects_garbage() {
    let err = parse_point("abc,1").unwrap_err();
    assert!(err.contains("'abc'"));
}

#[test]
fn test_coord_error_display() {
    let msg = CoordError::InvalidLatitude(95.0).to_string();
    assert!(msg.contains("95"));
    assert!(msg.contains("-90"));
}
