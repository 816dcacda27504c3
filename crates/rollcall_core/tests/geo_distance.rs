use rollcall_core::{distance_meters, is_within_fence, Coordinate, GeoError};

#[test]
fn distance_from_a_point_to_itself_is_zero() {
    let point = Coordinate::new(40.7128, -74.0060);
    assert_eq!(distance_meters(point, point).unwrap(), 0.0);
}

#[test]
fn distance_is_symmetric() {
    let a = Coordinate::new(40.7128, -74.0060);
    let b = Coordinate::new(40.7228, -74.0160);
    let ab = distance_meters(a, b).unwrap();
    let ba = distance_meters(b, a).unwrap();
    assert_eq!(ab, ba);
}

#[test]
fn one_degree_of_latitude_along_a_meridian_is_about_111_km() {
    let south = Coordinate::new(0.0, 0.0);
    let north = Coordinate::new(1.0, 0.0);
    let distance = distance_meters(south, north).unwrap();

    // pi * R / 180 for the spherical approximation.
    let expected = 111_194.9;
    assert!(
        (distance - expected).abs() / expected < 0.01,
        "meridian degree measured {distance} m, expected about {expected} m"
    );
}

#[test]
fn nyc_example_point_a_kilometer_north_is_out_of_range() {
    let anchor = Coordinate::new(40.7128, -74.0060);
    let device = Coordinate::new(40.7228, -74.0060);

    let distance = distance_meters(device, anchor).unwrap();
    assert!(
        (1_100.0..1_130.0).contains(&distance),
        "expected roughly 1113 m, measured {distance} m"
    );

    let check = is_within_fence(device, anchor, 100.0).unwrap();
    assert!(!check.within);
    assert_eq!(check.radius_meters, 100.0);
}

#[test]
fn fence_membership_matches_distance_comparison() {
    let anchor = Coordinate::new(40.7128, -74.0060);
    let device = Coordinate::new(40.7131, -74.0063);
    let distance = distance_meters(device, anchor).unwrap();

    let inside = is_within_fence(device, anchor, distance + 1.0).unwrap();
    assert!(inside.within);

    let boundary = is_within_fence(device, anchor, distance).unwrap();
    assert!(boundary.within, "boundary is inclusive");

    let outside = is_within_fence(device, anchor, distance - 1.0).unwrap();
    assert!(!outside.within);
}

#[test]
fn out_of_range_degrees_are_rejected_not_folded_into_nan() {
    let valid = Coordinate::new(0.0, 0.0);

    let bad_latitude = Coordinate::new(90.5, 0.0);
    assert!(matches!(
        distance_meters(bad_latitude, valid).unwrap_err(),
        GeoError::InvalidLatitude(_)
    ));

    let bad_longitude = Coordinate::new(0.0, -180.5);
    assert!(matches!(
        distance_meters(valid, bad_longitude).unwrap_err(),
        GeoError::InvalidLongitude(_)
    ));
}
