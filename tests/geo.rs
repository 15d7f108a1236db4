use pinmap::geo::{resolution, LonLat, MapPoint};

#[test]
fn mercator_round_trips_within_tolerance() {
    let cases = [
        LonLat::new(0.0, 0.0),
        LonLat::new(107.6186, -6.9039),
        LonLat::new(-73.9857, 40.7484),
        LonLat::new(179.9, -85.0),
        LonLat::new(-179.9, 85.0),
    ];
    for original in cases {
        let back = original.to_map().to_lon_lat();
        assert!(
            (back.lon - original.lon).abs() < 1e-9,
            "lon drifted: {original:?} -> {back:?}"
        );
        assert!(
            (back.lat - original.lat).abs() < 1e-9,
            "lat drifted: {original:?} -> {back:?}"
        );
    }
}

#[test]
fn equator_projects_to_zero_y() {
    let p = LonLat::new(30.0, 0.0).to_map();
    assert!(p.y.abs() < 1e-6);
}

#[test]
fn map_round_trips_within_tolerance() {
    let original = MapPoint::new(11_980_000.0, -770_000.0);
    let back = original.to_lon_lat().to_map();
    assert!((back.x - original.x).abs() < 1e-6);
    assert!((back.y - original.y).abs() < 1e-6);
}

#[test]
fn resolution_halves_with_each_zoom_level() {
    let r12 = resolution(12.0);
    let r13 = resolution(13.0);
    assert!((r12 / r13 - 2.0).abs() < 1e-12);
}

#[test]
fn query_pair_is_a_pure_swap() {
    let coord = LonLat::new(1.5, -2.5);
    let pair = coord.query_pair();
    assert_eq!(pair, (-2.5, 1.5));
    // The coordinate itself is untouched.
    assert_eq!(coord, LonLat::new(1.5, -2.5));
}
