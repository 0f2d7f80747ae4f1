//! Distance and area computations over geographic coordinates

use crate::coords::{LatLng, DEGREES_TO_KM};

/// Mean Earth radius in kilometres
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions, in kilometres
#[must_use]
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Planar distance in degrees, treating lat/lng as flat coordinates
///
/// Only meaningful for projected coordinates or as a rough local
/// approximation.
#[must_use]
pub fn euclidean_deg(a: LatLng, b: LatLng) -> f64 {
    ((b.lat - a.lat).powi(2) + (b.lng - a.lng).powi(2)).sqrt()
}

/// Approximate polygon area in km² via the shoelace formula over degrees
///
/// Ignores the Earth's curvature; fewer than three vertices yield 0.0.
#[must_use]
pub fn polygon_area_km2(vertices: &[LatLng]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for (i, a) in vertices.iter().enumerate() {
        let b = &vertices[(i + 1) % vertices.len()];
        area += a.lat * b.lng - b.lat * a.lng;
    }
    (area.abs() / 2.0) * DEGREES_TO_KM * DEGREES_TO_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDMX: LatLng = LatLng::new(19.4326, -99.1332);
    const GUADALAJARA: LatLng = LatLng::new(20.6597, -103.3496);

    #[test]
    fn haversine_cdmx_guadalajara() {
        let distance = haversine_km(CDMX, GUADALAJARA);
        assert!((distance - 461.0).abs() < 5.0, "{distance}");
    }

    #[test]
    fn haversine_of_identical_points_is_zero() {
        assert_eq!(haversine_km(CDMX, CDMX), 0.0);
    }

    #[test]
    fn haversine_is_symmetric() {
        let forward = haversine_km(CDMX, GUADALAJARA);
        let backward = haversine_km(GUADALAJARA, CDMX);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn euclidean_is_plain_pythagoras() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(3.0, 4.0);
        assert_eq!(euclidean_deg(a, b), 5.0);
    }

    #[test]
    fn unit_square_area() {
        let square = [
            LatLng::new(19.0, -99.0),
            LatLng::new(20.0, -99.0),
            LatLng::new(20.0, -98.0),
            LatLng::new(19.0, -98.0),
        ];
        let area = polygon_area_km2(&square);
        assert!((area - DEGREES_TO_KM * DEGREES_TO_KM).abs() < 1e-6);
    }

    #[test]
    fn degenerate_polygons_have_zero_area() {
        assert_eq!(polygon_area_km2(&[]), 0.0);
        assert_eq!(polygon_area_km2(&[CDMX, GUADALAJARA]), 0.0);
    }
}
