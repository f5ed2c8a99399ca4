//! Planar route geometry.
//!
//! Equirectangular approximation: good enough to size a PIREP search radius,
//! not a geodesic distance.

/// Nautical miles per degree of latitude.
const NM_PER_DEGREE: f64 = 60.0;

/// Smallest en-route PIREP search radius, nautical miles.
pub const MIN_SEARCH_RADIUS_NM: u32 = 50;

/// Midpoint of two `(lat, lon)` pairs in degrees.
pub fn midpoint(from: (f64, f64), to: (f64, f64)) -> (f64, f64) {
    ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0)
}

/// Approximate distance between two `(lat, lon)` pairs in nautical miles.
///
/// The longitude delta is scaled by the cosine of the mid latitude.
pub fn distance_nm(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (mid_lat, _) = midpoint(from, to);
    let d_lat = (to.0 - from.0) * NM_PER_DEGREE;
    let d_lon = (to.1 - from.1) * mid_lat.to_radians().cos() * NM_PER_DEGREE;
    (d_lat * d_lat + d_lon * d_lon).sqrt()
}

/// PIREP search radius for a route: a third of its length, at least 50 nm.
pub fn search_radius_nm(distance_nm: f64) -> u32 {
    let third = (distance_nm / 3.0).round();
    if third.is_finite() && third > f64::from(MIN_SEARCH_RADIUS_NM) {
        third as u32
    } else {
        MIN_SEARCH_RADIUS_NM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_route_has_zero_distance() {
        assert_eq!(distance_nm((0.0, 0.0), (0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_same_point_midpoint_is_the_point() {
        let point = (42.3656, -71.0096);
        assert_eq!(midpoint(point, point), point);
        assert_eq!(distance_nm(point, point), 0.0);
    }

    #[test]
    fn test_antipodal_scale_is_positive_and_finite() {
        let d = distance_nm((89.0, -179.0), (-89.0, 179.0));
        assert!(d.is_finite());
        assert!(d > 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude_is_sixty_nm() {
        let d = distance_nm((10.0, 5.0), (11.0, 5.0));
        assert!((d - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_boston_to_philadelphia() {
        // KBOS -> KPHL is roughly 240 nm.
        let d = distance_nm((42.3656, -71.0096), (39.8719, -75.2411));
        assert!(d > 220.0 && d < 260.0, "got {}", d);
    }

    #[test]
    fn test_search_radius() {
        assert_eq!(search_radius_nm(0.0), 50);
        assert_eq!(search_radius_nm(120.0), 50);
        assert_eq!(search_radius_nm(240.0), 80);
        assert_eq!(search_radius_nm(f64::NAN), 50);
    }
}
