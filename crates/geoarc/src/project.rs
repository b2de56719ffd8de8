//! Geographic to Cartesian projection.
//!
//! Latitude and longitude are mapped onto a Y-up unit sphere. Longitude -180°
//! lies on the -X axis and longitude 0° on +X, with the north pole at +Y:
//!
//! ```text
//! phi   = (90 - lat)  in radians   (polar angle from +Y)
//! theta = (lng + 180) in radians   (azimuth from -X towards +Z)
//! p     = (-sin(phi) cos(theta), cos(phi), sin(phi) sin(theta))
//! ```

use glam::DVec3;

use crate::color::Rgb;

/// A named location on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub name: String,
    pub color: Rgb,
    /// Latitude in degrees, nominally [-90, 90].
    pub lat: f64,
    /// Longitude in degrees, nominally [-180, 180].
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(name: impl Into<String>, color: Rgb, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            color,
            lat,
            lng,
        }
    }

    /// Position of this point on the unit sphere.
    pub fn position(&self) -> DVec3 {
        project(self.lat, self.lng)
    }
}

/// Project latitude and longitude (degrees) onto the unit sphere.
///
/// Inputs are not range checked. Any finite pair produces a unit vector,
/// but values outside the geographic range wrap around the sphere rather
/// than naming a real place.
pub fn project(lat: f64, lng: f64) -> DVec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    DVec3::new(-(sin_phi * cos_theta), cos_phi, sin_phi * sin_theta)
}

/// Recover latitude and longitude (degrees) from a position.
///
/// The position does not need to be normalized. Longitude is returned in
/// (-180, 180]. The origin maps to `(0, 0)`.
pub fn unproject(position: DVec3) -> (f64, f64) {
    let Some(unit) = position.try_normalize() else {
        return (0.0, 0.0);
    };

    let phi = unit.y.clamp(-1.0, 1.0).acos();
    let theta = unit.z.atan2(-unit.x);

    let lat = 90.0 - phi.to_degrees();
    let mut lng = theta.to_degrees() - 180.0;
    if lng <= -180.0 {
        lng += 360.0;
    }
    (lat, lng)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn assert_close(actual: DVec3, expected: DVec3) {
        assert!(
            (actual - expected).length() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_project_origin() {
        assert_close(project(0.0, 0.0), DVec3::X);
    }

    #[test]
    fn test_project_poles() {
        assert_close(project(90.0, 0.0), DVec3::Y);
        assert_close(project(90.0, 123.0), DVec3::Y);
        assert_close(project(-90.0, -45.0), DVec3::NEG_Y);
    }

    #[test]
    fn test_project_cardinal_longitudes() {
        assert_close(project(0.0, -180.0), DVec3::NEG_X);
        assert_close(project(0.0, 180.0), DVec3::NEG_X);
        // 90°E sits on -Z, 90°W on +Z.
        assert_close(project(0.0, 90.0), DVec3::NEG_Z);
        assert_close(project(0.0, -90.0), DVec3::Z);
    }

    #[test]
    fn test_project_out_of_range_is_still_unit() {
        let p = project(135.0, 400.0);
        assert!((p.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_geo_point_position() {
        let point = GeoPoint::new("Null Island", Rgb::RED, 0.0, 0.0);
        assert_close(point.position(), DVec3::X);
    }

    #[test]
    fn test_unproject_round_trip() {
        for (lat, lng) in [(50.45, 30.52), (-33.9, 151.2), (0.0, 180.0), (12.0, -77.0)] {
            let (back_lat, back_lng) = unproject(project(lat, lng));
            assert!((back_lat - lat).abs() < 1e-9, "lat {lat} -> {back_lat}");
            assert!((back_lng - lng).abs() < 1e-9, "lng {lng} -> {back_lng}");
        }
    }

    #[test]
    fn test_unproject_scaled_and_zero() {
        let (lat, lng) = unproject(project(10.0, 20.0) * 3.5);
        assert!((lat - 10.0).abs() < 1e-9);
        assert!((lng - 20.0).abs() < 1e-9);
        assert_eq!(unproject(DVec3::ZERO), (0.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_project_is_unit_length(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let p = project(lat, lng);
            prop_assert!((p.length() - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_project_unit_length_for_any_finite_input(lat in -1.0e6f64..1.0e6, lng in -1.0e6f64..1.0e6) {
            prop_assert!((project(lat, lng).length() - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_project_is_pure(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            prop_assert_eq!(project(lat, lng), project(lat, lng));
        }
    }
}
