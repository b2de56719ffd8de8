//! Sampled arcs between two points on the unit sphere.

use std::f64::consts::PI;

use glam::{DVec3, Vec3};

/// Number of intervals an arc is divided into by default.
pub const ARC_SEGMENTS: usize = 30;

/// Default peak height of an arc above the sphere, as a fraction of radius.
pub const ARC_LIFT: f64 = 0.04;

/// Parameters for [`build_arc_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcConfig {
    /// Intervals between the two endpoints. Samples are taken at the
    /// `segments - 1` interior positions, so the endpoints themselves are
    /// never part of the output.
    pub segments: usize,
    /// Extra radius at the middle of the arc.
    pub lift: f64,
}

impl Default for ArcConfig {
    fn default() -> Self {
        Self {
            segments: ARC_SEGMENTS,
            lift: ARC_LIFT,
        }
    }
}

/// Ordered interior samples of an arc.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcPath {
    samples: Vec<DVec3>,
}

impl ArcPath {
    pub fn samples(&self) -> &[DVec3] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DVec3> {
        self.samples.iter()
    }

    /// Samples converted to single precision for mesh building.
    pub fn to_vec3s(&self) -> Vec<Vec3> {
        self.samples.iter().map(|p| p.as_vec3()).collect()
    }
}

impl<'a> IntoIterator for &'a ArcPath {
    type Item = &'a DVec3;
    type IntoIter = std::slice::Iter<'a, DVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Build the default 29-sample arc between `p1` and `p2`.
pub fn build_arc(p1: DVec3, p2: DVec3) -> ArcPath {
    build_arc_with(p1, p2, &ArcConfig::default())
}

/// Build an arc between `p1` and `p2`.
///
/// Each sample is the chord point at `t = i / segments`, pushed back onto the
/// unit sphere and then raised by `lift * sin(pi * t)`, so the arc peaks at
/// its midpoint. When the chord passes through the origin (antipodal
/// endpoints) the affected sample collapses to the origin.
pub fn build_arc_with(p1: DVec3, p2: DVec3, config: &ArcConfig) -> ArcPath {
    let segments = config.segments;
    let samples = (1..segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / segments as f64;
            let scale = 1.0 + config.lift * (PI * t).sin();
            p1.lerp(p2, t).normalize_or_zero() * scale
        })
        .collect();

    ArcPath { samples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::project;

    #[test]
    fn test_build_arc_sample_count() {
        let arc = build_arc(project(50.45, 30.52), project(38.9, -77.0));
        assert_eq!(arc.len(), 29);
    }

    #[test]
    fn test_build_arc_excludes_endpoints() {
        let p1 = project(50.45, 30.52);
        let p2 = project(38.9, -77.0);
        let arc = build_arc(p1, p2);

        let first = arc.samples()[0];
        let last = arc.samples()[arc.len() - 1];
        assert!((first - p1).length() > 1e-3);
        assert!((last - p2).length() > 1e-3);

        // First and last samples sit between the endpoints.
        assert!(first.distance(p1) < first.distance(p2));
        assert!(last.distance(p2) < last.distance(p1));
    }

    #[test]
    fn test_build_arc_midpoint_lift() {
        let arc = build_arc(project(0.0, 0.0), project(0.0, 90.0));
        // Sample i = 15 is at index 14.
        let mid = arc.samples()[14];
        assert!((mid.length() - 1.04).abs() < 1e-9);
    }

    #[test]
    fn test_build_arc_magnitudes_follow_sine() {
        let arc = build_arc(project(10.0, 10.0), project(-20.0, 60.0));
        for (index, sample) in arc.iter().enumerate() {
            let i = index + 1;
            let expected = 1.0 + 0.04 * (PI * i as f64 / 30.0).sin();
            assert!((sample.length() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_build_arc_same_endpoints() {
        let p = project(35.0, 135.0);
        let arc = build_arc(p, p);
        for sample in &arc {
            assert!(sample.normalize().distance(p) < 1e-9);
        }
    }

    #[test]
    fn test_build_arc_antipodal_midpoint_collapses() {
        let arc = build_arc(DVec3::X, DVec3::NEG_X);
        assert_eq!(arc.samples()[14], DVec3::ZERO);
    }

    #[test]
    fn test_build_arc_with_custom_config() {
        let config = ArcConfig {
            segments: 4,
            lift: 0.5,
        };
        let arc = build_arc_with(DVec3::X, DVec3::Z, &config);
        assert_eq!(arc.len(), 3);
        assert!((arc.samples()[1].length() - 1.5).abs() < 1e-9);

        let empty = build_arc_with(DVec3::X, DVec3::Z, &ArcConfig { segments: 1, lift: 0.1 });
        assert!(empty.is_empty());
    }

    #[test]
    fn test_to_vec3s() {
        let arc = build_arc(DVec3::X, DVec3::Y);
        let points = arc.to_vec3s();
        assert_eq!(points.len(), arc.len());
        assert!((points[0] - arc.samples()[0].as_vec3()).length() < 1e-6);
    }
}
