//! Markers and arcs for a list of places.

use glam::DVec3;

use crate::arc::{ArcPath, build_arc};
use crate::color::Rgb;
use crate::error::Result;
use crate::project::GeoPoint;
use crate::spline::CatmullRomCurve;
use crate::tube::{TubeConfig, TubeGeometry};

/// A projected place.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub color: Rgb,
    /// Position on the unit sphere.
    pub position: DVec3,
}

/// Everything needed to draw a set of places: one marker per point and one
/// arc between each consecutive pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobeLayout {
    pub markers: Vec<Marker>,
    pub arcs: Vec<ArcPath>,
}

impl GlobeLayout {
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let markers: Vec<Marker> = points
            .iter()
            .map(|point| Marker {
                name: point.name.clone(),
                color: point.color,
                position: point.position(),
            })
            .collect();

        let arcs = markers
            .windows(2)
            .map(|pair| build_arc(pair[0].position, pair[1].position))
            .collect();

        Self { markers, arcs }
    }

    /// Sweep a tube along every arc.
    ///
    /// Arcs with fewer than two samples cannot form a curve and are reported
    /// as an error.
    pub fn arc_tubes(&self, config: &TubeConfig) -> Result<Vec<TubeGeometry>> {
        self.arcs
            .iter()
            .map(|arc| {
                let curve = CatmullRomCurve::new(arc.to_vec3s())?;
                TubeGeometry::from_curve(&curve, config)
            })
            .collect()
    }
}

/// The built-in set of places shown when no points file is given.
pub fn default_points() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new("Kyiv", Rgb::RED, 50.450_001, 30.523_333),
        GeoPoint::new("Washington DC", Rgb::GREEN, 38.8951, -77.0364),
        GeoPoint::new("Pekin", Rgb::GREEN, 40.568_459, 89.643_028),
        GeoPoint::new("Kyoto", Rgb::RED, 35.011_665, 135.768_326),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::project;

    #[test]
    fn test_layout_from_default_points() {
        let layout = GlobeLayout::from_points(&default_points());
        assert_eq!(layout.markers.len(), 4);
        assert_eq!(layout.arcs.len(), 3);
        assert!(layout.arcs.iter().all(|arc| arc.len() == 29));

        let kyiv = &layout.markers[0];
        assert_eq!(kyiv.name, "Kyiv");
        assert_eq!(kyiv.color, Rgb::RED);
        assert_eq!(kyiv.position, project(50.450_001, 30.523_333));
    }

    #[test]
    fn test_arcs_chain_consecutive_points() {
        let points = default_points();
        let layout = GlobeLayout::from_points(&points);
        for (i, arc) in layout.arcs.iter().enumerate() {
            let expected = build_arc(points[i].position(), points[i + 1].position());
            assert_eq!(*arc, expected);
        }
    }

    #[test]
    fn test_layout_with_too_few_points() {
        assert_eq!(GlobeLayout::from_points(&[]), GlobeLayout::default());

        let single = GlobeLayout::from_points(&default_points()[..1]);
        assert_eq!(single.markers.len(), 1);
        assert!(single.arcs.is_empty());
    }

    #[test]
    fn test_arc_tubes() {
        let layout = GlobeLayout::from_points(&default_points());
        let tubes = layout.arc_tubes(&TubeConfig::default()).unwrap();
        assert_eq!(tubes.len(), 3);
        assert!(tubes.iter().all(|tube| tube.mesh.vertex_count() == 21 * 9));
    }
}
