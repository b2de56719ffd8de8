//! Catmull-Rom curves through arc samples.
//!
//! The curve is open: the first and last segments use phantom control points
//! mirrored from the ends. Knot spacing can be uniform (with a tension
//! factor), centripetal or chordal. Arc-length tables map a uniform
//! parameter `u` to the curve parameter `t` so that mesh rings are spaced
//! evenly along the curve.

use glam::Vec3;

use crate::error::{Error, Result};

/// Default number of samples used to measure curve length.
pub const DEFAULT_ARC_LENGTH_DIVISIONS: usize = 200;

/// Spans shorter than this are treated as degenerate.
const MIN_SPAN: f32 = 1e-4;

/// Step used for finite-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// Knot parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CurveKind {
    /// Knot spacing proportional to the square root of chord length.
    #[default]
    Centripetal,
    /// Knot spacing proportional to chord length.
    Chordal,
    /// Evenly spaced knots with tangents scaled by `tension`.
    Uniform { tension: f32 },
}

/// An open Catmull-Rom spline through a list of control points.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    kind: CurveKind,
    /// Cumulative lengths at `DEFAULT_ARC_LENGTH_DIVISIONS + 1` samples.
    lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Create a centripetal curve.
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        Self::with_kind(points, CurveKind::default())
    }

    pub fn with_kind(points: Vec<Vec3>, kind: CurveKind) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::TooFewPoints {
                required: 2,
                actual: points.len(),
            });
        }

        let mut curve = Self {
            points,
            kind,
            lengths: Vec::new(),
        };
        curve.lengths = curve.lengths(DEFAULT_ARC_LENGTH_DIVISIONS);
        Ok(curve)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Point at curve parameter `t` in [0, 1].
    ///
    /// `t` is spread evenly over the control point spans, so it is not
    /// proportional to distance travelled; see [`Self::point_at`].
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn point(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let len = points.len();

        let p = (len - 1) as f32 * t.clamp(0.0, 1.0);
        let mut index = p.floor() as usize;
        let mut weight = p - index as f32;

        if index >= len - 1 {
            index = len - 2;
            weight = 1.0;
        }

        let p0 = if index > 0 {
            points[index - 1]
        } else {
            2.0 * points[0] - points[1]
        };
        let p1 = points[index];
        let p2 = points[index + 1];
        let p3 = if index + 2 < len {
            points[index + 2]
        } else {
            2.0 * points[len - 1] - points[len - 2]
        };

        let poly = match self.kind {
            CurveKind::Uniform { tension } => CubicPoly::catmull_rom(p0, p1, p2, p3, tension),
            CurveKind::Centripetal => CubicPoly::non_uniform(p0, p1, p2, p3, 0.25),
            CurveKind::Chordal => CubicPoly::non_uniform(p0, p1, p2, p3, 0.5),
        };
        poly.eval(weight)
    }

    /// Cumulative lengths measured at `divisions + 1` evenly spaced `t`.
    #[allow(clippy::cast_precision_loss)]
    pub fn lengths(&self, divisions: usize) -> Vec<f32> {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        lengths
    }

    /// Total length of the curve.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Map a distance fraction `u` in [0, 1] to the curve parameter `t`.
    #[allow(clippy::cast_precision_loss)]
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.lengths;
        let count = lengths.len();
        let total = self.length();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * total;

        // Largest index whose cumulative length does not exceed the target.
        let index = lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(count - 1);

        if index == count - 1 || lengths[index] == target {
            return index as f32 / (count - 1) as f32;
        }

        let before = lengths[index];
        let segment = lengths[index + 1] - before;
        let fraction = (target - before) / segment;

        (index as f32 + fraction) / (count - 1) as f32
    }

    /// Point at distance fraction `u` along the curve.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at curve parameter `t`.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    /// Unit tangent at distance fraction `u`.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }
}

/// Per-axis cubic `c0 + c1 t + c2 t^2 + c3 t^3`, evaluated on vectors.
struct CubicPoly {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicPoly {
    /// Hermite cubic from endpoints and end tangents.
    fn hermite(x0: Vec3, x1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: x0,
            c1: t0,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            c3: 2.0 * x0 - 2.0 * x1 + t0 + t1,
        }
    }

    fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, tension: f32) -> Self {
        Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1))
    }

    /// Non-uniform spans of `distance_squared ^ pow`.
    fn non_uniform(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, pow: f32) -> Self {
        let mut dt0 = p0.distance_squared(p1).powf(pow);
        let mut dt1 = p1.distance_squared(p2).powf(pow);
        let mut dt2 = p2.distance_squared(p3).powf(pow);

        if dt1 < MIN_SPAN {
            dt1 = 1.0;
        }
        if dt0 < MIN_SPAN {
            dt0 = dt1;
        }
        if dt2 < MIN_SPAN {
            dt2 = dt1;
        }

        let mut t1 = (p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1;
        let mut t2 = (p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2;

        // Rescale tangents for the [0, 1] parameter of the middle span.
        t1 *= dt1;
        t2 *= dt1;

        Self::hermite(p1, p2, t1, t2)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3, tolerance: f32) {
        assert!(
            (actual - expected).length() < tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn zigzag() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 1.0, 0.5),
        ]
    }

    #[test]
    fn test_requires_two_points() {
        assert!(matches!(
            CatmullRomCurve::new(vec![Vec3::ZERO]),
            Err(Error::TooFewPoints {
                required: 2,
                actual: 1
            })
        ));
        assert!(CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::X]).is_ok());
    }

    #[test]
    fn test_passes_through_control_points() {
        for kind in [
            CurveKind::Centripetal,
            CurveKind::Chordal,
            CurveKind::Uniform { tension: 0.5 },
        ] {
            let points = zigzag();
            let curve = CatmullRomCurve::with_kind(points.clone(), kind).unwrap();
            for (i, expected) in points.iter().enumerate() {
                let t = i as f32 / (points.len() - 1) as f32;
                assert_close(curve.point(t), *expected, 1e-5);
            }
        }
    }

    #[test]
    fn test_two_points_is_a_line() {
        let curve = CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]).unwrap();
        assert_close(curve.point(0.5), Vec3::new(1.0, 0.0, 0.0), 1e-5);
        assert!((curve.length() - 2.0).abs() < 1e-4);
        assert_close(curve.tangent(0.5), Vec3::X, 1e-4);
    }

    #[test]
    fn test_lengths_are_monotonic() {
        let curve = CatmullRomCurve::new(zigzag()).unwrap();
        let lengths = curve.lengths(50);
        assert_eq!(lengths.len(), 51);
        assert_eq!(lengths[0], 0.0);
        assert!(lengths.windows(2).all(|w| w[1] >= w[0]));
        // Longer than the straight line between the ends.
        assert!(curve.length() > zigzag()[0].distance(zigzag()[3]));
    }

    #[test]
    fn test_u_to_t_endpoints() {
        let curve = CatmullRomCurve::new(zigzag()).unwrap();
        assert!(curve.u_to_t(0.0).abs() < 1e-6);
        assert!((curve.u_to_t(1.0) - 1.0).abs() < 1e-6);
        assert_close(curve.point_at(0.0), zigzag()[0], 1e-5);
        assert_close(curve.point_at(1.0), zigzag()[3], 1e-5);
    }

    #[test]
    fn test_point_at_is_evenly_spaced() {
        // Uneven control spacing: plain `t` would bunch samples up.
        let points = vec![
            Vec3::ZERO,
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(0.2, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        let curve = CatmullRomCurve::new(points).unwrap();
        let steps: Vec<f32> = (0..=10)
            .map(|i| curve.point_at(i as f32 / 10.0))
            .collect::<Vec<_>>()
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .collect();
        let expected = curve.length() / 10.0;
        for step in steps {
            assert!((step - expected).abs() < expected * 0.05, "step {step} vs {expected}");
        }
    }

    #[test]
    fn test_tangent_is_unit() {
        let curve = CatmullRomCurve::new(zigzag()).unwrap();
        for i in 0..=20 {
            let tangent = curve.tangent_at(i as f32 / 20.0);
            assert!((tangent.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_coincident_points_stay_finite() {
        let curve =
            CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::X]).unwrap();
        for i in 0..=10 {
            assert!(curve.point(i as f32 / 10.0).is_finite());
        }
    }
}
