//! Tube meshes swept along a curve.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::error::{Error, Result};
use crate::mesh::MeshData;
use crate::spline::CatmullRomCurve;

/// Parameters for [`TubeGeometry::from_curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeConfig {
    /// Rings along the curve (the mesh has one more ring than this).
    pub tubular_segments: u32,
    pub radius: f32,
    /// Vertices around each ring (plus one duplicated seam vertex).
    pub radial_segments: u32,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            tubular_segments: 20,
            radius: 0.0025,
            radial_segments: 8,
        }
    }
}

impl TubeConfig {
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_tubular_segments(mut self, segments: u32) -> Self {
        self.tubular_segments = segments;
        self
    }

    #[must_use]
    pub fn with_radial_segments(mut self, segments: u32) -> Self {
        self.radial_segments = segments;
        self
    }
}

/// Orthonormal frames sampled evenly along a curve.
#[derive(Debug, Clone, Default)]
pub struct FrenetFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

/// Compute `segments + 1` rotation-minimizing frames along `curve`.
/// Zero segments is treated as one.
///
/// The first normal is perpendicular to the tangent and to the world axis the
/// tangent points least along. Each following frame is the previous one
/// rotated by the turn between consecutive tangents, so the tube does not
/// twist.
#[allow(clippy::cast_precision_loss)]
pub fn frenet_frames(curve: &CatmullRomCurve, segments: u32) -> FrenetFrames {
    let segments = segments.max(1);
    let count = segments as usize + 1;
    let tangents: Vec<Vec3> = (0..count)
        .map(|i| curve.tangent_at(i as f32 / segments as f32))
        .collect();

    let mut normals = Vec::with_capacity(count);
    let mut binormals = Vec::with_capacity(count);

    let first = tangents[0];
    let axis = smallest_axis(first);
    let side = first.cross(axis).normalize_or_zero();
    normals.push(first.cross(side));
    binormals.push(first.cross(normals[0]));

    for i in 1..count {
        let mut normal = normals[i - 1];
        let turn = tangents[i - 1].cross(tangents[i]);

        if turn.length() > f32::EPSILON {
            let angle = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(turn.normalize(), angle) * normal;
        }

        binormals.push(tangents[i].cross(normal));
        normals.push(normal);
    }

    FrenetFrames {
        tangents,
        normals,
        binormals,
    }
}

fn smallest_axis(tangent: Vec3) -> Vec3 {
    let abs = tangent.abs();
    let mut min = f32::MAX;
    let mut axis = Vec3::X;

    if abs.x <= min {
        min = abs.x;
        axis = Vec3::X;
    }
    if abs.y <= min {
        min = abs.y;
        axis = Vec3::Y;
    }
    if abs.z <= min {
        axis = Vec3::Z;
    }
    axis
}

/// A tube around a curve, open at both ends.
#[derive(Debug, Clone)]
pub struct TubeGeometry {
    pub mesh: MeshData,
    pub frames: FrenetFrames,
}

impl TubeGeometry {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_curve(curve: &CatmullRomCurve, config: &TubeConfig) -> Result<Self> {
        if config.tubular_segments == 0 {
            return Err(Error::TooFewSegments {
                context: "tubular segments",
                minimum: 1,
                actual: 0,
            });
        }
        if config.radial_segments == 0 {
            return Err(Error::TooFewSegments {
                context: "radial segments",
                minimum: 1,
                actual: 0,
            });
        }

        let tubular = config.tubular_segments;
        let radial = config.radial_segments;
        let frames = frenet_frames(curve, tubular);

        let ring = radial as usize + 1;
        let vertex_count = (tubular as usize + 1) * ring;
        let mut mesh = MeshData {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(tubular as usize * radial as usize * 6),
        };

        for i in 0..=tubular {
            let u = i as f32 / tubular as f32;
            let center = curve.point_at(u);
            let normal = frames.normals[i as usize];
            let binormal = frames.binormals[i as usize];

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let (sin, cos) = v.sin_cos();
                let cos = -cos;

                let out = (cos * normal + sin * binormal).normalize_or_zero();
                mesh.positions.push((center + config.radius * out).to_array());
                mesh.normals.push(out.to_array());
                mesh.uvs
                    .push([u, j as f32 / radial as f32]);
            }
        }

        for j in 1..=tubular {
            for i in 1..=radial {
                let a = (radial + 1) * (j - 1) + (i - 1);
                let b = (radial + 1) * j + (i - 1);
                let c = (radial + 1) * j + i;
                let d = (radial + 1) * (j - 1) + i;

                mesh.indices.extend([a, b, d, b, c, d]);
            }
        }

        Ok(Self { mesh, frames })
    }
}
