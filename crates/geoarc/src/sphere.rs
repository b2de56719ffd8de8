//! UV spheres aligned with [`project`](crate::project).
//!
//! The seam sits at longitude -180° and texture coordinates follow an
//! equirectangular layout: `u = (lng + 180) / 360`, `v = (90 - lat) / 180`.
//! `v` grows southwards, matching image row order, so a world map texture
//! lines up with projected markers.

use std::f32::consts::{PI, TAU};

use crate::error::{Error, Result};
use crate::mesh::MeshData;

/// Parameters for a UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    /// Segments around the equator.
    pub width_segments: u32,
    /// Segments from pole to pole.
    pub height_segments: u32,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments,
            height_segments,
        }
    }

    /// Build the mesh.
    ///
    /// Each row of vertices repeats its first column at `u = 1` so the seam
    /// can carry both texture edges. Pole rows only emit one triangle per
    /// quad and their `u` is shifted half a segment so the pole texel sits
    /// in the middle of its wedge.
    #[allow(clippy::cast_precision_loss)]
    pub fn build(&self) -> Result<MeshData> {
        if self.width_segments < 3 {
            return Err(Error::TooFewSegments {
                context: "sphere width segments",
                minimum: 3,
                actual: self.width_segments,
            });
        }
        if self.height_segments < 2 {
            return Err(Error::TooFewSegments {
                context: "sphere height segments",
                minimum: 2,
                actual: self.height_segments,
            });
        }

        let width = self.width_segments;
        let height = self.height_segments;
        let vertex_count = (width as usize + 1) * (height as usize + 1);

        let mut mesh = MeshData {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(width as usize * height as usize * 6),
        };

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let u_offset = if iy == 0 {
                0.5 / width as f32
            } else if iy == height {
                -0.5 / width as f32
            } else {
                0.0
            };

            let (sin_polar, cos_polar) = (v * PI).sin_cos();

            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let (sin_azimuth, cos_azimuth) = (u * TAU).sin_cos();

                let normal = [
                    -cos_azimuth * sin_polar,
                    cos_polar,
                    sin_azimuth * sin_polar,
                ];
                mesh.positions.push(normal.map(|c| c * self.radius));
                mesh.normals.push(normal);
                mesh.uvs.push([u + u_offset, v]);
            }
        }

        let row = width + 1;
        for iy in 0..height {
            for ix in 0..width {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    mesh.indices.extend([a, b, d]);
                }
                if iy != height - 1 {
                    mesh.indices.extend([b, c, d]);
                }
            }
        }

        Ok(mesh)
    }
}
