//! Geometry for drawing arcs between places on a globe.
//!
//! This crate provides pure synchronous functions for projecting geographic
//! coordinates onto a unit sphere and for turning pairs of projected points
//! into renderable arc geometry. Nothing here knows about a renderer: meshes
//! are returned as plain vertex and index arrays that the caller uploads.
//!
//! # Pipeline
//!
//! 1. [`project`] maps `(lat, lng)` in degrees to a unit-sphere position.
//! 2. [`build_arc`] samples a path between two positions that bulges
//!    slightly away from the surface.
//! 3. [`CatmullRomCurve`] smooths the samples into a continuous curve.
//! 4. [`TubeGeometry`] sweeps a thin tube along the curve.
//!
//! [`GlobeLayout`] runs steps 1 and 2 for a whole list of [`GeoPoint`]s.

mod arc;
mod color;
mod error;
mod layout;
mod mesh;
mod project;
mod sphere;
mod spline;
mod tube;

pub use arc::{ARC_LIFT, ARC_SEGMENTS, ArcConfig, ArcPath, build_arc, build_arc_with};
pub use color::Rgb;
pub use error::{Error, Result};
pub use layout::{GlobeLayout, Marker, default_points};
pub use mesh::MeshData;
pub use project::{GeoPoint, project, unproject};
pub use sphere::SphereGeometry;
pub use spline::{CatmullRomCurve, CurveKind, DEFAULT_ARC_LENGTH_DIVISIONS};
pub use tube::{FrenetFrames, TubeConfig, TubeGeometry, frenet_frames};
