//! Points files: the list of places drawn on the globe.
//!
//! A points file is a JSON array of objects:
//!
//! ```json
//! [
//!   { "name": "Kyiv", "color": "#ff0000", "lat": 50.45, "lng": 30.52 },
//!   { "name": "Kyoto", "color": "#ff0000", "lat": 35.01, "lng": 135.77 }
//! ]
//! ```
//!
//! Coordinates are not range checked.

use std::fmt;
use std::path::{Path, PathBuf};

use geoarc::{GeoPoint, Rgb};
use serde::Deserialize;

/// Errors that can occur while reading a points file.
#[derive(Debug)]
pub enum PointsError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid points array.
    Parse { origin: String, message: String },
    /// A point has an unparseable color.
    Color { name: String, source: geoarc::Error },
}

impl fmt::Display for PointsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse { origin, message } => {
                write!(f, "failed to parse points from {origin}: {message}")
            }
            Self::Color { name, source } => {
                write!(f, "point '{name}' has {source}")
            }
        }
    }
}

impl std::error::Error for PointsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Color { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PointEntry {
    name: String,
    color: String,
    lat: f64,
    lng: f64,
}

/// Parse points from JSON text. `origin` names the input in error messages.
pub fn parse_points(json: &str, origin: &str) -> Result<Vec<GeoPoint>, PointsError> {
    let entries: Vec<PointEntry> =
        serde_json::from_str(json).map_err(|e| PointsError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

    entries
        .into_iter()
        .map(|entry| {
            let color = entry
                .color
                .parse::<Rgb>()
                .map_err(|e| PointsError::Color {
                    name: entry.name.clone(),
                    source: e,
                })?;
            Ok(GeoPoint::new(entry.name, color, entry.lat, entry.lng))
        })
        .collect()
}

/// Read and parse a points file.
#[cfg_attr(target_family = "wasm", allow(dead_code))]
pub fn load_points(path: &Path) -> Result<Vec<GeoPoint>, PointsError> {
    let json = std::fs::read_to_string(path).map_err(|e| PointsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let points = parse_points(&json, &path.display().to_string())?;

    tracing::info!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}
