//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use bevy::prelude::*;
use geoarc::{GeoPoint, default_points};

use crate::points::PointsError;

/// Default clock increment per rendered frame.
pub const DEFAULT_TIME_STEP: f32 = 0.05;

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// Places to mark and connect, in arc order.
    pub points: Vec<GeoPoint>,
    /// Start with the clock stopped.
    pub paused: bool,
    /// Clock increment per rendered frame.
    pub time_step: f32,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            points: default_points(),
            paused: false,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::points::load_points;

    /// Parse a non-negative, finite clock step.
    fn parse_time_step(s: &str) -> Result<f32, String> {
        let step = s
            .parse::<f32>()
            .map_err(|e| format!("invalid time step: {e}"))?;
        if !step.is_finite() || step < 0.0 {
            return Err(format!("time step must be finite and non-negative, got {step}"));
        }
        Ok(step)
    }

    #[derive(Parser, Debug)]
    #[command(about = "Interactive globe with animated arcs between places")]
    pub(super) struct CliArgs {
        /// JSON file of points to draw (defaults to a built-in set).
        #[arg(long)]
        pub points: Option<PathBuf>,

        /// Start with the animation stopped.
        #[arg(long)]
        pub paused: bool,

        /// Animation clock increment per frame.
        #[arg(long, default_value_t = DEFAULT_TIME_STEP, value_parser = parse_time_step)]
        pub time_step: f32,
    }

    impl CliArgs {
        pub(super) fn into_params(self) -> Result<LaunchParams, PointsError> {
            let points = match &self.points {
                Some(path) => load_points(path)?,
                None => default_points(),
            };
            Ok(LaunchParams {
                points,
                paused: self.paused,
                time_step: self.time_step,
            })
        }
    }

    pub fn parse() -> Result<LaunchParams, PointsError> {
        CliArgs::parse().into_params()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let args = CliArgs::try_parse_from(["globe-viewer"]).unwrap();
            let params = args.into_params().unwrap();
            assert!(!params.paused);
            assert!((params.time_step - DEFAULT_TIME_STEP).abs() < f32::EPSILON);
            assert_eq!(params.points, default_points());
        }

        #[test]
        fn test_flags() {
            let args =
                CliArgs::try_parse_from(["globe-viewer", "--paused", "--time-step", "0.1"])
                    .unwrap();
            assert!(args.paused);
            assert!((args.time_step - 0.1).abs() < f32::EPSILON);
        }

        #[test]
        fn test_rejects_negative_time_step() {
            assert!(CliArgs::try_parse_from(["globe-viewer", "--time-step=-1"]).is_err());
            assert!(CliArgs::try_parse_from(["globe-viewer", "--time-step", "nan"]).is_err());
        }

        #[test]
        fn test_missing_points_file() {
            let args =
                CliArgs::try_parse_from(["globe-viewer", "--points", "/nonexistent/points.json"])
                    .unwrap();
            assert!(matches!(args.into_params(), Err(PointsError::Io { .. })));
        }
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> Result<LaunchParams, PointsError> {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        Ok(LaunchParams::default())
    }
}
