//! Debug UI for the arc animation and camera.
//!
//! Shows FPS, the animation clock with play/stop, the progress slider fed
//! to the arc shader, the camera position and the list of places.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use geoarc::unproject;

use crate::animation::ArcClock;
use crate::arc_material::ArcSettings;
use crate::camera::OrbitCamera;
use crate::globe::{ArcTube, PlaceMarker};
use crate::launch_params::LaunchParams;
use crate::loader::LoadBarrier;

/// Plugin for debug UI overlay.
pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(EguiPrimaryContextPass, debug_ui_system);
    }
}

/// One-line description of the shader barrier.
fn barrier_label(barrier: &LoadBarrier) -> String {
    match barrier {
        LoadBarrier::Waiting => "Shaders: loading".to_string(),
        LoadBarrier::Ready => "Shaders: ready".to_string(),
        LoadBarrier::Failed { asset, .. } => format!("Shaders: failed ({asset})"),
    }
}

/// Render the debug UI overlay.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn debug_ui_system(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    barrier: Res<LoadBarrier>,
    params: Res<LaunchParams>,
    mut clock: ResMut<ArcClock>,
    mut settings: ResMut<ArcSettings>,
    camera_query: Query<&OrbitCamera>,
    marker_query: Query<(), With<PlaceMarker>>,
    arc_query: Query<&ArcTube>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
        .unwrap_or(0.0);

    // The point on the globe directly under the camera.
    let (position, lat, lng) = if let Ok(orbit) = camera_query.single() {
        let position = orbit.position();
        let (lat, lng) = unproject(position.as_dvec3());
        (position, lat, lng)
    } else {
        (Vec3::ZERO, 0.0, 0.0)
    };

    egui::Window::new("Debug")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps:.0}"));
            ui.label(barrier_label(&barrier));
            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!(
                    "Time: {:.2} (+{:.2}/frame)",
                    clock.time(),
                    clock.step()
                ));
                if clock.is_playing() {
                    if ui.button("Stop").clicked() {
                        clock.stop();
                    }
                } else if ui.button("Play").clicked() {
                    clock.play();
                }
            });
            ui.add(
                egui::Slider::new(&mut settings.progress, 0.0..=1.0)
                    .step_by(0.01)
                    .text("progress"),
            );
            ui.separator();

            ui.label(format!(
                "Camera: ({:.2}, {:.2}, {:.2})",
                position.x, position.y, position.z
            ));
            ui.label(format!("Over: {lat:.2}°, {lng:.2}°"));
            ui.separator();

            ui.label("Places:");
            for point in &params.points {
                ui.horizontal(|ui| {
                    let color = egui::Color32::from_rgb(point.color.r, point.color.g, point.color.b);
                    ui.colored_label(color, "●");
                    ui.label(format!("{} ({:.2}°, {:.2}°)", point.name, point.lat, point.lng));
                });
            }
            ui.label(format!("Markers: {}", marker_query.iter().count()));
            for arc in &arc_query {
                ui.label(format!("  {} → {}", arc.from, arc.to));
            }
            ui.separator();

            ui.label("Controls:");
            ui.label("  Left drag - Rotate");
            ui.label("  Scroll - Zoom");
            ui.label("  Space - Play/stop");
        });

    Ok(())
}
