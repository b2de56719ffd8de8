//! Orbit camera controller for inspecting the globe.
//!
//! Left-drag rotates around the target, the scroll wheel zooms. The camera
//! always looks at its target with world +Y up.

use std::f32::consts::FRAC_PI_2;

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::input::egui_wants_any_pointer_input;

/// Margin that keeps the pitch short of the poles, where `looking_at`
/// would lose its up vector.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Plugin for orbit camera controls.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>().add_systems(
            Update,
            (
                (orbit_rotate, orbit_zoom).run_if(not(egui_wants_any_pointer_input)),
                apply_orbit,
            )
                .chain(),
        );
    }
}

/// Settings for orbit movement.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitSettings {
    /// Radians of rotation per pixel of mouse movement.
    pub rotate_sensitivity: f32,
    /// Zoom factor per scroll line.
    pub zoom_factor: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            zoom_factor: 1.1,
            min_radius: 1.1,
            max_radius: 20.0,
        }
    }
}

/// Spherical camera position around a target.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Distance from the target.
    pub radius: f32,
    /// Rotation about +Y. Zero looks down -Z from the +Z side.
    pub yaw: f32,
    /// Elevation above the target's horizontal plane.
    pub pitch: f32,
}

impl OrbitCamera {
    /// Orbit that places the camera at `position`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return Self {
                target,
                radius: 0.0,
                yaw: 0.0,
                pitch: 0.0,
            };
        }

        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// World-space camera position.
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.radius * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }

    /// Rotate by a mouse drag. The globe follows the pointer.
    pub fn rotate(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch + delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by scroll lines. Positive values move closer.
    pub fn zoom(&mut self, lines: f32, settings: &OrbitSettings) {
        let factor = settings.zoom_factor.powf(-lines);
        self.radius = (self.radius * factor).clamp(settings.min_radius, settings.max_radius);
    }
}

/// Rotate while the left button is held.
#[allow(clippy::needless_pass_by_value)]
fn orbit_rotate(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    settings: Res<OrbitSettings>,
    mut query: Query<&mut OrbitCamera>,
) {
    let delta: Vec2 = motion.read().map(|event| event.delta).sum();
    if !mouse.pressed(MouseButton::Left) || delta == Vec2::ZERO {
        return;
    }

    for mut orbit in &mut query {
        orbit.rotate(delta, settings.rotate_sensitivity);
    }
}

/// Zoom with the scroll wheel.
#[allow(clippy::needless_pass_by_value)]
fn orbit_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    settings: Res<OrbitSettings>,
    mut query: Query<&mut OrbitCamera>,
) {
    let mut lines = 0.0;
    for event in scroll_events.read() {
        // Normalize scroll value: web reports pixels, native reports lines.
        lines += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 120.0,
        };
    }
    if lines == 0.0 {
        return;
    }

    for mut orbit in &mut query {
        orbit.zoom(lines, &settings);
    }
}

fn apply_orbit(mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (orbit, mut transform) in &mut query {
        *transform = orbit.transform();
    }
}
