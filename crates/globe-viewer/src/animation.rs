//! Running clock and arc shader uniforms.
//!
//! A single time value advances by a fixed step every frame while playing,
//! starting once the shader barrier has opened.
//! Each frame the clock, the debug panel's progress value and the viewport
//! size are copied into the shared arc material.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use bevy_egui::input::egui_wants_any_keyboard_input;

use crate::arc_material::{ArcMaterial, ArcMaterialHandle, ArcSettings, cover_resolution};
use crate::launch_params::{DEFAULT_TIME_STEP, LaunchParams};
use crate::loader::barrier_is_ready;

/// Plugin for the animation clock and uniform updates.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArcClock>()
            .init_resource::<ViewportSize>()
            .add_systems(Startup, init_viewport_size)
            .add_systems(
                Update,
                (
                    toggle_playback.run_if(not(egui_wants_any_keyboard_input)),
                    advance_clock.run_if(barrier_is_ready),
                    track_resize,
                    sync_arc_uniform,
                )
                    .chain(),
            );
    }
}

/// Frame-stepped animation clock.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ArcClock {
    time: f32,
    step: f32,
    playing: bool,
}

impl ArcClock {
    pub fn new(step: f32, playing: bool) -> Self {
        Self {
            time: 0.0,
            step,
            playing,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Advance one frame. Does nothing while stopped.
    pub fn tick(&mut self) {
        if self.playing {
            self.time += self.step;
        }
    }
}

impl FromWorld for ArcClock {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<LaunchParams>()
            .map_or_else(
                || Self::new(DEFAULT_TIME_STEP, true),
                |params| Self::new(params.time_step, !params.paused),
            )
    }
}

/// Logical size of the primary window.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

fn init_viewport_size(
    window: Single<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    viewport.width = window.width();
    viewport.height = window.height();
}

/// Space toggles the clock.
#[allow(clippy::needless_pass_by_value)]
fn toggle_playback(keyboard: Res<ButtonInput<KeyCode>>, mut clock: ResMut<ArcClock>) {
    if keyboard.just_pressed(KeyCode::Space) {
        clock.toggle();
        tracing::info!(playing = clock.is_playing(), "Toggled arc animation");
    }
}

fn advance_clock(mut clock: ResMut<ArcClock>) {
    clock.tick();
}

fn track_resize(
    mut resized: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    let primary = primary.single().ok();
    for event in resized.read() {
        if primary.is_some_and(|entity| entity != event.window) {
            continue;
        }
        viewport.width = event.width;
        viewport.height = event.height;
        tracing::debug!("Viewport resized to {}x{}", event.width, event.height);
    }
}

/// Write clock, progress and resolution into the shared arc material.
#[allow(clippy::needless_pass_by_value)]
fn sync_arc_uniform(
    clock: Res<ArcClock>,
    settings: Res<ArcSettings>,
    viewport: Res<ViewportSize>,
    handle: Option<Res<ArcMaterialHandle>>,
    mut materials: ResMut<Assets<ArcMaterial>>,
) {
    let Some(handle) = handle else {
        return;
    };
    let Some(mut material) = materials.get_mut(&handle.0) else {
        return;
    };

    material.uniform.time = clock.time();
    material.uniform.progress = settings.progress;
    material.uniform.resolution = cover_resolution(viewport.width, viewport.height);
}
