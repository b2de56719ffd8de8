//! Interactive globe with animated arcs between places, using Bevy.
//!
//! Places are projected onto a textured unit sphere and joined in order by
//! thin tubes that bulge slightly off the surface. The tubes share a shader
//! material driven by a frame clock. The scene is only built once both arc
//! shader stages have loaded.

mod animation;
mod arc_material;
mod camera;
mod globe;
mod launch_params;
mod loader;
mod mesh;
mod points;
mod ui;

use animation::AnimationPlugin;
use arc_material::ArcMaterialPlugin;
use bevy::camera::ClearColorConfig;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use camera::{OrbitCamera, OrbitCameraPlugin};
use globe::GlobePlugin;
use loader::ShaderLoaderPlugin;
use ui::DebugUiPlugin;

/// Camera starting position: in front of the globe, looking at its center.
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 2.0);

/// Background color (#eeeeee).
const CLEAR_COLOR: Color = Color::srgb(0.933, 0.933, 0.933);

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ArcMaterialPlugin,
            ShaderLoaderPlugin,
            AnimationPlugin,
            OrbitCameraPlugin,
            GlobePlugin,
            DebugUiPlugin,
        ))
        .add_systems(Startup, setup_camera);
    }
}

/// Spawn the orbit camera.
fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::from_position(CAMERA_START, Vec3::ZERO);

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(CLEAR_COLOR),
            ..default()
        },
        orbit.transform(),
        Projection::Perspective(PerspectiveProjection {
            fov: 70.0_f32.to_radians(),
            near: 0.001,
            far: 1000.0,
            ..Default::default()
        }),
        // Disable tonemapping since every material is unlit.
        Tonemapping::None,
        orbit,
    ));

    tracing::info!("Camera ready - drag to rotate, scroll to zoom, space to pause");
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = match launch_params::parse() {
        Ok(params) => params,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Drawing {} places, clock step {}{}",
        params.points.len(),
        params.time_step,
        if params.paused { " (paused)" } else { "" }
    );

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "globe-viewer".to_string(),
        resolution: (1280, 720).into(),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    app.insert_resource(params).add_plugins(AppPlugin).run();
}
