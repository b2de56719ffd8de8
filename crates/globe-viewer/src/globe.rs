//! Globe scene: planet, place markers and arc tubes.
//!
//! Built once, on the frame the shader barrier opens. Nothing is spawned if
//! the barrier fails.

use bevy::prelude::*;
use geoarc::{GlobeLayout, Rgb, SphereGeometry, TubeConfig};

use crate::animation::{ArcClock, ViewportSize};
use crate::arc_material::{
    ArcMaterial, ArcMaterialHandle, ArcSettings, ArcUniform, cover_resolution,
};
use crate::launch_params::LaunchParams;
use crate::loader::LoadBarrier;
use crate::mesh::convert_mesh;

/// Equirectangular planet texture.
pub const PLANET_TEXTURE: &str = "textures/earth.png";

const PLANET_SEGMENTS: u32 = 30;
const MARKER_RADIUS: f32 = 0.02;
const MARKER_SEGMENTS: u32 = 20;

/// Plugin for building the globe scene.
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, spawn_globe.run_if(resource_changed::<LoadBarrier>));
    }
}

/// Marker for the planet sphere.
#[derive(Component)]
pub struct Planet;

/// Marker for a projected place. The place name is in its `Name`.
#[derive(Component)]
pub struct PlaceMarker;

/// An arc tube between two consecutive places.
#[derive(Component, Debug)]
pub struct ArcTube {
    pub from: String,
    pub to: String,
}

fn marker_color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.r, rgb.g, rgb.b)
}

/// Spawn the planet, markers and arcs once the shaders are ready.
#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn spawn_globe(
    mut commands: Commands,
    barrier: Res<LoadBarrier>,
    params: Res<LaunchParams>,
    clock: Res<ArcClock>,
    settings: Res<ArcSettings>,
    viewport: Res<ViewportSize>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    mut arc_materials: ResMut<Assets<ArcMaterial>>,
) -> Result {
    if !barrier.is_ready() {
        return Ok(());
    }

    // Planet.
    let planet_mesh = SphereGeometry::new(1.0, PLANET_SEGMENTS, PLANET_SEGMENTS).build()?;
    commands.spawn((
        Planet,
        Mesh3d(meshes.add(convert_mesh(&planet_mesh))),
        MeshMaterial3d(standard_materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(PLANET_TEXTURE)),
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));

    let layout = GlobeLayout::from_points(&params.points);

    // Markers share one mesh; each gets its own color.
    let marker_mesh = meshes.add(convert_mesh(
        &SphereGeometry::new(MARKER_RADIUS, MARKER_SEGMENTS, MARKER_SEGMENTS).build()?,
    ));
    for marker in &layout.markers {
        commands.spawn((
            PlaceMarker,
            Name::new(marker.name.clone()),
            Mesh3d(marker_mesh.clone()),
            MeshMaterial3d(standard_materials.add(StandardMaterial {
                base_color: marker_color(marker.color),
                unlit: true,
                ..default()
            })),
            Transform::from_translation(marker.position.as_vec3()),
        ));
    }

    // Arcs share one shader material so a single uniform update animates all.
    let arc_material = arc_materials.add(ArcMaterial {
        uniform: ArcUniform {
            time: clock.time(),
            progress: settings.progress,
            resolution: cover_resolution(viewport.width, viewport.height),
            ..default()
        },
    });
    commands.insert_resource(ArcMaterialHandle(arc_material.clone()));

    let tubes = layout.arc_tubes(&TubeConfig::default())?;
    for (tube, pair) in tubes.iter().zip(layout.markers.windows(2)) {
        commands.spawn((
            ArcTube {
                from: pair[0].name.clone(),
                to: pair[1].name.clone(),
            },
            Mesh3d(meshes.add(convert_mesh(&tube.mesh))),
            MeshMaterial3d(arc_material.clone()),
            Transform::default(),
        ));
    }

    tracing::info!(
        "Globe ready: {} markers, {} arcs",
        layout.markers.len(),
        tubes.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_color() {
        let color = marker_color(Rgb::RED).to_srgba();
        assert!((color.red - 1.0).abs() < 1e-6);
        assert!(color.green.abs() < 1e-6);
        assert!(color.blue.abs() < 1e-6);
    }
}
