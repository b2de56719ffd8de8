//! Shader material shared by every arc tube.
//!
//! The vertex and fragment stages live in separate WGSL assets so that the
//! loader can gate scene creation on both of them. Uniforms carry the
//! running clock, the debug panel's progress value and the viewport
//! resolution.

use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{Material, MaterialPipeline, MaterialPipelineKey, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;

/// Asset path of the arc vertex stage.
pub const ARC_VERTEX_SHADER: &str = "shaders/arc_vertex.wgsl";
/// Asset path of the arc fragment stage.
pub const ARC_FRAGMENT_SHADER: &str = "shaders/arc_fragment.wgsl";

/// Plugin that registers the arc material.
pub struct ArcMaterialPlugin;

impl Plugin for ArcMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArcSettings>()
            .add_plugins(MaterialPlugin::<ArcMaterial>::default());
    }
}

/// User-tweakable arc parameters (exposed in the debug panel).
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ArcSettings {
    /// Free parameter in [0, 1] fed to the fragment shader.
    pub progress: f32,
}

/// Uniform block for the arc shaders. Layout must match `ArcUniform` in WGSL.
#[derive(Clone, Copy, Debug, PartialEq, ShaderType)]
pub struct ArcUniform {
    /// Running clock value.
    pub time: f32,
    pub progress: f32,
    /// Texture coordinate scale along and around the tube.
    pub uv_rate: Vec2,
    /// Viewport `(width, height, a1, a2)`, see [`cover_resolution`].
    pub resolution: Vec4,
}

impl Default for ArcUniform {
    fn default() -> Self {
        Self {
            time: 0.0,
            progress: 0.0,
            uv_rate: Vec2::ONE,
            resolution: cover_resolution(1.0, 1.0),
        }
    }
}

/// Handle to the single arc material all tubes share.
#[derive(Resource, Debug, Clone)]
pub struct ArcMaterialHandle(pub Handle<ArcMaterial>);

/// Double-sided, alpha-blended material for arc tubes.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone, Default)]
pub struct ArcMaterial {
    #[uniform(0)]
    pub uniform: ArcUniform,
}

impl Material for ArcMaterial {
    fn vertex_shader() -> ShaderRef {
        ARC_VERTEX_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        ARC_FRAGMENT_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }

    fn enable_shadows() -> bool {
        false
    }

    fn enable_prepass() -> bool {
        false
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // The vertex stage only reads positions and texture coordinates.
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Tubes are thin enough that both faces are visible at grazing angles.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

/// Resolution uniform for a viewport, with cover-fit factors for a square
/// image: `(width, height, a1, a2)`.
pub fn cover_resolution(width: f32, height: f32) -> Vec4 {
    if width <= 0.0 || height <= 0.0 {
        return Vec4::new(width, height, 1.0, 1.0);
    }

    let aspect = height / width;
    let (a1, a2) = if aspect > 1.0 {
        (width / height, 1.0)
    } else {
        (1.0, aspect)
    };
    Vec4::new(width, height, a1, a2)
}
