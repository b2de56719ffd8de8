//! Shader loading with an all-complete barrier.
//!
//! Both arc shader stages are requested from the asset server at startup and
//! load concurrently. The scene is only built once both have loaded. The
//! first failure is logged and closes the barrier for good: there is no
//! retry and the scene stays empty.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::arc_material::{ARC_FRAGMENT_SHADER, ARC_VERTEX_SHADER};

/// Plugin for loading the arc shaders.
pub struct ShaderLoaderPlugin;

impl Plugin for ShaderLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadBarrier>()
            .add_systems(Startup, start_shader_loads)
            .add_systems(Update, poll_shader_loads.run_if(barrier_is_waiting));
    }
}

/// Handles for the shader stages the barrier waits on.
///
/// Holding the handles keeps the shaders alive until the arc material
/// pipeline picks them up by path.
#[derive(Resource)]
pub struct ShaderSources {
    vertex: Handle<Shader>,
    fragment: Handle<Shader>,
}

/// Load progress of a single asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed(String),
}

impl From<Option<LoadState>> for LoadStatus {
    fn from(state: Option<LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => Self::Loaded,
            Some(LoadState::Failed(error)) => Self::Failed(error.to_string()),
            _ => Self::Pending,
        }
    }
}

/// State of the shader barrier.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadBarrier {
    /// At least one shader is still loading.
    #[default]
    Waiting,
    /// Every shader has loaded.
    Ready,
    /// A shader failed to load. Terminal.
    Failed { asset: String, error: String },
}

impl LoadBarrier {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Join the status of every awaited asset.
    ///
    /// A failure wins over pending loads, so initialization is abandoned as
    /// soon as any one asset fails.
    pub fn join<'a>(statuses: impl IntoIterator<Item = (&'a str, LoadStatus)>) -> Self {
        let mut all_loaded = true;
        for (asset, status) in statuses {
            match status {
                LoadStatus::Failed(error) => {
                    return Self::Failed {
                        asset: asset.to_string(),
                        error,
                    };
                }
                LoadStatus::Pending => all_loaded = false,
                LoadStatus::Loaded => {}
            }
        }

        if all_loaded { Self::Ready } else { Self::Waiting }
    }
}

fn barrier_is_waiting(barrier: Res<LoadBarrier>) -> bool {
    *barrier == LoadBarrier::Waiting
}

/// Run condition: the scene exists and may animate.
#[allow(clippy::needless_pass_by_value)]
pub fn barrier_is_ready(barrier: Res<LoadBarrier>) -> bool {
    barrier.is_ready()
}

/// Request both shader stages.
#[allow(clippy::needless_pass_by_value)]
fn start_shader_loads(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ShaderSources {
        vertex: asset_server.load(ARC_VERTEX_SHADER),
        fragment: asset_server.load(ARC_FRAGMENT_SHADER),
    });

    tracing::info!("Started loading arc shaders");
}

/// Check the shader loads and open or fail the barrier.
#[allow(clippy::needless_pass_by_value)]
fn poll_shader_loads(
    sources: Option<Res<ShaderSources>>,
    asset_server: Res<AssetServer>,
    mut barrier: ResMut<LoadBarrier>,
) {
    let Some(sources) = sources else {
        return;
    };

    let next = LoadBarrier::join([
        (
            ARC_VERTEX_SHADER,
            asset_server.get_load_state(sources.vertex.id()).into(),
        ),
        (
            ARC_FRAGMENT_SHADER,
            asset_server.get_load_state(sources.fragment.id()).into(),
        ),
    ]);

    match &next {
        LoadBarrier::Waiting => return,
        LoadBarrier::Ready => tracing::info!("Arc shaders loaded"),
        LoadBarrier::Failed { asset, error } => {
            tracing::error!("Failed to load {asset}: {error}");
        }
    }

    *barrier = next;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy::asset::{AssetLoadError, AssetPath};

    use super::*;

    #[test]
    fn test_join_all_loaded() {
        let barrier = LoadBarrier::join([
            ("vertex", LoadStatus::Loaded),
            ("fragment", LoadStatus::Loaded),
        ]);
        assert_eq!(barrier, LoadBarrier::Ready);
        assert!(barrier.is_ready());
    }

    #[test]
    fn test_join_waits_for_every_asset() {
        let barrier = LoadBarrier::join([
            ("vertex", LoadStatus::Loaded),
            ("fragment", LoadStatus::Pending),
        ]);
        assert_eq!(barrier, LoadBarrier::Waiting);
    }

    #[test]
    fn test_join_failure_short_circuits() {
        let barrier = LoadBarrier::join([
            ("vertex", LoadStatus::Pending),
            ("fragment", LoadStatus::Failed("not found".to_string())),
        ]);
        assert_eq!(
            barrier,
            LoadBarrier::Failed {
                asset: "fragment".to_string(),
                error: "not found".to_string(),
            }
        );
        assert!(!barrier.is_ready());
    }

    #[test]
    fn test_join_reports_first_failure() {
        let barrier = LoadBarrier::join([
            ("vertex", LoadStatus::Failed("a".to_string())),
            ("fragment", LoadStatus::Failed("b".to_string())),
        ]);
        assert!(matches!(barrier, LoadBarrier::Failed { ref asset, .. } if asset == "vertex"));
    }

    #[test]
    fn test_status_from_load_state() {
        assert_eq!(LoadStatus::from(None), LoadStatus::Pending);
        assert_eq!(LoadStatus::from(Some(LoadState::Loading)), LoadStatus::Pending);
        assert_eq!(LoadStatus::from(Some(LoadState::Loaded)), LoadStatus::Loaded);

        let error = AssetLoadError::AssetLoaderPanic {
            path: AssetPath::from(ARC_VERTEX_SHADER),
            loader_name: "wgsl",
        };
        let status = LoadStatus::from(Some(LoadState::Failed(Arc::new(error))));
        assert!(
            matches!(status, LoadStatus::Failed(ref message) if message.contains(ARC_VERTEX_SHADER))
        );
    }

    #[test]
    fn test_failed_barrier_stops_polling() {
        let mut app = App::new();
        app.insert_resource(LoadBarrier::Failed {
            asset: "vertex".to_string(),
            error: "gone".to_string(),
        })
        .add_systems(Update, poll_shader_loads.run_if(barrier_is_waiting));

        // Would panic on the missing `AssetServer` if the poll system ran.
        app.update();
        assert!(!app.world().resource::<LoadBarrier>().is_ready());
    }
}
