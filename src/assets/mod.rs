//! Lab asset loading
//!
//! Loads the one glTF file of the lab (flask and test tube), waits for it and
//! its meshes, then classifies the configured nodes into containers. Only the
//! two container nodes are ever spawned; the rest of the model stays hidden.
//!
//! Loading is one-shot: a failure is logged and the lab moves to
//! [`LabState::Unavailable`] without retrying.

pub mod containers;

use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;

use crate::core::{LabConfig, LabError, LabState};
use crate::rendering::materials::glass_material;
use containers::{classify_containers, collect_parts, spawn_container, Classification};

/// Handle to the lab's glTF, kept alive for the whole session
#[derive(Resource, Debug, Default)]
pub struct LabAssets {
    pub gltf: Handle<Gltf>,
}

pub struct LabAssetsPlugin;

impl Plugin for LabAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabAssets>()
            .add_systems(Startup, start_asset_loading)
            .add_systems(
                Update,
                check_asset_loading.run_if(in_state(LabState::Loading)),
            );
    }
}

/// Kick off loading of the configured asset path
pub fn start_asset_loading(
    mut lab_assets: ResMut<LabAssets>,
    config: Res<LabConfig>,
    asset_server: Res<AssetServer>,
) {
    lab_assets.gltf = asset_server.load::<Gltf>(config.asset.path.clone());
    info!("[ASSETS] Loading {}", config.asset.path);
}

/// Wait for the glTF, then classify its container nodes
#[allow(clippy::too_many_arguments)]
pub fn check_asset_loading(
    mut commands: Commands,
    lab_assets: Res<LabAssets>,
    config: Res<LabConfig>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut next_state: ResMut<NextState<LabState>>,
) {
    match asset_server.load_state(&lab_assets.gltf) {
        LoadState::Loaded => {}
        LoadState::Failed(err) => {
            let err = LabError::AssetLoad {
                path: config.asset.path.clone(),
                reason: err.to_string(),
            };
            error!("[ASSETS] {}", err);
            next_state.set(LabState::Unavailable);
            return;
        }
        LoadState::NotLoaded | LoadState::Loading => return,
    }

    let Some(gltf) = gltfs.get(&lab_assets.gltf) else {
        return;
    };

    let parts_of = |name: &str| {
        gltf.named_nodes
            .get(name)
            .map(|node| collect_parts(node, &nodes, &gltf_meshes))
    };

    match classify_containers(&config, parts_of, &meshes) {
        Classification::Pending => {}
        Classification::Empty => {
            error!(
                "[ASSETS] Neither '{}' nor '{}' found in {}",
                config.asset.flask_node, config.asset.tube_node, config.asset.path
            );
            next_state.set(LabState::Unavailable);
        }
        Classification::Found(found) => {
            let glass = materials.add(glass_material());
            for container in &found {
                spawn_container(&mut commands, container, &config, &glass);
            }
            next_state.set(LabState::Ready);
        }
    }
}
