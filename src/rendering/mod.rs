//! Rendering module - lab scene, camera and content visuals
//!
//! # Architecture
//!
//! - `scene` - Camera, lights, floor and shelf from the scene profile
//! - `camera` - Damped orbit camera
//! - `materials` - Glass, clip-plane liquid and particle materials
//! - `proxies` - Meshes for liquid and particle proxies spawned by the lab
//!
//! Lab logic never touches assets. Rendering reads lab components
//! ([`crate::lab::ProxyTint`], [`crate::lab::ClipPlane`]) after the lab has
//! updated them and writes the results into materials.

pub mod camera;
pub mod materials;
pub mod proxies;
pub mod scene;

use bevy::asset::embedded_asset;
use bevy::pbr::MaterialPlugin;
use bevy::prelude::*;

use crate::lab::LabSystems;
pub use camera::OrbitCamera;
pub use materials::{LiquidClip, LiquidMaterial};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "liquid_clip.wgsl");
        app.add_plugins(MaterialPlugin::<LiquidMaterial>::default());

        app.init_resource::<proxies::ParticleMesh>()
            .register_type::<OrbitCamera>();

        app.add_systems(Startup, scene::setup_scene);

        app.add_systems(
            Update,
            (
                (camera::orbit_camera_input, camera::orbit_camera_motion).chain(),
                (proxies::attach_liquid_meshes, proxies::attach_particle_meshes)
                    .after(LabSystems::Contents),
            ),
        );

        app.add_systems(
            PostUpdate,
            (materials::sync_liquid_materials, materials::sync_particle_tints)
                .after(LabSystems::Clipping),
        );
    }
}
