//! Materials for containers and their contents
//!
//! - Glass: transmissive [`StandardMaterial`] shared by every container primitive
//! - Liquid: [`LiquidMaterial`], standard PBR extended with a world-space clip plane
//! - Particles: one [`StandardMaterial`] per cluster, see [`ClusterMaterial`]
//!
//! The sync systems copy lab state (tints, clip planes) into these assets
//! after the lab has updated it for the frame.

use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::AsBindGroup;
use bevy::shader::ShaderRef;

use crate::lab::{ClipPlane, LiquidBody, ProxyTint};

/// Clip plane extension for liquid proxies
///
/// `plane.xyz` is the world-space normal and `plane.w` the offset; fragments
/// with `dot(plane.xyz, p) > plane.w` are discarded.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone, Default)]
pub struct LiquidClip {
    #[uniform(100)]
    pub plane: Vec4,
}

impl MaterialExtension for LiquidClip {
    fn fragment_shader() -> ShaderRef {
        let path = bevy::asset::embedded_path!("liquid_clip.wgsl");
        ShaderRef::from(bevy::asset::AssetPath::from_path_buf(path).with_source("embedded"))
    }
}

pub type LiquidMaterial = ExtendedMaterial<StandardMaterial, LiquidClip>;

/// Material handle shared by the spheres of a particle cluster
#[derive(Component, Debug, Clone)]
pub struct ClusterMaterial(pub Handle<StandardMaterial>);

/// Clear, smooth, fully transmissive glass
pub fn glass_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.0,
        metallic: 0.0,
        specular_transmission: 1.0,
        thickness: 0.5,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Liquid surface look; tube contents are slightly glossier than the flask's
pub fn liquid_material(tint: Color, opacity: f32, in_tube: bool) -> LiquidMaterial {
    let (metallic, roughness) = if in_tube { (0.1, 0.2) } else { (0.2, 0.3) };
    LiquidMaterial {
        base: StandardMaterial {
            base_color: tint.with_alpha(opacity),
            metallic,
            perceptual_roughness: roughness,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        },
        extension: LiquidClip::default(),
    }
}

/// Particle sphere look: slightly metallic grains
pub fn particle_material(tint: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: tint,
        metallic: 0.5,
        perceptual_roughness: 0.4,
        ..default()
    }
}

/// Push tints and world-space clip planes into liquid materials
pub fn sync_liquid_materials(
    bodies: Query<
        (
            &LiquidBody,
            &ProxyTint,
            &ClipPlane,
            &GlobalTransform,
            &MeshMaterial3d<LiquidMaterial>,
        ),
        Or<(
            Changed<ProxyTint>,
            Changed<ClipPlane>,
            Changed<GlobalTransform>,
            Changed<MeshMaterial3d<LiquidMaterial>>,
        )>,
    >,
    mut materials: ResMut<Assets<LiquidMaterial>>,
) {
    for (body, tint, plane, global, handle) in &bodies {
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        material.base.base_color = tint.0.with_alpha(body.opacity);
        material.extension.plane = plane.to_world(global);
    }
}

/// Recolor particle clusters in place
pub fn sync_particle_tints(
    clusters: Query<(&ProxyTint, &ClusterMaterial), Changed<ProxyTint>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (tint, handle) in &clusters {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = tint.0;
        }
    }
}
