//! Meshes and materials for content proxies
//!
//! The lab spawns proxies as plain components; these systems give newly
//! spawned ones something to draw. Particle spheres share one mesh and,
//! within a cluster, one material, so the renderer batches them.

use bevy::prelude::*;

use super::materials::{liquid_material, particle_material, ClusterMaterial, LiquidMaterial};
use crate::lab::substance::PARTICLE_RADIUS;
use crate::lab::{LiquidBody, ParticleCluster, ProxyTint, SolidParticle, TubeContents};

/// Cylinder segments around a liquid body
const LIQUID_RESOLUTION: u32 = 32;

/// Mesh shared by every solid particle
#[derive(Resource, Debug, Clone)]
pub struct ParticleMesh(pub Handle<Mesh>);

impl FromWorld for ParticleMesh {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        Self(meshes.add(Sphere::new(PARTICLE_RADIUS).mesh().uv(12, 8)))
    }
}

/// Cylinder and clip material for new liquid bodies
pub fn attach_liquid_meshes(
    mut commands: Commands,
    bodies: Query<(Entity, &LiquidBody, &ProxyTint, Has<TubeContents>), Added<LiquidBody>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<LiquidMaterial>>,
) {
    for (entity, body, tint, in_tube) in &bodies {
        let mesh = Cylinder::new(body.radius, body.height)
            .mesh()
            .resolution(LIQUID_RESOLUTION);
        commands.entity(entity).insert((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(liquid_material(tint.0, body.opacity, in_tube))),
        ));
    }
}

/// Shared sphere and per-cluster material for new particle clusters
pub fn attach_particle_meshes(
    mut commands: Commands,
    clusters: Query<(Entity, &ProxyTint, &Children), Added<ParticleCluster>>,
    particles: Query<(), With<SolidParticle>>,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, tint, children) in &clusters {
        let material = materials.add(particle_material(tint.0));
        for child in children.iter() {
            if particles.contains(child) {
                commands.entity(child).insert((
                    Mesh3d(particle_mesh.0.clone()),
                    MeshMaterial3d(material.clone()),
                ));
            }
        }
        commands.entity(entity).insert(ClusterMaterial(material));
    }
}
