//! Static lab scene: camera, lights, floor and shelf
//!
//! Everything comes from the [`SceneSettings`] of the configured
//! [`crate::core::SceneProfile`], so both lab setups share one bootstrap.

use bevy::camera::Exposure;
use bevy::prelude::*;

use super::camera::OrbitCamera;
use crate::core::{FillLight, LabConfig, SceneSettings};

/// Shelf board behind the bench (classic profile), resting on the floor
const SHELF_SIZE: Vec3 = Vec3::new(10.0, 0.2, 2.0);
const SHELF_POSITION: Vec3 = Vec3::new(0.0, 0.1, -5.0);

/// Wooden bench top
pub fn floor_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb_u8(0x8d, 0x6e, 0x63),
        perceptual_roughness: 0.9,
        metallic: 0.0,
        ..default()
    }
}

pub fn shelf_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::srgb_u8(0x55, 0x55, 0x55),
        perceptual_roughness: 0.3,
        metallic: 0.2,
        ..default()
    }
}

/// Shadow-casting point fill light
pub fn fill_point_light(intensity: f32, range: f32) -> PointLight {
    PointLight {
        intensity,
        range,
        shadows_enabled: true,
        ..default()
    }
}

pub fn setup_scene(
    mut commands: Commands,
    config: Res<LabConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let settings = config.profile.settings();

    commands.insert_resource(ClearColor(settings.background));
    spawn_camera(&mut commands, &settings);
    spawn_lights(&mut commands, &settings);

    commands.spawn((
        Name::new("Floor"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(settings.floor_size.x, settings.floor_size.y))),
        MeshMaterial3d(materials.add(floor_material())),
        Transform::default(),
    ));

    if settings.shelf {
        commands.spawn((
            Name::new("Shelf"),
            Mesh3d(meshes.add(Cuboid::from_size(SHELF_SIZE))),
            MeshMaterial3d(materials.add(shelf_material())),
            Transform::from_translation(SHELF_POSITION),
        ));
    }

    info!("[SCENE] {:?} lab scene ready", config.profile);
}

fn spawn_camera(commands: &mut Commands, settings: &SceneSettings) {
    let focus = Vec3::ZERO;
    commands.spawn((
        Name::new("Lab Camera"),
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            ..default()
        }),
        settings.tonemapping,
        Exposure {
            ev100: Exposure::default().ev100 - settings.exposure.log2(),
        },
        AmbientLight {
            color: Color::WHITE,
            brightness: settings.ambient_brightness,
            ..default()
        },
        Transform::from_translation(settings.camera_position).looking_at(focus, Vec3::Y),
        OrbitCamera::looking_at(
            settings.camera_position,
            focus,
            settings.orbit_distance,
            settings.orbit_damping,
        ),
    ));
}

fn spawn_lights(commands: &mut Commands, settings: &SceneSettings) {
    commands.spawn((
        Name::new("Key Light"),
        DirectionalLight {
            illuminance: settings.key_light_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(settings.key_light_position).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    match settings.fill_light {
        FillLight::Point {
            position,
            intensity,
            range,
        } => {
            commands.spawn((
                Name::new("Fill Light"),
                fill_point_light(intensity, range),
                Transform::from_translation(position),
            ));
        }
        FillLight::Directional {
            position,
            illuminance,
        } => {
            commands.spawn((
                Name::new("Fill Light"),
                DirectionalLight {
                    illuminance,
                    ..default()
                },
                Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
            ));
        }
    }
}
