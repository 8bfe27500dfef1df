//! Container contents
//!
//! The flask gets its liquid once, when the lab becomes ready. The tube's
//! contents follow [`SubstanceParams`]: every time the panel edits them the
//! change is classified against what was last applied and the proxies are
//! rebuilt or recolored.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::LabConfig;
use crate::lab::clip::ClipPlane;
use crate::lab::components::{
    Container, Flask, LiquidBody, ParticleCluster, ProxyTint, SolidParticle, Tube, TubeContents,
};
use crate::lab::events::ReagentAdded;
use crate::lab::substance::{
    classify_change, scatter_particles, ContentsChange, SubstanceKind, SubstanceParams,
};

/// Substance parameters currently reflected by the tube's proxies
#[derive(Resource, Debug, Default)]
pub struct AppliedSubstance(pub Option<SubstanceParams>);

/// Clipped liquid cylinder filling a container's interior
pub fn liquid_proxy(container: &Container, color: Color, opacity: f32) -> impl Bundle {
    (
        Name::new("Liquid"),
        LiquidBody {
            radius: container.liquid_radius,
            height: container.height,
            opacity,
        },
        ProxyTint(color),
        ClipPlane::default(),
        Transform::from_translation(container.center_offset()),
        Visibility::default(),
    )
}

/// Give the flask its liquid
pub fn spawn_flask_liquid(
    mut commands: Commands,
    config: Res<LabConfig>,
    flasks: Query<(Entity, &Container), With<Flask>>,
) {
    let color = config.substance.flask_liquid_color();
    for (entity, container) in &flasks {
        commands
            .entity(entity)
            .with_child(liquid_proxy(container, color, LiquidBody::FLASK_OPACITY));
        debug!("[CONTENTS] Flask liquid spawned");
    }
}

/// Bring the tube's proxies in line with the substance parameters
pub fn sync_tube_contents(
    mut commands: Commands,
    params: Res<SubstanceParams>,
    mut applied: ResMut<AppliedSubstance>,
    tubes: Query<(Entity, &Container), With<Tube>>,
    contents: Query<Entity, With<TubeContents>>,
    mut tints: Query<&mut ProxyTint, With<TubeContents>>,
) {
    if applied.0.is_some() && !params.is_changed() {
        return;
    }
    let Ok((tube, container)) = tubes.single() else {
        return;
    };

    match classify_change(applied.0.as_ref(), &params) {
        ContentsChange::Unchanged => {}
        ContentsChange::Recolor => {
            for mut tint in &mut tints {
                tint.0 = params.color;
            }
            debug!("[CONTENTS] Recolored tube contents");
        }
        ContentsChange::Rebuild => {
            for entity in &contents {
                commands.entity(entity).despawn();
            }
            spawn_tube_contents(&mut commands, tube, container, &params);
            info!(
                "[CONTENTS] Rebuilt tube contents as {} ({} particles)",
                params.kind.label(),
                params.particle_count()
            );
        }
    }

    applied.0 = Some(params.clone());
}

fn spawn_tube_contents(
    commands: &mut Commands,
    tube: Entity,
    container: &Container,
    params: &SubstanceParams,
) {
    match params.kind {
        SubstanceKind::Liquid => {
            commands.entity(tube).with_child((
                liquid_proxy(container, params.color, LiquidBody::TUBE_OPACITY),
                TubeContents,
            ));
        }
        SubstanceKind::Solid => {
            // Scattered in asset units under a cluster carrying the asset scale
            let offsets = scatter_particles(
                params.particle_count(),
                container.height / container.scale,
                &mut rand::rng(),
            );
            let cluster = commands
                .spawn((
                    Name::new("Particles"),
                    ParticleCluster {
                        count: params.particle_count(),
                    },
                    ProxyTint(params.color),
                    TubeContents,
                    Transform::from_translation(container.center_offset())
                        .with_scale(Vec3::splat(container.scale)),
                    Visibility::default(),
                    ChildOf(tube),
                ))
                .id();
            for offset in offsets {
                commands.spawn((
                    SolidParticle,
                    Transform::from_translation(offset),
                    Visibility::default(),
                    ChildOf(cluster),
                ));
            }
        }
    }
}

/// Reagent buttons have no chemistry behind them yet
pub fn log_reagents(mut reagents: MessageReader<ReagentAdded>) {
    for ReagentAdded(reagent) in reagents.read() {
        info!("[REAGENTS] {} added", reagent.formula());
    }
}
