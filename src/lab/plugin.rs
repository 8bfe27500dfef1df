//! Lab plugin - pour choreography, contents and clip planes
//!
//! # Plugin Dependencies
//!
//! - [`crate::core::CorePlugin`] - Must be added first; provides [`crate::core::LabConfig`]
//!   and [`crate::core::LabState`]
//! - [`bevy::transform::TransformPlugin`] - Clip planes read `GlobalTransform`
//!
//! # System Organization
//!
//! `Update`, only while [`LabState::Ready`]:
//! - [`LabSystems::Input`] - filled in by [`crate::input::InputPlugin`]
//! - [`LabSystems::Choreography`] - `start_pour`, `advance_pour`
//! - [`LabSystems::Contents`] - `sync_tube_contents`
//!
//! `PostUpdate`: [`LabSystems::Clipping`] after transform propagation.

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use super::choreography::{PourDirector, PourPhase};
use super::clip::ClipPlane;
use super::components::*;
use super::events::{PourRequested, ReagentAdded};
use super::fill::FillLevel;
use super::substance::{SubstanceKind, SubstanceParams};
use super::system_sets::LabSystems;
use super::systems::*;
use crate::core::LabState;

pub struct LabPlugin;

impl Plugin for LabPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PourDirector>()
            .init_resource::<SubstanceParams>()
            .init_resource::<AppliedSubstance>();

        app.add_message::<PourRequested>()
            .add_message::<ReagentAdded>();

        app.register_type::<Container>()
            .register_type::<ContainerKind>()
            .register_type::<PivotAnchor>()
            .register_type::<Flask>()
            .register_type::<Tube>()
            .register_type::<FillLevel>()
            .register_type::<LiquidBody>()
            .register_type::<ParticleCluster>()
            .register_type::<SolidParticle>()
            .register_type::<TubeContents>()
            .register_type::<ProxyTint>()
            .register_type::<ClipPlane>()
            .register_type::<PourPhase>()
            .register_type::<SubstanceKind>()
            .register_type::<SubstanceParams>();

        app.configure_sets(
            Update,
            (
                LabSystems::Input,
                LabSystems::Choreography,
                LabSystems::Contents,
            )
                .chain()
                .run_if(in_state(LabState::Ready)),
        );
        app.configure_sets(
            PostUpdate,
            LabSystems::Clipping.after(TransformSystems::Propagate),
        );

        app.add_systems(OnEnter(LabState::Ready), spawn_flask_liquid);

        app.add_systems(
            Update,
            (
                (start_pour, advance_pour)
                    .chain()
                    .in_set(LabSystems::Choreography),
                sync_tube_contents.in_set(LabSystems::Contents),
                log_reagents,
            ),
        );

        app.add_systems(PostUpdate, update_clip_planes.in_set(LabSystems::Clipping));
    }
}
