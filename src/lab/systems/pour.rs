//! Pour systems
//!
//! [`start_pour`] turns a [`PourRequested`] message into a running
//! [`PourSequence`]; [`advance_pour`] steps it every frame, writes the tube
//! pose and moves fill from the tube into the flask while the tube is tipped
//! past the pour threshold.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::LabConfig;
use crate::lab::choreography::{approach_target, PourDirector, PourSequence, TubePose};
use crate::lab::components::{Container, Flask, LiquidBody, ProxyTint, Tube};
use crate::lab::events::PourRequested;
use crate::lab::fill::{transfer, FillLevel};
use crate::lab::substance::SubstanceParams;

/// Start a pour for the first pending request, if the tube is idle
pub fn start_pour(
    mut requests: MessageReader<PourRequested>,
    mut director: ResMut<PourDirector>,
    config: Res<LabConfig>,
    tube: Query<(&Transform, &Tube), Without<Flask>>,
    flask: Query<(&Transform, &Container), With<Flask>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let (Ok((tube_transform, tube)), Ok((flask_transform, flask))) = (tube.single(), flask.single())
    else {
        debug!("[POUR] Pour requested but the tube or flask is missing");
        return;
    };

    if !director.is_idle() {
        info!(
            "[POUR] Ignoring request, already animating ({:?})",
            director.phase()
        );
        return;
    }

    let from = TubePose::from_transform(tube_transform);
    let target = approach_target(
        tube_transform.translation,
        flask_transform.translation,
        flask.height * flask_transform.scale.y,
        flask.scale,
        &config.pour,
    );
    let sequence = PourSequence::start(from, TubePose::upright(tube.home), target, &config.pour);

    if director.try_start(sequence) {
        info!(
            "[POUR] Pour started: {:.2?} -> {:.2?}",
            from.translation, target
        );
    }
}

/// Step the running pour and apply its frame to the scene
pub fn advance_pour(
    time: Res<Time>,
    config: Res<LabConfig>,
    params: Res<SubstanceParams>,
    mut director: ResMut<PourDirector>,
    mut tube: Query<(&mut Transform, &mut FillLevel), (With<Tube>, Without<Flask>)>,
    mut flask: Query<(&mut FillLevel, &Children), (With<Flask>, Without<Tube>)>,
    mut liquid_tints: Query<&mut ProxyTint, With<LiquidBody>>,
) {
    let Some(frame) = director.advance(time.delta()) else {
        return;
    };
    let Ok((mut transform, mut tube_fill)) = tube.single_mut() else {
        return;
    };

    transform.translation = frame.pose.translation;
    transform.rotation = frame.pose.rotation();

    if frame.pouring {
        if let Ok((mut flask_fill, children)) = flask.single_mut() {
            let moved = transfer(&mut tube_fill, &mut flask_fill, config.pour.transfer_step);
            if moved > 0.0 {
                for child in children.iter() {
                    if let Ok(mut tint) = liquid_tints.get_mut(child) {
                        tint.blend_toward(params.color, config.pour.tint_blend);
                    }
                }
            }
        }
    }

    if frame.finished {
        info!(
            "[POUR] Pour complete, tube fill {:.3}",
            tube_fill.ratio()
        );
    }
}
