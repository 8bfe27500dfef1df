//! Integration tests for the pour choreography
//!
//! Builds a headless lab with two hand-placed containers (no asset loading,
//! no rendering) and drives it with a fixed 10 ms frame time.

use std::f32::consts::PI;
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use chemlab::core::{CorePlugin, LabState};
use chemlab::lab::{
    Container, ContainerKind, FillLevel, Flask, LabPlugin, PourDirector, PourPhase, PourRequested,
    Tube,
};

const FRAME: Duration = Duration::from_millis(10);

const TUBE_HEIGHT: f32 = 2.0;
const FLASK_HEIGHT: f32 = 3.0;

struct Lab {
    app: App,
    tube: Entity,
    flask: Entity,
}

impl Lab {
    fn new() -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, TransformPlugin));
        app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
        app.add_plugins((CorePlugin::default(), LabPlugin));

        let tube_container = Container::new(ContainerKind::Tube, TUBE_HEIGHT, 0.3);
        let home = tube_container.resting_translation(-2.0);
        let tube = app
            .world_mut()
            .spawn((
                tube_container,
                Tube { home },
                FillLevel::new(0.5),
                Transform::from_translation(home),
            ))
            .id();

        let flask_container = Container::new(ContainerKind::Flask, FLASK_HEIGHT, 0.7);
        let flask = app
            .world_mut()
            .spawn((
                flask_container,
                Flask,
                FillLevel::EMPTY,
                Transform::from_translation(flask_container.resting_translation(2.0)),
            ))
            .id();

        app.world_mut()
            .resource_mut::<NextState<LabState>>()
            .set(LabState::Ready);
        app.update();
        app.update();

        Self { app, tube, flask }
    }

    fn request_pour(&mut self) {
        self.app.world_mut().write_message(PourRequested);
    }

    /// Run `ms` worth of frames
    fn run_ms(&mut self, ms: u64) {
        for _ in 0..(ms / FRAME.as_millis() as u64) {
            self.app.update();
        }
    }

    fn tube_transform(&self) -> Transform {
        *self.app.world().get::<Transform>(self.tube).unwrap()
    }

    fn tilt(&self) -> f32 {
        let (_, _, z) = self.tube_transform().rotation.to_euler(EulerRot::XYZ);
        z
    }

    fn fills(&self) -> (f32, f32) {
        let world = self.app.world();
        (
            world.get::<FillLevel>(self.tube).unwrap().ratio(),
            world.get::<FillLevel>(self.flask).unwrap().ratio(),
        )
    }

    fn director(&self) -> &PourDirector {
        self.app.world().resource::<PourDirector>()
    }
}

#[test]
fn test_pour_end_to_end_timeline() {
    //! Trigger at t0; full tilt at t0 + 4000 ms, upright at t0 + 6000 ms,
    //! home and idle at t0 + 6500 ms

    let mut lab = Lab::new();
    let home = lab.tube_transform().translation;
    lab.request_pour();

    lab.run_ms(1000);
    assert_eq!(lab.director().phase(), Some(PourPhase::Approach));

    lab.run_ms(3000);
    assert!((lab.tilt() + 0.85 * PI).abs() < 1e-2, "tilt {}", lab.tilt());

    lab.run_ms(500);
    assert_eq!(lab.director().phase(), Some(PourPhase::Settle));

    lab.run_ms(1500);
    assert!(lab.tilt().abs() < 0.05, "tilt {}", lab.tilt());
    assert_eq!(lab.director().phase(), Some(PourPhase::Return));

    lab.run_ms(520);
    assert!(lab.director().is_idle());
    assert!(lab.tube_transform().translation.distance(home) < 1e-3);
    assert!(lab.tilt().abs() < 1e-4);
}

#[test]
fn test_pour_moves_fill_and_conserves_total() {
    //! Tube fill drops, flask fill rises by the same amount, every frame

    let mut lab = Lab::new();
    let (tube_before, flask_before) = lab.fills();
    let total = tube_before + flask_before;
    lab.request_pour();

    for _ in 0..700 {
        lab.app.update();
        let (tube, flask) = lab.fills();
        assert!((tube + flask - total).abs() < 1e-5);
        assert!(tube >= 0.0);
        assert!(flask <= 1.0);
    }

    let (tube_after, flask_after) = lab.fills();
    assert!(tube_after < tube_before);
    assert!(flask_after > flask_before);
}

#[test]
fn test_no_transfer_before_tube_passes_horizontal() {
    //! Approach and the first part of the pour keep both fills untouched

    let mut lab = Lab::new();
    let before = lab.fills();
    lab.request_pour();

    lab.run_ms(1500);
    assert_eq!(lab.fills(), before);
}

#[test]
fn test_retrigger_during_pour_is_ignored() {
    //! A second double-click mid-animation must not restart the sequence

    let mut lab = Lab::new();
    lab.request_pour();
    lab.run_ms(500);

    lab.request_pour();
    lab.run_ms(1500);

    // A restart would still be approaching at this point
    assert_eq!(lab.director().phase(), Some(PourPhase::Pour));
}

#[test]
fn test_empty_tube_pours_nothing() {
    //! The animation still plays, but an empty tube moves no fill

    let mut lab = Lab::new();
    lab.app
        .world_mut()
        .get_mut::<FillLevel>(lab.tube)
        .unwrap()
        .set(0.0);
    lab.request_pour();

    lab.run_ms(7000);
    assert_eq!(lab.fills(), (0.0, 0.0));
    assert!(lab.director().is_idle());
}

#[test]
fn test_pour_request_without_tube_is_noop() {
    //! Missing containers leave the director idle

    let mut lab = Lab::new();
    lab.app.world_mut().despawn(lab.tube);
    lab.request_pour();

    lab.run_ms(100);
    assert!(lab.director().is_idle());
}
