//! Integration tests for the lab state machine and config wiring

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::transform::TransformPlugin;
use chemlab::core::{CorePlugin, LabConfig, LabState, SceneProfile};
use chemlab::lab::{
    Container, ContainerKind, FillLevel, LabPlugin, PourDirector, PourRequested, SubstanceKind,
    SubstanceParams, Tube, TubeContents,
};

fn lab_app(config: LabConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, TransformPlugin));
    app.add_plugins((CorePlugin::new(config), LabPlugin));
    app
}

fn spawn_tube(app: &mut App) -> Entity {
    let container = Container::new(ContainerKind::Tube, 2.0, 0.3);
    let home = container.resting_translation(-2.0);
    app.world_mut()
        .spawn((
            container,
            Tube { home },
            FillLevel::new(0.5),
            Transform::from_translation(home),
        ))
        .id()
}

fn set_state(app: &mut App, state: LabState) {
    app.world_mut()
        .resource_mut::<NextState<LabState>>()
        .set(state);
    app.update();
}

#[test]
fn test_lab_starts_loading() {
    let mut app = lab_app(LabConfig::default());
    app.update();

    let state = app.world().resource::<State<LabState>>();
    assert_eq!(*state.get(), LabState::Loading);
}

#[test]
fn test_loading_to_ready() {
    let mut app = lab_app(LabConfig::default());
    app.update();
    set_state(&mut app, LabState::Ready);

    let state = app.world().resource::<State<LabState>>();
    assert_eq!(*state.get(), LabState::Ready);
}

#[test]
fn test_nothing_runs_while_loading() {
    //! Contents are not built and pours do not start before Ready

    let mut app = lab_app(LabConfig::default());
    spawn_tube(&mut app);
    app.update();

    app.world_mut().write_message(PourRequested);
    app.update();

    assert!(app.world().resource::<PourDirector>().is_idle());
    let contents = app
        .world_mut()
        .query_filtered::<Entity, With<TubeContents>>()
        .iter(app.world())
        .count();
    assert_eq!(contents, 0);
}

#[test]
fn test_unavailable_lab_stays_static() {
    //! An unusable asset leaves the scene without pours

    let mut app = lab_app(LabConfig::default());
    let tube = spawn_tube(&mut app);
    app.update();
    set_state(&mut app, LabState::Unavailable);

    app.world_mut().write_message(PourRequested);
    app.update();
    app.update();

    assert!(app.world().resource::<PourDirector>().is_idle());
    assert_eq!(app.world().get::<FillLevel>(tube).unwrap().ratio(), 0.5);
}

#[test]
fn test_substance_defaults_come_from_config() {
    //! The panel starts from the configured tube contents

    let mut config = LabConfig::default();
    config.profile = SceneProfile::Showcase;
    config.substance.kind = SubstanceKind::Solid;
    config.substance.particle_count = 87;

    let mut app = lab_app(config);
    app.update();

    let params = app.world().resource::<SubstanceParams>();
    assert_eq!(params.kind, SubstanceKind::Solid);
    // Snapped to the slider step
    assert_eq!(params.particle_count(), 90);
}
