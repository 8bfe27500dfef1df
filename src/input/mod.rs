//! Input module - pointer handling for the lab
//!
//! Picking (`MeshPickingPlugin`) reports clicks on meshes as
//! `Pointer<Click>` messages. `pointer` pairs them into double-clicks on the
//! test tube and writes [`crate::lab::PourRequested`].
//!
//! Camera drag and zoom live in [`crate::rendering::camera`].

pub mod pointer;

use bevy::prelude::*;

use crate::lab::LabSystems;
pub use pointer::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>().add_systems(
            Update,
            detect_tube_double_click.in_set(LabSystems::Input),
        );
    }
}
