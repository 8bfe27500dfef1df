//! UI module - egui panel for the lab
//!
//! - **substance_panel**: tube contents, reagent buttons and pour status
//!
//! Uses `bevy_egui`; panel systems run in `EguiPrimaryContextPass`.

pub mod substance_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub use substance_panel::substance_panel_ui;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, substance_panel_ui);
    }
}
