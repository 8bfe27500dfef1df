//! Core plugin for the lab application
//!
//! Provides the foundational setup every other lab plugin relies on:
//! - [`LabConfig`] resource (inserted from the resolved config, or defaults)
//! - [`LabState`] state machine and transition logging
//! - Type registration for reflection
//!
//! # Plugin Order
//!
//! 1. [`bevy::DefaultPlugins`] - Core Bevy functionality (states, assets, picking)
//! 2. [`bevy_egui::EguiPlugin`] - UI framework
//! 3. [`CorePlugin`] - Foundation (config, state)
//! 4. [`crate::lab::LabPlugin`] - Pour choreography and contents
//! 5. [`crate::assets::LabAssetsPlugin`], [`crate::rendering::RenderingPlugin`],
//!    [`crate::input::InputPlugin`], [`crate::ui::UiPlugin`]

use bevy::prelude::*;

use super::{states::validate_and_log_state_transitions, LabConfig, LabState, SceneProfile};

/// Core plugin for the lab application
///
/// Carries the resolved config so the app can be built from a single value.
#[derive(Default)]
pub struct CorePlugin {
    pub config: LabConfig,
}

impl CorePlugin {
    pub fn new(config: LabConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        app.init_state::<LabState>();

        app.register_type::<LabState>()
            .register_type::<SceneProfile>();

        app.add_systems(Update, validate_and_log_state_transitions);

        info!(
            "[CORE] Lab configured: profile {:?}, asset {}",
            self.config.profile, self.config.asset.path
        );
    }
}
