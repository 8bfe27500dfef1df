//! Core module - configuration, errors and application state
//!
//! # Contents
//!
//! - [`LabConfig`] - Every tunable of the scene, loaded from JSON
//! - [`SceneProfile`] - The two lab setups the scene bootstrap reproduces
//! - [`LabState`] - Loading state machine (`Loading → Ready | Unavailable`)
//! - [`LabError`] - Error type for config and asset failures
//! - [`CorePlugin`] - Inserts the config and registers the state machine

pub mod config;
pub mod error;
pub mod plugin;
pub mod states;
pub mod window_config;

// Re-export commonly used items
pub use config::*;
pub use error::{LabError, LabResult};
pub use plugin::CorePlugin;
pub use states::*;
pub use window_config::WindowConfig;
