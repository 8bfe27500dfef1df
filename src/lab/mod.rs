//! Lab logic: containers, fill levels and the pour choreography
//!
//! Everything here is render-free. Containers and proxies are plain
//! components; the rendering plugin attaches meshes and materials to them
//! and copies tints and clip planes into materials.
//!
//! # Module Organization
//!
//! - `components` - Container, Flask, Tube and proxy components
//! - `fill` - [`FillLevel`] and [`transfer`]
//! - `tween` - time-driven easing between two values
//! - `choreography` - [`PourSequence`] phases and the [`PourDirector`] guard
//! - `clip` - [`ClipPlane`] math for level liquid surfaces
//! - `substance` - [`SubstanceParams`], change classification, particle scattering
//! - `events` - [`PourRequested`], [`ReagentAdded`]
//! - `systems` - ECS systems wiring the above into the frame
//! - `plugin` - [`LabPlugin`]

pub mod choreography;
pub mod clip;
pub mod components;
pub mod events;
pub mod fill;
pub mod plugin;
pub mod substance;
pub mod system_sets;
pub mod systems;
pub mod tween;

pub use choreography::{PourDirector, PourFrame, PourPhase, PourSequence, TubePose};
pub use clip::ClipPlane;
pub use components::*;
pub use events::{PourRequested, Reagent, ReagentAdded};
pub use fill::{transfer, FillLevel};
pub use plugin::LabPlugin;
pub use substance::{ContentsChange, SubstanceKind, SubstanceParams};
pub use system_sets::LabSystems;
