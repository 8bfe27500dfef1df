//! System ordering for the lab
//!
//! Frame order:
//! 1. **Input** - double-click detection writes [`super::PourRequested`]
//! 2. **Choreography** - start/advance the pour, move the tube, transfer fill
//! 3. **Contents** - rebuild or recolor tube proxies after panel edits
//!
//! Clip planes are recomputed in `PostUpdate` under [`LabSystems::Clipping`],
//! after transform propagation, so they see this frame's tube pose.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum LabSystems {
    /// Pointer handling
    Input,

    /// Pour sequence and fill transfer
    Choreography,

    /// Tube proxies
    Contents,

    /// Clip planes (`PostUpdate`)
    Clipping,
}
