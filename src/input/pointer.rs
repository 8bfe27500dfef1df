//! Double-click detection on the test tube
//!
//! Picking reports single clicks; a pour starts when two primary clicks land
//! on the tube's sub-tree (glass or contents) within the configured window.
//! Clicks anywhere else still reset the pairing.

use std::time::Duration;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::picking::events::{Click, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

use crate::core::LabConfig;
use crate::lab::{PourRequested, Tube};

/// Helper to check if primary button (left click) was used
fn is_primary(button: PointerButton) -> bool {
    matches!(button, PointerButton::Primary)
}

/// Last unpaired click
#[derive(Resource, Debug, Default)]
pub struct ClickTracker {
    last: Option<(Duration, Entity)>,
}

impl ClickTracker {
    /// Record a click on `target` at `now`
    ///
    /// Returns `true` when it completes a double-click: the previous click hit
    /// the same target no more than `window` earlier. A completed pair is
    /// consumed, so a triple click is one double-click plus a single click.
    pub fn register(&mut self, now: Duration, target: Entity, window: Duration) -> bool {
        match self.last {
            Some((at, previous)) if previous == target && now.saturating_sub(at) <= window => {
                self.last = None;
                true
            }
            _ => {
                self.last = Some((now, target));
                false
            }
        }
    }
}

/// Whether `entity` is `root` or one of its descendants
pub fn is_in_subtree(
    entity: Entity,
    root: Entity,
    parent_of: impl Fn(Entity) -> Option<Entity>,
) -> bool {
    let mut current = Some(entity);
    while let Some(e) = current {
        if e == root {
            return true;
        }
        current = parent_of(e);
    }
    false
}

/// Turn double-clicks on the tube into pour requests
pub fn detect_tube_double_click(
    mut clicks: MessageReader<Pointer<Click>>,
    time: Res<Time>,
    config: Res<LabConfig>,
    mut tracker: ResMut<ClickTracker>,
    tubes: Query<Entity, With<Tube>>,
    parents: Query<&ChildOf>,
    mut requests: MessageWriter<PourRequested>,
) {
    let window = Duration::from_millis(config.input.double_click_window_ms);
    let tube = tubes.single().ok();

    for click in clicks.read() {
        if !is_primary(click.event.button) {
            continue;
        }

        // Clicks on any part of the tube count as the same target
        let target = match tube {
            Some(tube)
                if is_in_subtree(click.entity, tube, |e| {
                    parents.get(e).ok().map(ChildOf::parent)
                }) =>
            {
                tube
            }
            _ => click.entity,
        };

        if tracker.register(time.elapsed(), target, window) && Some(target) == tube {
            info!("[INPUT] Double-click on tube {:?}", target);
            requests.write(PourRequested);
        }
    }
}
