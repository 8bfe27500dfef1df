use bevy::prelude::*;

use crate::lab::clip::ClipPlane;
use crate::lab::components::LiquidBody;
use crate::lab::fill::FillLevel;

/// Recompute every liquid proxy's clip plane from its world rotation and
/// its container's fill level
pub fn update_clip_planes(
    mut bodies: Query<(&LiquidBody, &ChildOf, &GlobalTransform, &mut ClipPlane)>,
    containers: Query<&FillLevel>,
) {
    for (body, child_of, global, mut plane) in &mut bodies {
        let Ok(fill) = containers.get(child_of.parent()) else {
            continue;
        };
        let next = ClipPlane::for_fill(global.rotation(), *fill, body.height);
        // Keep change detection quiet while nothing moves
        if *plane != next {
            *plane = next;
        }
    }
}
