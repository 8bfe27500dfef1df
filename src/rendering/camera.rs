//! Orbit camera with damping
//!
//! Left drag orbits around the focus point, the wheel zooms. Input moves
//! *target* angles and distance; every frame the current values ease toward
//! the targets, which gives the damped feel of classic orbit controls.
//! Pointer input that egui claims is ignored.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f32::consts::FRAC_PI_2;

/// Radians of orbit per pixel dragged
const ROTATE_SENSITIVITY: f32 = 0.005;
/// Fraction of the distance zoomed per scroll unit
const ZOOM_SENSITIVITY: f32 = 0.1;
/// Keep the camera off the poles
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;
/// Damping factors are per frame at this rate
const REFERENCE_FPS: f32 = 60.0;

/// Spherical camera rig around a focus point
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,

    /// Current angles and distance
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,

    /// Where input wants the camera to be
    pub target_yaw: f32,
    pub target_pitch: f32,
    pub target_distance: f32,

    /// Zoom limits
    pub min_distance: f32,
    pub max_distance: f32,

    /// Fraction of the remaining gap closed per 60 Hz frame
    pub damping: f32,
}

impl OrbitCamera {
    /// Rig that starts exactly at `eye`, looking at `focus`
    pub fn looking_at(eye: Vec3, focus: Vec3, distance_limits: (f32, f32), damping: f32) -> Self {
        let offset = eye - focus;
        let (min_distance, max_distance) = distance_limits;
        let distance = offset.length().clamp(min_distance, max_distance);
        let pitch = if distance > 0.0 {
            (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        let yaw = offset.x.atan2(offset.z);

        Self {
            focus,
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
            min_distance,
            max_distance,
            damping,
        }
    }

    /// Apply a drag in pixels
    pub fn rotate(&mut self, drag: Vec2) {
        self.target_yaw -= drag.x * ROTATE_SENSITIVITY;
        self.target_pitch =
            (self.target_pitch + drag.y * ROTATE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Apply wheel scroll; positive zooms in
    pub fn zoom(&mut self, scroll: f32) {
        let factor = 1.0 - scroll * ZOOM_SENSITIVITY;
        self.target_distance =
            (self.target_distance * factor.max(0.1)).clamp(self.min_distance, self.max_distance);
    }

    /// Ease current values toward the targets; returns whether anything moved
    pub fn step(&mut self, dt: f32) -> bool {
        let t = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(dt * REFERENCE_FPS);
        let before = (self.yaw, self.pitch, self.distance);

        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.distance += (self.target_distance - self.distance) * t;

        before != (self.yaw, self.pitch, self.distance)
    }

    /// Camera position for the current angles and distance
    pub fn eye(&self) -> Vec3 {
        self.focus
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }
}

/// Feed pointer drag and wheel into the orbit targets
pub fn orbit_camera_input(
    mut contexts: EguiContexts,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut cameras: Query<&mut OrbitCamera>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    if ctx.wants_pointer_input() || ctx.is_pointer_over_area() {
        return Ok(());
    }

    for mut orbit in &mut cameras {
        if mouse_button.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
            orbit.rotate(mouse_motion.delta);
        }
        if mouse_scroll.delta.y != 0.0 {
            orbit.zoom(mouse_scroll.delta.y);
        }
    }
    Ok(())
}

/// Damp toward the targets and place the camera
pub fn orbit_camera_motion(
    time: Res<Time>,
    mut cameras: Query<(&mut Transform, &mut OrbitCamera)>,
) {
    for (mut transform, mut orbit) in &mut cameras {
        if orbit.step(time.delta_secs()) {
            transform.translation = orbit.eye();
            transform.look_at(orbit.focus, Vec3::Y);
        }
    }
}
