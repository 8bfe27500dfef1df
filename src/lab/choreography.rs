//! Pour choreography
//!
//! One pour is a fixed sequence of tube poses:
//!
//! ```text
//! Approach (move + slight tilt, quadratic in-out)
//!   → Pour (tilt past horizontal, cubic in-out)
//!   → Settle (hold)
//!   → Return (untilt and move home, linear, concurrently)
//! ```
//!
//! [`PourSequence`] is pure: it is advanced by explicit time steps and hands
//! back a [`PourFrame`] describing the pose and whether liquid should flow.
//! [`PourDirector`] is the resource that guarantees only one sequence runs at
//! a time.

use std::time::Duration;

use bevy::math::curve::easing::EaseFunction;
use bevy::prelude::*;

use super::tween::Tween;
use crate::core::PourSettings;

/// Phase of a running pour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PourPhase {
    Approach,
    Pour,
    Settle,
    Return,
}

/// Position and tilt of the tube's pivot
///
/// Tilt is a rotation about the world Z axis in radians; negative values tip
/// the tube's mouth toward +X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubePose {
    pub translation: Vec3,
    pub tilt: f32,
}

impl TubePose {
    pub fn upright(translation: Vec3) -> Self {
        Self {
            translation,
            tilt: 0.0,
        }
    }

    /// Read a pose back from a transform, keeping only the Z rotation
    pub fn from_transform(transform: &Transform) -> Self {
        let (_, _, tilt) = transform.rotation.to_euler(EulerRot::XYZ);
        Self {
            translation: transform.translation,
            tilt,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.tilt)
    }
}

/// Output of one advance step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PourFrame {
    pub pose: TubePose,
    /// Phase after the step
    pub phase: PourPhase,
    /// The tube is tilted past the pour threshold during the pour phase
    pub pouring: bool,
    /// The sequence reached its end; the pose is the home pose
    pub finished: bool,
}

/// Where the tube's mouth goes before tilting: just above the flask's neck
///
/// The offsets are in asset units and grow with the flask's `scale`.
pub fn approach_target(
    tube_translation: Vec3,
    flask_center: Vec3,
    flask_height: f32,
    scale: f32,
    settings: &PourSettings,
) -> Vec3 {
    Vec3::new(
        flask_center.x + settings.approach_offset_x * scale,
        flask_center.y + flask_height / 2.0 + settings.approach_clearance * scale,
        tube_translation.z,
    )
}

/// A single pour, advanced by explicit time steps
#[derive(Debug, Clone)]
pub struct PourSequence {
    settings: PourSettings,
    phase: PourPhase,
    home: TubePose,
    translation: Tween<Vec3>,
    tilt: Tween<f32>,
    settle_left: Duration,
    finished: bool,
}

impl PourSequence {
    /// Begin the approach phase from the tube's current pose
    pub fn start(from: TubePose, home: TubePose, target: Vec3, settings: &PourSettings) -> Self {
        let approach = settings.approach();
        Self {
            settings: settings.clone(),
            phase: PourPhase::Approach,
            home,
            translation: Tween::new(
                from.translation,
                target,
                approach,
                EaseFunction::QuadraticInOut,
            ),
            tilt: Tween::new(
                from.tilt,
                settings.approach_tilt,
                approach,
                EaseFunction::QuadraticInOut,
            ),
            settle_left: settings.settle(),
            finished: false,
        }
    }

    pub fn phase(&self) -> PourPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pose(&self) -> TubePose {
        TubePose {
            translation: self.translation.value(),
            tilt: self.tilt.value(),
        }
    }

    /// Advance by `dt`; time left over at the end of a phase carries into the next
    pub fn advance(&mut self, dt: Duration) -> PourFrame {
        let mut remaining = dt;
        let mut pouring = false;

        while !self.finished {
            match self.phase {
                PourPhase::Approach => {
                    let left_move = self.translation.advance(remaining);
                    let left_tilt = self.tilt.advance(remaining);
                    if !(self.translation.is_finished() && self.tilt.is_finished()) {
                        break;
                    }
                    remaining = left_move.min(left_tilt);
                    self.enter(PourPhase::Pour);
                }
                PourPhase::Pour => {
                    let left = self.tilt.advance(remaining);
                    pouring |= self.tilt.value() < self.settings.pour_threshold;
                    if !self.tilt.is_finished() {
                        break;
                    }
                    remaining = left;
                    self.enter(PourPhase::Settle);
                }
                PourPhase::Settle => {
                    if remaining < self.settle_left {
                        self.settle_left -= remaining;
                        break;
                    }
                    remaining -= self.settle_left;
                    self.settle_left = Duration::ZERO;
                    self.enter(PourPhase::Return);
                }
                PourPhase::Return => {
                    self.translation.advance(remaining);
                    self.tilt.advance(remaining);
                    if self.translation.is_finished() && self.tilt.is_finished() {
                        self.finished = true;
                    }
                    break;
                }
            }
        }

        PourFrame {
            pose: self.pose(),
            phase: self.phase,
            pouring,
            finished: self.finished,
        }
    }

    fn enter(&mut self, phase: PourPhase) {
        debug!("[POUR] {:?} -> {:?}", self.phase, phase);
        let current = self.pose();

        match phase {
            PourPhase::Approach => {}
            PourPhase::Pour => {
                self.tilt = Tween::new(
                    current.tilt,
                    self.settings.pour_tilt,
                    self.settings.pour(),
                    EaseFunction::CubicInOut,
                );
            }
            PourPhase::Settle => {
                self.settle_left = self.settings.settle();
            }
            PourPhase::Return => {
                self.tilt = Tween::new(
                    current.tilt,
                    self.home.tilt,
                    self.settings.return_tilt(),
                    EaseFunction::Linear,
                );
                self.translation = Tween::new(
                    current.translation,
                    self.home.translation,
                    self.settings.return_move(),
                    EaseFunction::Linear,
                );
            }
        }

        self.phase = phase;
    }
}

/// Guards the tube so only one pour runs at a time
#[derive(Resource, Debug, Default)]
pub struct PourDirector {
    active: Option<PourSequence>,
}

impl PourDirector {
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn phase(&self) -> Option<PourPhase> {
        self.active.as_ref().map(PourSequence::phase)
    }

    /// Start a sequence unless one is already running
    ///
    /// Returns `false` (and drops `sequence`) while animating.
    pub fn try_start(&mut self, sequence: PourSequence) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(sequence);
        true
    }

    /// Advance the running sequence; back to idle once it finishes
    pub fn advance(&mut self, dt: Duration) -> Option<PourFrame> {
        let sequence = self.active.as_mut()?;
        let frame = sequence.advance(dt);
        if frame.finished {
            self.active = None;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const STEP: Duration = Duration::from_millis(10);

    fn sequence() -> PourSequence {
        let settings = PourSettings::default();
        let home = TubePose::upright(Vec3::new(-2.0, 2.0, 0.0));
        let target = approach_target(home.translation, Vec3::new(2.0, 1.0, 0.0), 2.0, 1.0, &settings);
        PourSequence::start(home, home, target, &settings)
    }

    /// Step in fixed increments up to `ms`, returning the last frame
    fn run_to(sequence: &mut PourSequence, ms: u64) -> PourFrame {
        let mut frame = sequence.advance(Duration::ZERO);
        for _ in 0..(ms / STEP.as_millis() as u64) {
            frame = sequence.advance(STEP);
        }
        frame
    }

    #[test]
    fn test_approach_target_sits_above_flask_neck() {
        let settings = PourSettings::default();
        let target = approach_target(Vec3::new(-2.0, 2.0, 0.5), Vec3::new(2.0, 1.0, 0.0), 2.0, 1.0, &settings);

        assert!((target.x - 1.9).abs() < 1e-5);
        assert!((target.y - 2.3).abs() < 1e-5);
        assert_eq!(target.z, 0.5);
    }

    #[test]
    fn test_approach_offsets_follow_asset_scale() {
        let settings = PourSettings::default();
        let target = approach_target(Vec3::new(-4.0, 4.0, 0.0), Vec3::new(2.0, 2.0, 0.0), 4.0, 2.0, &settings);

        assert!((target.x - 1.8).abs() < 1e-5);
        assert!((target.y - 4.6).abs() < 1e-5);
    }

    #[test]
    fn test_approach_ends_at_target() {
        let mut seq = sequence();
        let frame = run_to(&mut seq, 1500);

        assert_eq!(frame.phase, PourPhase::Pour);
        assert!(frame.pose.translation.distance(Vec3::new(1.9, 2.3, 0.0)) < 1e-4);
        assert!((frame.pose.tilt + PI / 6.0).abs() < 1e-4);
        assert!(!frame.pouring);
    }

    #[test]
    fn test_pour_reaches_full_tilt() {
        let mut seq = sequence();
        let frame = run_to(&mut seq, 4000);

        assert_eq!(frame.phase, PourPhase::Settle);
        assert!((frame.pose.tilt + 0.85 * PI).abs() < 1e-4);
    }

    #[test]
    fn test_pouring_only_past_threshold() {
        let settings = PourSettings::default();
        let mut seq = sequence();
        run_to(&mut seq, 1500);

        let mut saw_pouring = false;
        for _ in 0..250 {
            let frame = seq.advance(STEP);
            if frame.pouring {
                assert!(frame.pose.tilt < settings.pour_threshold);
                saw_pouring = true;
            } else if frame.phase == PourPhase::Pour {
                assert!(frame.pose.tilt >= settings.pour_threshold);
            }
        }
        assert!(saw_pouring);

        // Settle holds the pose without pouring
        let frame = seq.advance(STEP);
        assert_eq!(frame.phase, PourPhase::Settle);
        assert!(!frame.pouring);
    }

    #[test]
    fn test_return_untilts_before_arriving_home() {
        let mut seq = sequence();
        let frame = run_to(&mut seq, 6000);

        assert_eq!(frame.phase, PourPhase::Return);
        assert!(frame.pose.tilt.abs() < 1e-4);
        assert!(frame.pose.translation.distance(Vec3::new(-2.0, 2.0, 0.0)) > 0.1);

        let frame = run_to(&mut seq, 500);
        assert!(frame.finished);
        assert!(frame.pose.translation.distance(Vec3::new(-2.0, 2.0, 0.0)) < 1e-4);
    }

    #[test]
    fn test_large_step_carries_over_phases() {
        let mut seq = sequence();
        let frame = seq.advance(Duration::from_millis(4500));

        assert_eq!(frame.phase, PourPhase::Settle);
        assert!(frame.pouring);
        assert!((frame.pose.tilt + 0.85 * PI).abs() < 1e-4);

        let frame = seq.advance(Duration::from_secs(10));
        assert!(frame.finished);
    }

    #[test]
    fn test_director_ignores_retrigger_while_animating() {
        let mut director = PourDirector::default();
        assert!(director.is_idle());

        assert!(director.try_start(sequence()));
        director.advance(Duration::from_millis(700));
        assert!(!director.try_start(sequence()));
        assert_eq!(director.phase(), Some(PourPhase::Approach));

        director.advance(Duration::from_millis(6500));
        assert!(director.is_idle());
        assert!(director.advance(STEP).is_none());
        assert!(director.try_start(sequence()));
    }
}
