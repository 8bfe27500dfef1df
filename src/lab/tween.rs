//! Time-driven interpolation between two values
//!
//! A [`Tween`] samples a Bevy [`EasingCurve`] by elapsed time instead of a
//! normalized parameter, and reports how much of an advance step was left
//! over once it reaches the end so a sequence can carry that time into its
//! next phase.

use std::time::Duration;

use bevy::math::curve::easing::{Ease, EaseFunction, EasingCurve};
use bevy::math::curve::Curve;

/// Interpolates from a start value to an end value over a fixed duration
#[derive(Debug, Clone)]
pub struct Tween<T: Ease + Clone> {
    curve: EasingCurve<T>,
    duration: Duration,
    elapsed: Duration,
}

impl<T: Ease + Clone> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration, ease: EaseFunction) -> Self {
        Self {
            curve: EasingCurve::new(from, to, ease),
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `dt`, returning the part of `dt` past the end of the tween
    pub fn advance(&mut self, dt: Duration) -> Duration {
        let remaining = self.duration.saturating_sub(self.elapsed);
        if dt >= remaining {
            self.elapsed = self.duration;
            dt - remaining
        } else {
            self.elapsed += dt;
            Duration::ZERO
        }
    }

    /// Fraction of the duration elapsed, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Current eased value
    pub fn value(&self) -> T {
        self.curve.sample_clamped(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn test_linear_tween_midpoint() {
        let mut tween = Tween::new(0.0_f32, 10.0, Duration::from_millis(1000), EaseFunction::Linear);
        tween.advance(Duration::from_millis(500));

        assert!((tween.value() - 5.0).abs() < 1e-4);
        assert!(!tween.is_finished());
    }

    #[test]
    fn test_eased_tween_hits_both_ends() {
        let from = Vec3::new(-2.0, 1.0, 0.0);
        let to = Vec3::new(1.9, 2.3, 0.0);
        let mut tween = Tween::new(from, to, Duration::from_millis(1500), EaseFunction::QuadraticInOut);

        assert!(tween.value().distance(from) < 1e-5);

        tween.advance(Duration::from_millis(1500));
        assert!(tween.is_finished());
        assert!(tween.value().distance(to) < 1e-5);
    }

    #[test]
    fn test_advance_reports_overflow() {
        let mut tween = Tween::new(0.0_f32, 1.0, Duration::from_millis(100), EaseFunction::Linear);

        assert_eq!(tween.advance(Duration::from_millis(60)), Duration::ZERO);
        assert_eq!(tween.advance(Duration::from_millis(60)), Duration::from_millis(20));
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let tween = Tween::new(3.0_f32, 7.0, Duration::ZERO, EaseFunction::CubicInOut);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 7.0);
    }
}
