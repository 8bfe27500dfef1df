//! Fill levels and liquid transfer
//!
//! A fill level is the fraction of a container's height occupied by its
//! contents. Every write goes through [`FillLevel::new`], so levels stay in
//! `[0, 1]` no matter how many transfer steps run.

use bevy::prelude::*;

/// Fraction of a container's height occupied by contents, in `[0, 1]`
#[derive(Component, Debug, Clone, Copy, PartialEq, PartialOrd, Default, Reflect)]
#[reflect(Component)]
pub struct FillLevel(f32);

impl FillLevel {
    pub const EMPTY: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    /// Create a fill level, clamping into `[0, 1]` (NaN reads as empty)
    pub fn new(ratio: f32) -> Self {
        if ratio.is_nan() {
            return Self::EMPTY;
        }
        Self(ratio.clamp(0.0, 1.0))
    }

    pub fn ratio(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, ratio: f32) {
        *self = Self::new(ratio);
    }

    /// Remaining capacity before the container is full
    pub fn room(self) -> f32 {
        1.0 - self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 <= 0.0
    }

    pub fn is_full(self) -> bool {
        self.0 >= 1.0
    }
}

/// Move up to `step` of fill from `source` into `dest`
///
/// The amount moved is limited by what the source holds and by the room left
/// in the destination, so the total is conserved. Returns the amount moved.
pub fn transfer(source: &mut FillLevel, dest: &mut FillLevel, step: f32) -> f32 {
    let amount = step.max(0.0).min(source.ratio()).min(dest.room());
    if amount <= 0.0 {
        return 0.0;
    }

    source.set(source.ratio() - amount);
    dest.set(dest.ratio() + amount);
    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_out_of_range() {
        assert_eq!(FillLevel::new(1.7), FillLevel::FULL);
        assert_eq!(FillLevel::new(-0.2), FillLevel::EMPTY);
        assert_eq!(FillLevel::new(f32::NAN), FillLevel::EMPTY);
        assert_eq!(FillLevel::new(0.4).ratio(), 0.4);
    }

    #[test]
    fn test_transfer_moves_one_step() {
        let mut tube = FillLevel::new(0.5);
        let mut flask = FillLevel::EMPTY;

        let moved = transfer(&mut tube, &mut flask, 0.001);

        assert!((moved - 0.001).abs() < 1e-6);
        assert!((tube.ratio() - 0.499).abs() < 1e-6);
        assert!((flask.ratio() - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_transfer_stops_when_source_is_empty() {
        let mut tube = FillLevel::new(0.0005);
        let mut flask = FillLevel::new(0.2);

        let moved = transfer(&mut tube, &mut flask, 0.001);
        assert!((moved - 0.0005).abs() < 1e-6);
        assert!(tube.is_empty());

        assert_eq!(transfer(&mut tube, &mut flask, 0.001), 0.0);
    }

    #[test]
    fn test_transfer_never_overfills_destination() {
        let mut tube = FillLevel::new(0.5);
        let mut flask = FillLevel::new(0.9995);

        transfer(&mut tube, &mut flask, 0.001);

        assert!(flask.is_full());
        assert!((tube.ratio() - 0.4995).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_transfer_conserves_total() {
        let mut tube = FillLevel::new(0.5);
        let mut flask = FillLevel::new(0.1);

        for _ in 0..1000 {
            transfer(&mut tube, &mut flask, 0.001);
        }

        assert!(tube.is_empty());
        assert!((flask.ratio() - 0.6).abs() < 1e-4);
    }
}
