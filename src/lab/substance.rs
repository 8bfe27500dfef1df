//! Tube contents: what the user has chosen to put in the test tube
//!
//! [`SubstanceParams`] is edited by the panel. Whenever it changes, the
//! contents system compares it with what was last applied to the scene
//! ([`classify_change`]) and either swaps proxies or only recolors them.

use std::ops::RangeInclusive;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{LabConfig, SubstanceDefaults};

/// Allowed particle counts for solid contents
pub const PARTICLE_COUNT_RANGE: RangeInclusive<u32> = 10..=200;
/// Particle counts snap to multiples of this
pub const PARTICLE_COUNT_STEP: u32 = 10;

/// Radius of one solid particle sphere
pub const PARTICLE_RADIUS: f32 = 0.05;
/// Half the side of the square footprint particles are scattered in
pub const PARTICLE_SPREAD: f32 = 0.25;
/// Particles fill at most this fraction of the tube, from the bottom
pub const PARTICLE_BED_FRACTION: f32 = 0.6;

/// Physical form of the tube's contents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect,
)]
#[serde(rename_all = "lowercase")]
pub enum SubstanceKind {
    #[default]
    Liquid,
    Solid,
}

impl SubstanceKind {
    pub const ALL: [SubstanceKind; 2] = [SubstanceKind::Liquid, SubstanceKind::Solid];

    pub fn label(self) -> &'static str {
        match self {
            SubstanceKind::Liquid => "Liquid",
            SubstanceKind::Solid => "Solid",
        }
    }
}

/// Snap a particle count into the allowed range and step
pub fn snap_particle_count(count: u32) -> u32 {
    let (min, max) = (*PARTICLE_COUNT_RANGE.start(), *PARTICLE_COUNT_RANGE.end());
    let snapped = (count.clamp(min, max) + PARTICLE_COUNT_STEP / 2) / PARTICLE_COUNT_STEP
        * PARTICLE_COUNT_STEP;
    snapped.clamp(min, max)
}

/// User-chosen contents of the test tube
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct SubstanceParams {
    pub kind: SubstanceKind,
    pub color: Color,
    particle_count: u32,
}

impl FromWorld for SubstanceParams {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<LabConfig>() {
            Some(config) => Self::from_defaults(&config.substance),
            None => Self::from_defaults(&SubstanceDefaults::default()),
        }
    }
}

impl SubstanceParams {
    pub fn new(kind: SubstanceKind, color: Color, particle_count: u32) -> Self {
        Self {
            kind,
            color,
            particle_count: snap_particle_count(particle_count),
        }
    }

    pub fn from_defaults(defaults: &SubstanceDefaults) -> Self {
        Self::new(defaults.kind, defaults.color(), defaults.particle_count)
    }

    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }

    pub fn set_particle_count(&mut self, count: u32) {
        self.particle_count = snap_particle_count(count);
    }
}

/// What has to happen to the tube's proxies after a parameter change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentsChange {
    Unchanged,
    /// Same proxies, new color
    Recolor,
    /// Despawn the current proxies and build new ones
    Rebuild,
}

/// Compare the applied parameters with the requested ones
///
/// Kind changes always rebuild. A particle count change only matters for
/// solids. A pure color change keeps the proxies.
pub fn classify_change(applied: Option<&SubstanceParams>, next: &SubstanceParams) -> ContentsChange {
    let Some(applied) = applied else {
        return ContentsChange::Rebuild;
    };

    if applied.kind != next.kind
        || (next.kind == SubstanceKind::Solid && applied.particle_count != next.particle_count)
    {
        ContentsChange::Rebuild
    } else if applied.color != next.color {
        ContentsChange::Recolor
    } else {
        ContentsChange::Unchanged
    }
}

/// Random particle centers inside the lower part of a tube of `height`
///
/// Positions are relative to the tube's center: a square footprint of
/// `2 * PARTICLE_SPREAD` and the bottom `PARTICLE_BED_FRACTION` of its height.
pub fn scatter_particles<R: Rng + ?Sized>(count: u32, height: f32, rng: &mut R) -> Vec<Vec3> {
    let bottom = -height / 2.0;
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_SPREAD,
                bottom + rng.random::<f32>() * height * PARTICLE_BED_FRACTION,
                (rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_SPREAD,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(kind: SubstanceKind, color: Color, count: u32) -> SubstanceParams {
        SubstanceParams::new(kind, color, count)
    }

    // ============================================================================
    // Particle count
    // ============================================================================

    #[test]
    fn test_particle_count_snaps_to_step() {
        assert_eq!(snap_particle_count(50), 50);
        assert_eq!(snap_particle_count(54), 50);
        assert_eq!(snap_particle_count(55), 60);
        assert_eq!(snap_particle_count(0), 10);
        assert_eq!(snap_particle_count(999), 200);
    }

    #[test]
    fn test_params_from_world_use_config() {
        let mut world = World::new();
        let mut config = LabConfig::default();
        config.substance.particle_count = 73;
        world.insert_resource(config);

        let params = SubstanceParams::from_world(&mut world);
        assert_eq!(params.particle_count(), 70);
    }

    #[test]
    fn test_defaults_match_config() {
        let params = SubstanceParams::from_defaults(&SubstanceDefaults::default());
        assert_eq!(params.kind, SubstanceKind::Liquid);
        assert_eq!(params.particle_count(), 50);
        assert_eq!(params.color, Color::Srgba(Srgba::hex("#ff0055").unwrap()));
    }

    // ============================================================================
    // Change classification
    // ============================================================================

    #[test]
    fn test_first_application_rebuilds() {
        let next = SubstanceParams::from_defaults(&SubstanceDefaults::default());
        assert_eq!(classify_change(None, &next), ContentsChange::Rebuild);
    }

    #[test]
    fn test_kind_change_rebuilds() {
        let liquid = params(SubstanceKind::Liquid, Color::WHITE, 50);
        let solid = params(SubstanceKind::Solid, Color::WHITE, 50);
        assert_eq!(classify_change(Some(&liquid), &solid), ContentsChange::Rebuild);
        assert_eq!(classify_change(Some(&solid), &liquid), ContentsChange::Rebuild);
    }

    #[test]
    fn test_color_change_recolors() {
        let red = params(SubstanceKind::Solid, Color::srgb(1.0, 0.0, 0.0), 50);
        let blue = params(SubstanceKind::Solid, Color::srgb(0.0, 0.0, 1.0), 50);
        assert_eq!(classify_change(Some(&red), &blue), ContentsChange::Recolor);
    }

    #[test]
    fn test_particle_count_matters_only_for_solids() {
        let few = params(SubstanceKind::Solid, Color::WHITE, 20);
        let many = params(SubstanceKind::Solid, Color::WHITE, 120);
        assert_eq!(classify_change(Some(&few), &many), ContentsChange::Rebuild);

        let few = params(SubstanceKind::Liquid, Color::WHITE, 20);
        let many = params(SubstanceKind::Liquid, Color::WHITE, 120);
        assert_eq!(classify_change(Some(&few), &many), ContentsChange::Unchanged);
    }

    // ============================================================================
    // Scattering
    // ============================================================================

    #[test]
    fn test_scatter_stays_inside_bed() {
        let mut rng = StdRng::seed_from_u64(7);
        let height = 2.0;
        let points = scatter_particles(200, height, &mut rng);

        assert_eq!(points.len(), 200);
        for p in points {
            assert!(p.x.abs() <= PARTICLE_SPREAD);
            assert!(p.z.abs() <= PARTICLE_SPREAD);
            assert!(p.y >= -height / 2.0);
            assert!(p.y <= -height / 2.0 + height * PARTICLE_BED_FRACTION);
        }
    }

    #[test]
    fn test_scatter_is_reproducible_with_seed() {
        let a = scatter_particles(10, 1.0, &mut StdRng::seed_from_u64(42));
        let b = scatter_particles(10, 1.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
