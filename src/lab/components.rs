//! Lab ECS components
//!
//! Containers are the two classified nodes of the lab asset. Proxies are the
//! generated stand-ins for their contents; they carry only logical data
//! here; meshes and materials are attached by the rendering plugin.

use bevy::color::Mix;
use bevy::prelude::*;

/// Which of the two lab containers an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ContainerKind {
    Flask,
    Tube,
}

/// Where a container's origin sits relative to its geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PivotAnchor {
    /// Origin at the geometric center
    Center,
    /// Origin at the top of the geometry, so it tilts about its mouth
    Mouth,
}

/// A classified container of the lab asset
///
/// The entity is the container's pivot. Its mesh primitives hang below it
/// as children, offset according to `anchor`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Container {
    pub kind: ContainerKind,
    /// Vertical extent of the geometry in container-local units
    pub height: f32,
    pub anchor: PivotAnchor,
    /// Radius of the liquid cylinder that fits inside
    pub liquid_radius: f32,
    /// Scale the asset was placed at; contents and pour offsets follow it
    pub scale: f32,
}

impl Container {
    pub fn new(kind: ContainerKind, height: f32, liquid_radius: f32) -> Self {
        let anchor = match kind {
            ContainerKind::Flask => PivotAnchor::Center,
            ContainerKind::Tube => PivotAnchor::Mouth,
        };
        Self {
            kind,
            height,
            anchor,
            liquid_radius,
            scale: 1.0,
        }
    }

    /// Same container for an asset placed at `scale`
    ///
    /// `height` is expected to be measured at that scale already; only the
    /// liquid radius, given in asset units, is scaled here.
    pub fn at_scale(self, scale: f32) -> Self {
        Self {
            liquid_radius: self.liquid_radius * scale,
            scale,
            ..self
        }
    }

    /// Local offset from the pivot to the geometric center
    pub fn center_offset(&self) -> Vec3 {
        match self.anchor {
            PivotAnchor::Center => Vec3::ZERO,
            PivotAnchor::Mouth => Vec3::new(0.0, -self.height / 2.0, 0.0),
        }
    }

    /// Pivot translation that rests the container on the floor at `x`
    pub fn resting_translation(&self, x: f32) -> Vec3 {
        match self.anchor {
            PivotAnchor::Center => Vec3::new(x, self.height / 2.0, 0.0),
            PivotAnchor::Mouth => Vec3::new(x, self.height, 0.0),
        }
    }
}

/// The flask that receives the pour
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct Flask;

/// The test tube that pours
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Tube {
    /// Pivot translation the tube returns to after a pour
    pub home: Vec3,
}

/// A clipped cylinder standing in for liquid
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LiquidBody {
    pub radius: f32,
    pub height: f32,
    pub opacity: f32,
}

impl LiquidBody {
    pub const TUBE_OPACITY: f32 = 0.8;
    pub const FLASK_OPACITY: f32 = 0.6;
}

/// Parent of the spheres standing in for a solid
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ParticleCluster {
    pub count: u32,
}

/// One sphere of a [`ParticleCluster`]
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct SolidParticle;

/// Proxies that make up the tube's contents and are replaced on rebuild
#[derive(Component, Debug, Default, Reflect)]
#[reflect(Component)]
pub struct TubeContents;

/// Display color of a proxy
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProxyTint(pub Color);

impl ProxyTint {
    /// Move the tint `factor` of the way toward `target` in linear RGB
    pub fn blend_toward(&mut self, target: Color, factor: f32) {
        let current = self.0.to_linear();
        self.0 = Color::LinearRgba(current.mix(&target.to_linear(), factor.clamp(0.0, 1.0)));
    }
}
