//! Level liquid surfaces
//!
//! A liquid proxy is a solid cylinder; the visible liquid is the part of it
//! below a plane that stays horizontal in world space however the container
//! is tilted. The plane is kept in proxy-local space here. Rendering maps it
//! to world space each frame with [`ClipPlane::to_world`].

use bevy::prelude::*;

use super::fill::FillLevel;

/// Clip plane in proxy-local space, relative to the proxy's center
///
/// Points with `normal · p <= constant` are kept (they are liquid).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ClipPlane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Default for ClipPlane {
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            constant: 0.0,
        }
    }
}

impl ClipPlane {
    /// Plane for a proxy of `height` filled to `fill`, given its world rotation
    ///
    /// The normal is world up expressed in local space, so the surface stays
    /// level. The constant places it `fill` of the way up the proxy.
    pub fn for_fill(world_rotation: Quat, fill: FillLevel, height: f32) -> Self {
        let normal = (world_rotation.inverse() * Vec3::Y).normalize_or_zero();
        let normal = if normal == Vec3::ZERO { Vec3::Y } else { normal };
        Self {
            normal,
            constant: (fill.ratio() - 0.5) * height,
        }
    }

    /// Whether a local point lies on the liquid side
    pub fn keeps(&self, point: Vec3) -> bool {
        self.normal.dot(point) <= self.constant
    }

    /// Map to a world-space plane `(n, w)` with the same kept side
    ///
    /// A world point `p` is kept when `n · p <= w`.
    pub fn to_world(&self, transform: &GlobalTransform) -> Vec4 {
        let surface = transform.transform_point(self.normal * self.constant);
        let normal = (transform.rotation() * self.normal).normalize_or_zero();
        normal.extend(normal.dot(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_upright_half_fill() {
        let plane = ClipPlane::for_fill(Quat::IDENTITY, FillLevel::new(0.5), 2.0);

        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.constant, 0.0);
        assert!(plane.keeps(Vec3::new(0.0, -0.5, 0.0)));
        assert!(!plane.keeps(Vec3::new(0.0, 0.5, 0.0)));
    }

    #[test]
    fn test_empty_and_full_extremes() {
        let empty = ClipPlane::for_fill(Quat::IDENTITY, FillLevel::EMPTY, 2.0);
        assert!(!empty.keeps(Vec3::new(0.0, -0.99, 0.0)));

        let full = ClipPlane::for_fill(Quat::IDENTITY, FillLevel::FULL, 2.0);
        assert!(full.keeps(Vec3::new(0.0, 0.99, 0.0)));
    }

    #[test]
    fn test_normal_tracks_world_up_when_tilted() {
        let rotation = Quat::from_rotation_z(-0.85 * std::f32::consts::PI);
        let plane = ClipPlane::for_fill(rotation, FillLevel::new(0.3), 1.0);

        assert!((rotation * plane.normal).distance(Vec3::Y) < 1e-5);
    }

    #[test]
    fn test_sideways_container_keeps_lower_side() {
        // Tipped onto its side, local +X points up in world space
        let rotation = Quat::from_rotation_z(FRAC_PI_2);
        let plane = ClipPlane::for_fill(rotation, FillLevel::new(0.5), 1.0);

        assert!(plane.keeps(Vec3::new(-0.2, 0.0, 0.0)));
        assert!(!plane.keeps(Vec3::new(0.2, 0.0, 0.0)));
    }

    #[test]
    fn test_world_plane_is_horizontal_at_surface_height() {
        let transform = GlobalTransform::from(
            Transform::from_xyz(1.0, 3.0, 0.0).with_rotation(Quat::from_rotation_z(-0.4)),
        );
        let plane = ClipPlane::for_fill(transform.rotation(), FillLevel::new(0.75), 2.0);
        let world = plane.to_world(&transform);

        assert!(world.truncate().distance(Vec3::Y) < 1e-5);
        // Center is at y = 3, surface is half a unit above it
        assert!((world.w - 3.5).abs() < 1e-4);
    }
}
