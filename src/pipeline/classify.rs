//! Sphere vs tile frustum classification.
//!
//! The test is conservative: spheres near frustum corners may be reported
//! inside without touching the volume, but a sphere that touches the volume
//! is never reported outside. Touching a boundary counts as inside.

use super::frustum::{Plane, TileFrustum};
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Inside,
    Outside,
}

impl Containment {
    pub fn is_inside(self) -> bool {
        self == Containment::Inside
    }
}

/// `true` when the whole sphere lies on the negative side of `plane`.
pub fn is_sphere_behind_plane(center: Vec3, radius: f32, plane: &Plane) -> bool {
    plane.signed_distance(center) < -radius
}

/// Classifies a view-space sphere against a tile frustum.
pub fn classify(center: Vec3, radius: f32, tile: &TileFrustum) -> Containment {
    let in_front_of_near = center.z + radius < tile.z_near;
    let beyond_far = center.z - radius > tile.z_far;
    if in_front_of_near || beyond_far {
        return Containment::Outside;
    }

    if tile
        .frustum
        .planes
        .iter()
        .any(|plane| is_sphere_behind_plane(center, radius, plane))
    {
        Containment::Outside
    } else {
        Containment::Inside
    }
}
