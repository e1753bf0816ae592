//! Tile frustum construction.
//!
//! Each tile's frustum is a pyramid with its apex at the eye, cut by the
//! four planes through the eye and the tile's reprojected screen corners.
//! Near and far are plain view-space Z bounds taken from the tile's depth
//! range.

use super::depth::DepthRange;
use crate::config::TILE_SIZE;
use crate::scene::FrameUniforms;
use glam::{Mat4, UVec2, Vec2, Vec3};

/// Half-space boundary. A point is behind the plane when
/// `dot(p, normal) - distance_to_origin < 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance_to_origin: f32,
}

impl Plane {
    /// Plane through three points, facing along `(p1 - p0) x (p2 - p0)`.
    pub fn from_points(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let normal = (p1 - p0).cross(p2 - p0).normalize();
        Self {
            normal,
            distance_to_origin: normal.dot(p0),
        }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        point.dot(self.normal) - self.distance_to_origin
    }
}

/// Side planes of a tile frustum, all facing inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Left, right, top, bottom
    pub planes: [Plane; 4],
}

impl Frustum {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const TOP: usize = 2;
    pub const BOTTOM: usize = 3;
}

/// A tile's side planes plus its view-space depth bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFrustum {
    pub frustum: Frustum,
    pub z_near: f32,
    pub z_far: f32,
}

impl TileFrustum {
    /// Builds the frustum of tile `tile` from its reduced depth range.
    pub fn build(tile: UVec2, frame: &FrameUniforms, depth: DepthRange) -> Self {
        let frustum = side_planes(tile, frame.screen_size, &frame.inverse_projection);
        let (z_near, z_far) = depth_bounds(depth, &frame.inverse_projection, frame.near_plane_choice);
        Self { frustum, z_near, z_far }
    }
}

/// Maps a clip-space point to view space.
pub fn clip_to_view(inverse_projection: &Mat4, position_cs: Vec3) -> Vec3 {
    inverse_projection.project_point3(position_cs)
}

/// Maps a screen-space pixel position (origin top-left) to the view-space
/// point on the far clip plane along the same ray.
pub fn screen_to_view(inverse_projection: &Mat4, screen_size: UVec2, position_ss: Vec2) -> Vec3 {
    let mut uv = position_ss / screen_size.as_vec2();
    uv.y = 1.0 - uv.y;
    let clip = uv * 2.0 - 1.0;
    clip_to_view(inverse_projection, clip.extend(1.0))
}

fn side_planes(tile: UVec2, screen_size: UVec2, inverse_projection: &Mat4) -> Frustum {
    // 0 -- 1
    // |    |
    // 2 -- 3
    let origin = (tile * TILE_SIZE).as_vec2();
    let size = TILE_SIZE as f32;
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(size, 0.0),
        Vec2::new(0.0, size),
        Vec2::new(size, size),
    ]
    .map(|offset| screen_to_view(inverse_projection, screen_size, origin + offset));

    let eye = Vec3::ZERO;
    Frustum {
        planes: [
            Plane::from_points(eye, corners[0], corners[2]),
            Plane::from_points(eye, corners[3], corners[1]),
            Plane::from_points(eye, corners[1], corners[0]),
            Plane::from_points(eye, corners[2], corners[3]),
        ],
    }
}

fn depth_bounds(depth: DepthRange, inverse_projection: &Mat4, near_plane_choice: f32) -> (f32, f32) {
    let view_z = |depth: f32| clip_to_view(inverse_projection, Vec3::new(0.0, 0.0, depth)).z;

    // Either end of the clip range may be the near one (reversed depth).
    let near_clip = view_z(0.0).min(view_z(1.0));
    if depth.is_background() {
        return (near_clip, f32::INFINITY);
    }

    let a = view_z(depth.min_depth());
    let b = view_z(depth.max_depth());
    let (min_z, max_z) = (a.min(b), a.max(b));
    let z_near = min_z + (near_clip - min_z) * near_plane_choice;
    (z_near, max_z)
}
