//! Camera system

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, UVec2, Vec3};

/// Perspective projection. View space is left-handed: +Z points away from
/// the eye, so view depth grows with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect, self.near, self.far)
    }
}

/// Camera for viewing the scene
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::Z,
            up: Vec3::Y,
            projection: Projection::default(),
        }
    }
}

impl Camera {
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Depth-buffer value written for a surface at the given view-space depth.
    pub fn depth_for_view_z(&self, view_z: f32) -> f32 {
        self.projection_matrix()
            .project_point3(Vec3::new(0.0, 0.0, view_z))
            .z
    }

    /// Build the per-frame culling uniforms for a screen of the given size.
    pub fn frame_uniforms(&self, width: u32, height: u32, near_plane_choice: f32) -> FrameUniforms {
        FrameUniforms {
            view: self.view_matrix(),
            inverse_projection: self.projection_matrix().inverse(),
            screen_size: UVec2::new(width, height),
            near_plane_choice,
            _padding: 0.0,
        }
    }
}

/// Per-frame constants read by the culling kernel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: Mat4,
    pub inverse_projection: Mat4,
    pub screen_size: UVec2,
    /// Blend of each tile's near bound toward the true near clip plane:
    /// 0 uses the reconstructed depth, 1 always uses the near clip plane.
    pub near_plane_choice: f32,
    pub _padding: f32,
}

impl FrameUniforms {
    pub fn width(&self) -> u32 {
        self.screen_size.x
    }

    pub fn height(&self) -> u32 {
        self.screen_size.y
    }
}
