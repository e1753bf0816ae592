//! Common utilities for light culling integration tests.
//!
//! Scenes are built directly in view space: the test camera sits at the
//! origin looking down +Z, so world and view coordinates coincide.

#![allow(dead_code)]

use glam::{UVec2, Vec2, Vec3};

use redlilium_light_culling::pipeline::{screen_to_view, DepthRange, TileFrustum};
use redlilium_light_culling::{
    Camera, CullingConfig, CullingReport, DepthView, FrameUniforms, LightCuller, LightListBuffers,
    Projection, SceneLights, TILE_SIZE,
};

pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// 60 degree camera at the origin with the given screen aspect.
pub fn test_camera(width: u32, height: u32) -> Camera {
    Camera::default().with_projection(Projection::perspective(
        60.0,
        width as f32 / height as f32,
        NEAR,
        FAR,
    ))
}

/// Depth buffer where every pixel sees a surface at `view_z`.
pub fn uniform_depth(camera: &Camera, width: u32, height: u32, view_z: f32) -> Vec<f32> {
    vec![camera.depth_for_view_z(view_z); (width * height) as usize]
}

/// Marks every pixel of `tile` as background.
pub fn clear_tile(depth: &mut [f32], width: u32, height: u32, tile: UVec2) {
    for y in tile.y * TILE_SIZE..((tile.y + 1) * TILE_SIZE).min(height) {
        for x in tile.x * TILE_SIZE..((tile.x + 1) * TILE_SIZE).min(width) {
            depth[(y * width + x) as usize] = 0.0;
        }
    }
}

/// View-space point at depth `view_z` on the ray through a screen position.
pub fn point_on_pixel_ray(frame: &FrameUniforms, position_ss: Vec2, view_z: f32) -> Vec3 {
    let far = screen_to_view(&frame.inverse_projection, frame.screen_size, position_ss);
    far * (view_z / far.z)
}

/// Depth range of a tile computed on the CPU, skipping background samples.
pub fn reference_depth_range(depth: &[f32], width: u32, height: u32, tile: UVec2) -> DepthRange {
    let mut range = DepthRange::BACKGROUND;
    for y in tile.y * TILE_SIZE..((tile.y + 1) * TILE_SIZE).min(height) {
        for x in tile.x * TILE_SIZE..((tile.x + 1) * TILE_SIZE).min(width) {
            let d = depth[(y * width + x) as usize];
            if d > 0.0 {
                range.min_bits = range.min_bits.min(d.to_bits());
                range.max_bits = range.max_bits.max(d.to_bits());
            }
        }
    }
    range
}

/// Reference frustum of a tile, built from [`reference_depth_range`].
pub fn reference_frustum(frame: &FrameUniforms, depth: &[f32], tile: UVec2) -> TileFrustum {
    let range = reference_depth_range(depth, frame.width(), frame.height(), tile);
    TileFrustum::build(tile, frame, range)
}

/// Routes library logs to the test output. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs one dispatch on freshly allocated worst-case buffers.
pub fn dispatch_once(
    config: CullingConfig,
    frame: &FrameUniforms,
    depth: &[f32],
    lights: &SceneLights<'_>,
) -> (CullingReport, LightListBuffers) {
    init_logging();
    let culler = LightCuller::new(config).expect("culler");
    let view = DepthView::new(frame.width(), frame.height(), depth).expect("depth view");
    let mut buffers = LightListBuffers::for_screen(frame.width(), frame.height());
    buffers.reset_allocator();
    let report = culler
        .dispatch(frame, &view, lights, &mut buffers)
        .expect("dispatch");
    (report, buffers)
}

pub fn sorted(mut indices: Vec<u32>) -> Vec<u32> {
    indices.sort_unstable();
    indices
}
