//! Deterministic synthetic scenes for the CLI and benchmarks.
//!
//! Lights are scattered through the camera's view volume with an R3
//! low-discrepancy sequence and the depth buffer is a procedural floor with
//! a sky band and a few pillars.

use super::camera::{Camera, FrameUniforms, Projection};
use super::light::{
    PerLightType, PointLightData, SceneLights, SphereLightData, SpotLightData, TubeLightData,
};
use crate::error::CullingResult;
use crate::pipeline::DepthView;
use glam::{Vec2, Vec3};

#[derive(Debug, Clone)]
pub struct SyntheticSceneParams {
    pub width: u32,
    pub height: u32,
    pub light_counts: PerLightType<u32>,
    pub light_radius: f32,
    /// Offset into the placement sequence; different values give different scenes.
    pub seed: u32,
}

impl Default for SyntheticSceneParams {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            light_counts: PerLightType([1024, 256, 256, 128]),
            light_radius: 2.0,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntheticScene {
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
    pub depth: Vec<f32>,
    pub point: Vec<PointLightData>,
    pub spot: Vec<SpotLightData>,
    pub sphere: Vec<SphereLightData>,
    pub tube: Vec<TubeLightData>,
}

const NEAR_Z: f32 = 2.0;
const FAR_Z: f32 = 60.0;

impl SyntheticScene {
    pub fn generate(params: &SyntheticSceneParams) -> Self {
        let aspect = params.width as f32 / params.height.max(1) as f32;
        let camera = Camera::default().with_projection(Projection::perspective(60.0, aspect, 0.1, 200.0));

        let mut sequence = R3Sequence::new(params.seed);
        let mut place = || view_volume_point(&camera, sequence.next_point());
        let radius = params.light_radius;
        let counts = &params.light_counts;

        let point = (0..counts.0[0])
            .map(|i| {
                let hue = (i % 3) as f32 / 2.0;
                PointLightData::new(place(), radius).with_color(Vec3::new(1.0, hue, 1.0 - hue), 4.0)
            })
            .collect();
        let spot = (0..counts.0[1])
            .map(|_| SpotLightData::new(place(), Vec3::NEG_Y, radius).with_angles(0.4, 0.6))
            .collect();
        let sphere = (0..counts.0[2])
            .map(|_| SphereLightData::new(place(), radius * 0.1, radius))
            .collect();
        let tube = (0..counts.0[3])
            .map(|_| {
                let center = place();
                let half = Vec3::new(radius * 0.5, 0.0, 0.0);
                TubeLightData::new(center - half, center + half, radius * 0.05, radius)
            })
            .collect();

        Self {
            depth: procedural_depth(&camera, params.width, params.height),
            camera,
            width: params.width,
            height: params.height,
            point,
            spot,
            sphere,
            tube,
        }
    }

    pub fn depth_view(&self) -> CullingResult<DepthView<'_>> {
        DepthView::new(self.width, self.height, &self.depth)
    }

    pub fn lights(&self) -> SceneLights<'_> {
        SceneLights::new(&self.point, &self.spot, &self.sphere, &self.tube)
    }

    pub fn frame_uniforms(&self, near_plane_choice: f32) -> FrameUniforms {
        self.camera
            .frame_uniforms(self.width, self.height, near_plane_choice)
    }
}

/// Maps a unit-cube sample to a world-space point inside the view volume
/// between [`NEAR_Z`] and [`FAR_Z`].
fn view_volume_point(camera: &Camera, sample: Vec3) -> Vec3 {
    let projection = camera.projection;
    let half_height = (projection.fov_y * 0.5).tan();
    let half_extent = Vec2::new(half_height * projection.aspect, half_height);
    let z = NEAR_Z + sample.z * (FAR_Z - NEAR_Z);
    let xy = (sample.truncate() * 2.0 - 1.0) * half_extent * z;
    camera.position + xy.extend(z)
}

fn procedural_depth(camera: &Camera, width: u32, height: u32) -> Vec<f32> {
    let horizon = height / 4;
    let mut depth = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            if y < horizon {
                depth.push(0.0);
                continue;
            }
            // Floor recedes toward the horizon.
            let t = (y - horizon) as f32 / (height - horizon).max(1) as f32;
            let mut view_z = FAR_Z - t * (FAR_Z - NEAR_Z * 2.0);
            // Pillars every eighth of the screen.
            if (x * 8 / width.max(1)) % 2 == 1 && y < height * 3 / 4 {
                view_z = view_z.min(12.0 + (x * 8 / width.max(1)) as f32 * 2.0);
            }
            depth.push(camera.depth_for_view_z(view_z));
        }
    }
    depth
}

/// Additive recurrence based on the generalised golden ratio.
struct R3Sequence {
    index: u32,
}

impl R3Sequence {
    const ALPHA: [f32; 3] = [0.819_172_5, 0.671_043_5, 0.549_700_5];

    fn new(seed: u32) -> Self {
        Self { index: seed }
    }

    fn next_point(&mut self) -> Vec3 {
        self.index = self.index.wrapping_add(1);
        let n = self.index as f64;
        let component = |alpha: f32| (0.5 + alpha as f64 * n).fract() as f32;
        Vec3::new(
            component(Self::ALPHA[0]),
            component(Self::ALPHA[1]),
            component(Self::ALPHA[2]),
        )
    }
}
