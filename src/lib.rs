//! # RedLilium Light Culling
//!
//! Tiled Forward+ light list generation. Once per frame the screen is split
//! into 16x16 pixel tiles and every tile gets a compact list of the lights
//! that can affect it, one list per light type.
//!
//! ## Overview
//!
//! - [`LightCuller`] - runs the culling kernel over every tile
//! - [`LightListBuffers`] - per-tile ranges, global index lists and the
//!   shared allocator they are reserved from
//! - [`scene`] - light records, camera and frame uniforms
//! - [`debug`] - tile heatmaps of the produced lists
//!
//! ## Example
//!
//! ```
//! use redlilium_light_culling::{
//!     Camera, CullingConfig, DepthView, LightCuller, LightListBuffers, LightType,
//!     PointLightData, SceneLights,
//! };
//! use glam::Vec3;
//!
//! let (width, height) = (64, 64);
//! let camera = Camera::default();
//! let depth = vec![camera.depth_for_view_z(10.0); (width * height) as usize];
//! let points = [PointLightData::new(Vec3::new(0.0, 0.0, 10.0), 1.0)];
//!
//! let culler = LightCuller::new(CullingConfig::default()).unwrap();
//! let mut buffers = LightListBuffers::for_screen(width, height);
//! buffers.reset_allocator();
//! let report = culler
//!     .dispatch(
//!         &camera.frame_uniforms(width, height, 0.0),
//!         &DepthView::new(width, height, &depth).unwrap(),
//!         &SceneLights::new(&points, &[], &[], &[]),
//!         &mut buffers,
//!     )
//!     .unwrap();
//! assert!(report.listed[LightType::Point] > 0);
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod pipeline;
pub mod scene;

pub use config::{CullingConfig, TILE_SIZE, WORKERS_PER_TILE};
pub use debug::TileHeatmap;
pub use error::{CullingError, CullingResult};
pub use pipeline::{
    CullingReport, DepthView, LightCuller, LightListBuffers, LightListRange, TileGrid,
    TileLightingInfo,
};
pub use scene::{
    Camera, FrameUniforms, LightType, PerLightType, PointLightData, Projection, SceneLights,
    SphereLightData, SpotLightData, TubeLightData,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version. Call once after the logger is installed.
pub fn init() {
    log::info!("RedLilium Light Culling v{} initialized", VERSION);
}
