//! Tiled light culling pipeline
//!
//! The kernel stages, in dispatch order:
//! 1. [`depth`] - per-tile min/max depth reduction
//! 2. [`frustum`] - tile frustum from screen corners and depth range
//! 3. [`classify`] - sphere vs frustum test shared by every light type
//! 4. [`light_culling`] - culling loop, global allocation and scatter
//!
//! [`output`] holds the buffers the shading pass consumes.

pub mod classify;
pub mod depth;
pub mod frustum;
pub mod light_culling;
pub mod output;
pub mod report;
pub mod scratch;
pub mod workgroup;

pub use classify::{classify, Containment};
pub use depth::{DepthAccumulator, DepthRange, DepthView};
pub use frustum::{clip_to_view, screen_to_view, Frustum, Plane, TileFrustum};
pub use light_culling::{LightCuller, TileGrid};
pub use output::{GlobalIndexList, IndexAllocator, LightListBuffers, LightListRange, TileLightingInfo};
pub use report::{CullingReport, TileReport};
pub use scratch::{ScratchList, TileScratch};
pub use workgroup::{WorkGroup, WorkerId};
