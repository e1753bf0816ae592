//! Light culling error types.

use crate::scene::LightType;
use thiserror::Error;

/// Errors reported before a dispatch starts.
///
/// The kernel itself never fails: capacity overflow and empty tiles are
/// well-defined data effects. These variants cover caller contract
/// violations that would otherwise lead to out-of-range writes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CullingError {
    #[error("Invalid screen size {width}x{height}")]
    InvalidScreenSize { width: u32, height: u32 },
    #[error("Depth buffer holds {actual} texels, expected {expected}")]
    DepthLengthMismatch { expected: usize, actual: usize },
    #[error("Depth buffer is {depth_width}x{depth_height} but the frame is {width}x{height}")]
    DepthSizeMismatch {
        depth_width: u32,
        depth_height: u32,
        width: u32,
        height: u32,
    },
    #[error("Light list buffers cover {buffer_tiles_x}x{buffer_tiles_y} tiles, the frame covers {tiles_x}x{tiles_y}")]
    GridMismatch {
        buffer_tiles_x: u32,
        buffer_tiles_y: u32,
        tiles_x: u32,
        tiles_y: u32,
    },
    #[error("Tile lighting info holds {actual} tiles, dispatch covers {expected}")]
    TileInfoTooSmall { expected: usize, actual: usize },
    #[error("{light_type} index list holds {available} slots, dispatch may need {required}")]
    IndexListTooSmall {
        light_type: LightType,
        required: u64,
        available: usize,
    },
    #[error("{count} {light_type} lights cannot be addressed by 32-bit indices")]
    TooManyLights { light_type: LightType, count: usize },
    #[error("Near plane choice {0} is outside [0, 1]")]
    InvalidNearPlaneChoice(f32),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type CullingResult<T> = Result<T, CullingError>;

impl From<rayon::ThreadPoolBuildError> for CullingError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        CullingError::ThreadPool(err.to_string())
    }
}
