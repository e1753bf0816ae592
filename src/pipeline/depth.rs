//! Per-tile depth range reduction.
//!
//! Depth samples are non-negative floats, so their IEEE bit patterns order
//! the same way as the values and can be reduced with integer atomics.
//! A sample of exactly `0.0` means "no geometry" and is skipped.

use crate::error::{CullingError, CullingResult};
use std::sync::atomic::{AtomicU32, Ordering};

/// Initial minimum: bit pattern of `f32::MAX`.
pub const MIN_DEPTH_SENTINEL: u32 = 0x7F7F_FFFF;
/// Initial maximum: bit pattern of `0.0`.
pub const MAX_DEPTH_SENTINEL: u32 = 0;

/// Read-only depth buffer, one `f32` per pixel in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct DepthView<'a> {
    width: u32,
    height: u32,
    texels: &'a [f32],
}

impl<'a> DepthView<'a> {
    pub fn new(width: u32, height: u32, texels: &'a [f32]) -> CullingResult<Self> {
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(CullingError::DepthLengthMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self { width, height, texels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Loads one texel. Pixels outside the buffer read as background.
    pub fn load(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.texels[y as usize * self.width as usize + x as usize]
    }
}

/// Shared min/max accumulators for one tile.
#[derive(Debug)]
pub struct DepthAccumulator {
    min_bits: AtomicU32,
    max_bits: AtomicU32,
}

impl Default for DepthAccumulator {
    fn default() -> Self {
        Self {
            min_bits: AtomicU32::new(MIN_DEPTH_SENTINEL),
            max_bits: AtomicU32::new(MAX_DEPTH_SENTINEL),
        }
    }
}

impl DepthAccumulator {
    pub fn reset(&mut self) {
        *self.min_bits.get_mut() = MIN_DEPTH_SENTINEL;
        *self.max_bits.get_mut() = MAX_DEPTH_SENTINEL;
    }

    /// Folds one depth sample into the tile range. Called concurrently by
    /// every worker of the tile. Samples that are not positive and finite
    /// (zero, negative, NaN, infinite) count as background.
    pub fn accumulate(&self, depth: f32) {
        if !(depth > 0.0 && depth.is_finite()) {
            return;
        }
        let bits = depth.to_bits();
        self.max_bits.fetch_max(bits, Ordering::Relaxed);
        self.min_bits.fetch_min(bits, Ordering::Relaxed);
    }

    /// Reads the reduced range. Only meaningful once every worker has
    /// finished accumulating.
    pub fn range(&self) -> DepthRange {
        DepthRange {
            min_bits: self.min_bits.load(Ordering::Relaxed),
            max_bits: self.max_bits.load(Ordering::Relaxed),
        }
    }
}

/// Reduced depth range of a tile, kept as bit patterns so the untouched
/// sentinels stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRange {
    pub min_bits: u32,
    pub max_bits: u32,
}

impl DepthRange {
    /// Range of a tile whose samples were all background.
    pub const BACKGROUND: DepthRange = DepthRange {
        min_bits: MIN_DEPTH_SENTINEL,
        max_bits: MAX_DEPTH_SENTINEL,
    };

    pub fn from_depths(min: f32, max: f32) -> Self {
        Self {
            min_bits: min.to_bits(),
            max_bits: max.to_bits(),
        }
    }

    pub fn min_depth(&self) -> f32 {
        f32::from_bits(self.min_bits)
    }

    pub fn max_depth(&self) -> f32 {
        f32::from_bits(self.max_bits)
    }

    pub fn is_background(&self) -> bool {
        *self == Self::BACKGROUND
    }
}
