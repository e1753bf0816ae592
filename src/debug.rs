//! Tile visualisation for debugging light lists.

use crate::pipeline::{LightListBuffers, TileGrid};
use crate::scene::LightType;
use glam::UVec2;

const RAMP: &[u8] = b" .:-=+*#%@";

/// Per-tile light counts of one light type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileHeatmap {
    grid: TileGrid,
    light_type: LightType,
    counts: Vec<u32>,
}

impl TileHeatmap {
    pub fn from_buffers(buffers: &LightListBuffers, light_type: LightType) -> Self {
        let grid = buffers.grid();
        let counts = buffers.tile_info[..grid.tile_count() as usize]
            .iter()
            .map(|info| info.range(light_type).count)
            .collect();
        Self {
            grid,
            light_type,
            counts,
        }
    }

    pub fn count(&self, tile: UVec2) -> u32 {
        self.counts[self.grid.tile_id(tile) as usize]
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Tiles whose list is full and may be missing lights.
    pub fn saturated_tiles(&self) -> usize {
        let capacity = self.light_type.tile_capacity();
        self.counts.iter().filter(|&&c| c >= capacity).count()
    }

    /// One character per tile, denser for more lights relative to the
    /// busiest tile. Saturated tiles are drawn as `!`.
    pub fn to_ascii(&self) -> String {
        let max = self.max().max(1);
        let capacity = self.light_type.tile_capacity();
        let mut out = String::with_capacity(self.counts.len() + self.grid.tiles_y as usize);
        for row in self.counts.chunks(self.grid.tiles_x as usize) {
            for &count in row {
                let c = if count >= capacity {
                    '!'
                } else {
                    let level = (count as usize * (RAMP.len() - 1)).div_ceil(max as usize);
                    RAMP[level] as char
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }

    /// Short text summary.
    pub fn summary(&self) -> String {
        let total: u64 = self.counts.iter().map(|&c| u64::from(c)).sum();
        format!(
            "{} lights: {} tile entries, max {} per tile, {} saturated tiles",
            self.light_type,
            total,
            self.max(),
            self.saturated_tiles()
        )
    }
}
