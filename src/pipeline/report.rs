//! Per-dispatch statistics.

use crate::scene::{LightType, PerLightType};

/// What a single tile contributed to a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileReport {
    pub background: bool,
    pub counts: PerLightType<u32>,
    pub dropped: PerLightType<u32>,
}

/// Summary of one dispatch, aggregated over all tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullingReport {
    pub tiles: u32,
    /// Tiles whose depth samples were all background.
    pub background_tiles: u32,
    /// Indices written per type. Equals the allocator totals when the
    /// allocator started at zero.
    pub listed: PerLightType<u32>,
    /// Tiles that hit the scratch capacity of a type.
    pub saturated_tiles: PerLightType<u32>,
    /// Indices that passed culling but did not fit.
    pub dropped: PerLightType<u32>,
}

impl CullingReport {
    pub fn add_tile(mut self, tile: &TileReport) -> Self {
        self.tiles += 1;
        self.background_tiles += tile.background as u32;
        for ty in LightType::ALL {
            self.listed[ty] += tile.counts[ty];
            self.dropped[ty] += tile.dropped[ty];
            self.saturated_tiles[ty] += (tile.dropped[ty] > 0) as u32;
        }
        self
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.tiles += other.tiles;
        self.background_tiles += other.background_tiles;
        for ty in LightType::ALL {
            self.listed[ty] += other.listed[ty];
            self.dropped[ty] += other.dropped[ty];
            self.saturated_tiles[ty] += other.saturated_tiles[ty];
        }
        self
    }

    pub fn has_overflow(&self) -> bool {
        self.dropped.iter().any(|(_, &dropped)| dropped > 0)
    }
}
