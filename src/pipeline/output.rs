//! Persistent outputs of the light culling pass.
//!
//! - [`TileLightingInfo`]: one `{start, count}` pair per light type per tile
//! - [`GlobalIndexList`]: flat per-type array of light indices, partitioned
//!   into per-tile ranges
//! - [`IndexAllocator`]: per-type "next free slot" counters, reset by the
//!   caller before every dispatch

use super::light_culling::TileGrid;
use crate::scene::{LightType, PerLightType};
use bytemuck::{Pod, Zeroable};
use std::sync::atomic::{AtomicU32, Ordering};

/// Range of one tile's indices inside a global index list.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct LightListRange {
    pub start: u32,
    pub count: u32,
}

impl LightListRange {
    pub fn end(&self) -> u32 {
        self.start + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Light culling tile data: 8 integers, a range per light type.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TileLightingInfo {
    pub point: LightListRange,
    pub spot: LightListRange,
    pub sphere: LightListRange,
    pub tube: LightListRange,
}

impl TileLightingInfo {
    pub fn range(&self, ty: LightType) -> LightListRange {
        match ty {
            LightType::Point => self.point,
            LightType::Spot => self.spot,
            LightType::Sphere => self.sphere,
            LightType::Tube => self.tube,
        }
    }

    pub fn set_range(&mut self, ty: LightType, range: LightListRange) {
        match ty {
            LightType::Point => self.point = range,
            LightType::Spot => self.spot = range,
            LightType::Sphere => self.sphere = range,
            LightType::Tube => self.tube = range,
        }
    }
}

/// Append-only list of light indices shared by every tile.
///
/// Tiles write disjoint ranges concurrently, so each slot is atomic.
#[derive(Debug)]
pub struct GlobalIndexList {
    slots: Box<[AtomicU32]>,
}

impl GlobalIndexList {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn write(&self, slot: u32, light_index: u32) {
        self.slots[slot as usize].store(light_index, Ordering::Relaxed);
    }

    pub fn get(&self, slot: u32) -> u32 {
        self.slots[slot as usize].load(Ordering::Relaxed)
    }

    /// Reads one tile's range.
    pub fn read(&self, range: LightListRange) -> Vec<u32> {
        (range.start..range.end()).map(|slot| self.get(slot)).collect()
    }
}

/// Shared per-type "next free slot" counters.
#[derive(Debug, Default)]
pub struct IndexAllocator {
    next_free: PerLightType<AtomicU32>,
}

impl IndexAllocator {
    /// Reserves `count` consecutive slots and returns the first one.
    pub fn reserve(&self, ty: LightType, count: u32) -> u32 {
        self.next_free[ty].fetch_add(count, Ordering::AcqRel)
    }

    pub fn next_free(&self, ty: LightType) -> u32 {
        self.next_free[ty].load(Ordering::Acquire)
    }

    pub fn reset(&mut self) {
        for counter in self.next_free.0.iter_mut() {
            *counter.get_mut() = 0;
        }
    }
}

/// All buffers written by a dispatch.
#[derive(Debug)]
pub struct LightListBuffers {
    grid: TileGrid,
    pub tile_info: Vec<TileLightingInfo>,
    pub index_lists: PerLightType<GlobalIndexList>,
    pub allocator: IndexAllocator,
}

impl LightListBuffers {
    /// Buffers sized for the worst case: every tile filling every list.
    pub fn new(grid: TileGrid) -> Self {
        let tiles = grid.tile_count() as usize;
        Self {
            grid,
            tile_info: vec![TileLightingInfo::default(); tiles],
            index_lists: PerLightType::from_fn(|ty| {
                GlobalIndexList::with_len(tiles * ty.tile_capacity() as usize)
            }),
            allocator: IndexAllocator::default(),
        }
    }

    pub fn for_screen(width: u32, height: u32) -> Self {
        Self::new(TileGrid::for_screen(width, height))
    }

    pub fn grid(&self) -> TileGrid {
        self.grid
    }

    /// Resets the allocator counters. Must be called before every dispatch.
    pub fn reset_allocator(&mut self) {
        self.allocator.reset();
    }

    pub fn tile(&self, tile_id: u32) -> &TileLightingInfo {
        &self.tile_info[tile_id as usize]
    }

    /// Light indices of one type affecting tile `tile_id`, in list order.
    pub fn tile_light_indices(&self, tile_id: u32, ty: LightType) -> Vec<u32> {
        self.index_lists[ty].read(self.tile(tile_id).range(ty))
    }

    /// Total number of indices of one type written by the last dispatch.
    pub fn total(&self, ty: LightType) -> u32 {
        self.allocator.next_free(ty)
    }
}
