//! Tile-local scratch state shared by the workers of one tile.

use super::depth::DepthAccumulator;
use crate::scene::{LightType, PerLightType};
use std::sync::atomic::{AtomicU32, Ordering};

/// Bounded multi-producer append list.
///
/// Producers reserve a slot with an atomic increment and write only when
/// the slot is below capacity; anything past capacity is dropped. The raw
/// counter keeps counting so drops can be reported.
#[derive(Debug)]
pub struct ScratchList {
    slots: Box<[AtomicU32]>,
    attempted: AtomicU32,
    /// Offset reserved in the global index list, set by the allocator.
    pub(crate) global_offset: u32,
}

impl ScratchList {
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            slots: (0..capacity).map(|_| AtomicU32::new(0)).collect(),
            attempted: AtomicU32::new(0),
            global_offset: 0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Appends `light_index`. Returns `false` when the list was full.
    pub fn push(&self, light_index: u32) -> bool {
        let slot = self.attempted.fetch_add(1, Ordering::Relaxed) as usize;
        match self.slots.get(slot) {
            Some(cell) => {
                cell.store(light_index, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Number of indices actually stored, never above capacity.
    pub fn len(&self) -> u32 {
        self.attempted.load(Ordering::Relaxed).min(self.capacity())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of pushes rejected because the list was full.
    pub fn dropped(&self) -> u32 {
        self.attempted
            .load(Ordering::Relaxed)
            .saturating_sub(self.capacity())
    }

    pub fn get(&self, slot: u32) -> u32 {
        self.slots[slot as usize].load(Ordering::Relaxed)
    }

    pub fn global_offset(&self) -> u32 {
        self.global_offset
    }

    /// Snapshot of the stored indices, in slot order.
    pub fn to_vec(&self) -> Vec<u32> {
        (0..self.len()).map(|slot| self.get(slot)).collect()
    }

    fn reset(&mut self) {
        *self.attempted.get_mut() = 0;
        self.global_offset = 0;
    }
}

/// Everything one tile's workers share during a dispatch.
#[derive(Debug)]
pub struct TileScratch {
    pub depth: DepthAccumulator,
    pub lists: PerLightType<ScratchList>,
}

impl Default for TileScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl TileScratch {
    pub fn new() -> Self {
        Self {
            depth: DepthAccumulator::default(),
            lists: PerLightType::from_fn(|ty| ScratchList::with_capacity(ty.tile_capacity())),
        }
    }

    /// Clears counters and depth accumulators before the next tile.
    /// Slot contents are left as is; only slots below the count are read.
    pub fn reset(&mut self) {
        self.depth.reset();
        for list in self.lists.0.iter_mut() {
            list.reset();
        }
    }

    pub fn list(&self, ty: LightType) -> &ScratchList {
        &self.lists[ty]
    }
}
