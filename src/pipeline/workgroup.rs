//! Cooperative worker groups.
//!
//! A tile is processed by a fixed group of logical workers, one per pixel.
//! Each call to [`WorkGroup::run`] is one phase: every worker runs the
//! closure once and the call returns only after all of them finished, which
//! is the barrier between phases. Work done by the designated worker between
//! two phases runs on the calling thread while no other worker is active.

use crate::config::TILE_SIZE;
use glam::UVec2;
use rayon::prelude::*;

/// Index of a logical worker inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// Position of the worker inside the 16x16 tile.
    pub fn local_position(self) -> UVec2 {
        UVec2::new(self.0 % TILE_SIZE, self.0 / TILE_SIZE)
    }

    /// Indices `id, id + stride, id + 2 * stride, ...` below `len`.
    pub fn strided(self, len: u32, stride: u32) -> impl Iterator<Item = u32> {
        (self.0..len).step_by(stride as usize)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WorkGroup {
    size: u32,
    min_workers_per_job: usize,
}

impl WorkGroup {
    pub fn new(size: u32, min_workers_per_job: usize) -> Self {
        Self {
            size: size.max(1),
            min_workers_per_job: min_workers_per_job.max(1),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Runs one phase on every worker and waits for all of them.
    pub fn run<F>(&self, f: F)
    where
        F: Fn(WorkerId) + Sync + Send,
    {
        (0..self.size)
            .into_par_iter()
            .with_min_len(self.min_workers_per_job)
            .for_each(|id| f(WorkerId(id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn every_worker_runs_once_per_phase() {
        let group = WorkGroup::new(256, 16);
        let hits: Vec<AtomicU32> = (0..256).map(|_| AtomicU32::new(0)).collect();
        group.run(|id| {
            hits[id.0 as usize].fetch_add(1, Ordering::Relaxed);
        });
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn phases_are_ordered() {
        let group = WorkGroup::new(64, 1);
        let first = AtomicU32::new(0);
        group.run(|_| {
            first.fetch_add(1, Ordering::Relaxed);
        });
        let seen_by_second = AtomicU32::new(u32::MAX);
        group.run(|_| {
            seen_by_second.fetch_min(first.load(Ordering::Relaxed), Ordering::Relaxed);
        });
        assert_eq!(seen_by_second.load(Ordering::Relaxed), 64);
    }

    #[test]
    fn strided_indices_partition_range() {
        let mut all: Vec<u32> = (0..4)
            .flat_map(|w| WorkerId(w).strided(10, 4).collect::<Vec<_>>())
            .collect();
        assert_eq!(WorkerId(1).strided(10, 4).collect::<Vec<_>>(), vec![1, 5, 9]);
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
        assert_eq!(WorkerId(12).strided(10, 4).count(), 0);
    }

    #[test]
    fn local_position() {
        assert_eq!(WorkerId(0).local_position(), UVec2::new(0, 0));
        assert_eq!(WorkerId(17).local_position(), UVec2::new(1, 1));
        assert_eq!(WorkerId(255).local_position(), UVec2::new(15, 15));
    }
}
