//! Execution configuration for the light culler.

/// Pixels per tile edge. Tiles are square and fixed-size.
pub const TILE_SIZE: u32 = 16;

/// Logical workers per tile: one per pixel of the tile.
pub const WORKERS_PER_TILE: u32 = TILE_SIZE * TILE_SIZE;

/// Configuration for [`LightCuller`](crate::LightCuller).
///
/// Use [`Default::default()`] for sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CullingConfig {
    /// Number of OS threads in a dedicated worker pool. `None` runs on the
    /// global rayon pool. Default: `None`.
    pub num_threads: Option<usize>,
    /// Minimum number of logical tile workers executed by one job. Keeps
    /// job overhead from dominating the short per-worker phases. Default: 32.
    pub min_workers_per_job: usize,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_workers_per_job: 32,
        }
    }
}

impl CullingConfig {
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads.max(1));
        self
    }

    pub fn with_min_workers_per_job(mut self, min_workers_per_job: usize) -> Self {
        self.min_workers_per_job = min_workers_per_job;
        self
    }

    pub(crate) fn effective_min_workers(&self) -> usize {
        self.min_workers_per_job.clamp(1, WORKERS_PER_TILE as usize)
    }
}
