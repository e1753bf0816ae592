//! Light culling pass for Forward+
//!
//! One group of [`WORKERS_PER_TILE`] workers per 16x16 screen tile. A tile
//! goes through four phases separated by barriers:
//!
//! 1. depth reduction over the tile's pixels
//! 2. frustum construction and per-type culling into tile scratch lists
//! 3. reservation of the tile's ranges in the global index lists
//! 4. scatter of the scratch lists into the reserved ranges
//!
//! Tiles only contend on the [`IndexAllocator`] counters; everything else
//! they write is disjoint.

use super::classify::classify;
use super::depth::DepthView;
use super::frustum::TileFrustum;
use super::output::{GlobalIndexList, IndexAllocator, LightListBuffers, LightListRange, TileLightingInfo};
use super::report::{CullingReport, TileReport};
use super::scratch::TileScratch;
use super::workgroup::{WorkGroup, WorkerId};
use crate::config::{CullingConfig, TILE_SIZE, WORKERS_PER_TILE};
use crate::error::{CullingError, CullingResult};
use crate::scene::{FrameUniforms, LightBounds, LightType, PerLightType, SceneLights};
use glam::UVec2;
use rayon::prelude::*;

/// Screen partition into tiles. Tile ids are row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub tiles_x: u32,
    pub tiles_y: u32,
}

impl TileGrid {
    pub fn tile_count_for(screen_width: u32, screen_height: u32) -> (u32, u32) {
        let tiles_x = screen_width.div_ceil(TILE_SIZE);
        let tiles_y = screen_height.div_ceil(TILE_SIZE);
        (tiles_x, tiles_y)
    }

    pub fn for_screen(screen_width: u32, screen_height: u32) -> Self {
        let (tiles_x, tiles_y) = Self::tile_count_for(screen_width, screen_height);
        Self { tiles_x, tiles_y }
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles_x * self.tiles_y
    }

    pub fn tile_id(&self, tile: UVec2) -> u32 {
        tile.x + tile.y * self.tiles_x
    }

    pub fn tile_coords(&self, tile_id: u32) -> UVec2 {
        UVec2::new(tile_id % self.tiles_x, tile_id / self.tiles_x)
    }

    /// Tile containing the given pixel.
    pub fn tile_at_pixel(&self, x: u32, y: u32) -> UVec2 {
        UVec2::new(x / TILE_SIZE, y / TILE_SIZE)
    }
}

/// Builds per-tile light lists from a depth buffer and the scene lights.
pub struct LightCuller {
    pool: Option<rayon::ThreadPool>,
    group: WorkGroup,
}

impl LightCuller {
    pub fn new(config: CullingConfig) -> CullingResult<Self> {
        let pool = match config.num_threads {
            Some(num_threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .thread_name(|i| format!("light-cull-{i}"))
                    .build()?,
            ),
            None => None,
        };
        let group = WorkGroup::new(WORKERS_PER_TILE, config.effective_min_workers());
        log::debug!(
            "Light culler created ({} threads, {} workers per job)",
            pool.as_ref()
                .map_or_else(rayon::current_num_threads, |p| p.current_num_threads()),
            config.effective_min_workers()
        );
        Ok(Self { pool, group })
    }

    pub fn name(&self) -> &str {
        "Light Culling"
    }

    /// Runs the culling kernel over every tile of the frame.
    ///
    /// `buffers.allocator` must have been reset since the previous dispatch;
    /// the kernel only ever adds to it. Inputs are validated before any tile
    /// runs, so on error the buffers are untouched.
    pub fn dispatch(
        &self,
        frame: &FrameUniforms,
        depth: &DepthView<'_>,
        lights: &SceneLights<'_>,
        buffers: &mut LightListBuffers,
    ) -> CullingResult<CullingReport> {
        let grid = validate(frame, depth, lights, buffers)?;

        let report = match &self.pool {
            Some(pool) => pool.install(|| self.run(grid, frame, depth, lights, buffers)),
            None => self.run(grid, frame, depth, lights, buffers),
        };

        log::debug!(
            "{}: {} tiles ({} background), lists point={} spot={} sphere={} tube={}",
            self.name(),
            report.tiles,
            report.background_tiles,
            report.listed[LightType::Point],
            report.listed[LightType::Spot],
            report.listed[LightType::Sphere],
            report.listed[LightType::Tube],
        );
        if report.has_overflow() {
            for (ty, &dropped) in report.dropped.iter().filter(|(_, dropped)| **dropped > 0) {
                log::warn!(
                    "{}: {} tiles exceeded the {} light capacity of {}, {} indices dropped",
                    self.name(),
                    report.saturated_tiles[ty],
                    ty,
                    ty.tile_capacity(),
                    dropped
                );
            }
        }

        Ok(report)
    }

    fn run(
        &self,
        grid: TileGrid,
        frame: &FrameUniforms,
        depth: &DepthView<'_>,
        lights: &SceneLights<'_>,
        buffers: &mut LightListBuffers,
    ) -> CullingReport {
        let LightListBuffers {
            tile_info,
            index_lists,
            allocator,
            ..
        } = buffers;

        let kernel = TileKernel {
            frame,
            depth: *depth,
            lights: *lights,
            index_lists,
            allocator,
            group: self.group,
        };

        tile_info[..grid.tile_count() as usize]
            .par_iter_mut()
            .enumerate()
            .map_init(TileScratch::new, |scratch, (tile_id, info)| {
                kernel.execute(grid.tile_coords(tile_id as u32), scratch, info)
            })
            .fold(CullingReport::default, |report, tile| report.add_tile(&tile))
            .reduce(CullingReport::default, CullingReport::merge)
    }
}

fn validate(
    frame: &FrameUniforms,
    depth: &DepthView<'_>,
    lights: &SceneLights<'_>,
    buffers: &LightListBuffers,
) -> CullingResult<TileGrid> {
    let (width, height) = (frame.width(), frame.height());
    if width == 0 || height == 0 {
        return Err(CullingError::InvalidScreenSize { width, height });
    }
    if !(0.0..=1.0).contains(&frame.near_plane_choice) {
        return Err(CullingError::InvalidNearPlaneChoice(frame.near_plane_choice));
    }
    if depth.width() != width || depth.height() != height {
        return Err(CullingError::DepthSizeMismatch {
            depth_width: depth.width(),
            depth_height: depth.height(),
            width,
            height,
        });
    }

    let grid = TileGrid::for_screen(width, height);
    // Read-back and heatmaps address tiles through the buffers' grid.
    let buffer_grid = buffers.grid();
    if buffer_grid != grid {
        return Err(CullingError::GridMismatch {
            buffer_tiles_x: buffer_grid.tiles_x,
            buffer_tiles_y: buffer_grid.tiles_y,
            tiles_x: grid.tiles_x,
            tiles_y: grid.tiles_y,
        });
    }
    let tiles = grid.tile_count() as usize;
    if buffers.tile_info.len() < tiles {
        return Err(CullingError::TileInfoTooSmall {
            expected: tiles,
            actual: buffers.tile_info.len(),
        });
    }

    for (light_type, &count) in lights.counts().iter() {
        if count > u32::MAX as usize {
            return Err(CullingError::TooManyLights { light_type, count });
        }
    }

    // Every tile may reserve a full scratch list on top of what is already allocated.
    for light_type in LightType::ALL {
        let required = u64::from(buffers.allocator.next_free(light_type))
            + tiles as u64 * u64::from(light_type.tile_capacity());
        let available = buffers.index_lists[light_type].len();
        if required > available as u64 {
            return Err(CullingError::IndexListTooSmall {
                light_type,
                required,
                available,
            });
        }
    }

    Ok(grid)
}

/// Shared, read-mostly state of one dispatch.
struct TileKernel<'a> {
    frame: &'a FrameUniforms,
    depth: DepthView<'a>,
    lights: SceneLights<'a>,
    index_lists: &'a PerLightType<GlobalIndexList>,
    allocator: &'a IndexAllocator,
    group: WorkGroup,
}

impl TileKernel<'_> {
    fn execute(&self, tile: UVec2, scratch: &mut TileScratch, info: &mut TileLightingInfo) -> TileReport {
        scratch.reset();
        let shared = &*scratch;

        // Depth
        let pixel_origin = tile * TILE_SIZE;
        self.group.run(|worker| {
            let pixel = pixel_origin + worker.local_position();
            shared.depth.accumulate(self.depth.load(pixel.x, pixel.y));
        });

        let depth_range = shared.depth.range();
        let frustum = TileFrustum::build(tile, self.frame, depth_range);

        // Light culling
        self.group.run(|worker| {
            self.cull(worker, self.lights.point, &frustum, shared);
            self.cull(worker, self.lights.spot, &frustum, shared);
            self.cull(worker, self.lights.sphere, &frustum, shared);
            self.cull(worker, self.lights.tube, &frustum, shared);
        });

        // Reserve our ranges in the global index lists
        let mut report = TileReport {
            background: depth_range.is_background(),
            ..Default::default()
        };
        for ty in LightType::ALL {
            let list = &mut scratch.lists[ty];
            let count = list.len();
            let start = self.allocator.reserve(ty, count);
            list.global_offset = start;
            info.set_range(ty, LightListRange { start, count });
            report.counts[ty] = count;
            report.dropped[ty] = list.dropped();
        }

        // Push the indices into the global index lists
        let shared = &*scratch;
        self.group.run(|worker| {
            for ty in LightType::ALL {
                let list = shared.list(ty);
                let global = &self.index_lists[ty];
                for slot in worker.strided(list.len(), self.group.size()) {
                    global.write(list.global_offset() + slot, list.get(slot));
                }
            }
        });

        report
    }

    fn cull<L: LightBounds>(&self, worker: WorkerId, lights: &[L], frustum: &TileFrustum, scratch: &TileScratch) {
        let list = scratch.list(L::TYPE);
        for index in worker.strided(lights.len() as u32, self.group.size()) {
            let sphere = lights[index as usize].bounding_sphere();
            let center = self.frame.view.transform_point3(sphere.center);
            if classify(center, sphere.radius, frustum).is_inside() {
                list.push(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_count_rounds_up() {
        assert_eq!(TileGrid::tile_count_for(1920, 1080), (120, 68));
        assert_eq!(TileGrid::tile_count_for(16, 16), (1, 1));
        assert_eq!(TileGrid::tile_count_for(17, 1), (2, 1));
    }

    #[test]
    fn tile_ids_are_row_major() {
        let grid = TileGrid::for_screen(64, 48);
        assert_eq!(grid.tile_count(), 12);
        assert_eq!(grid.tile_id(UVec2::new(3, 1)), 7);
        assert_eq!(grid.tile_coords(7), UVec2::new(3, 1));
        assert_eq!(grid.tile_at_pixel(63, 47), UVec2::new(3, 2));
    }
}
