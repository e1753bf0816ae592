//! Runs the light culling kernel over a synthetic scene and reports the
//! resulting per-tile light lists.
//!
//! ```bash
//! # Default 1280x720 scene
//! tile-cull
//!
//! # Dense point lights, four threads, point light heatmap
//! RUST_LOG=debug tile-cull --point 8192 --threads 4 --heatmap point
//! ```

use std::time::Instant;

use clap::Parser;
use redlilium_light_culling::scene::{SyntheticScene, SyntheticSceneParams};
use redlilium_light_culling::{
    CullingConfig, CullingResult, LightCuller, LightListBuffers, LightType, PerLightType,
    TileHeatmap,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliLightType {
    Point,
    Spot,
    Sphere,
    Tube,
}

impl From<CliLightType> for LightType {
    fn from(value: CliLightType) -> Self {
        match value {
            CliLightType::Point => LightType::Point,
            CliLightType::Spot => LightType::Spot,
            CliLightType::Sphere => LightType::Sphere,
            CliLightType::Tube => LightType::Tube,
        }
    }
}

/// Tiled Forward+ light culling over a synthetic scene.
#[derive(Parser, Debug)]
#[command(name = "tile-cull", version)]
struct Args {
    /// Screen width in pixels.
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Screen height in pixels.
    #[arg(long, default_value = "720")]
    height: u32,

    /// Number of point lights.
    #[arg(long, default_value = "1024")]
    point: u32,

    /// Number of spot lights.
    #[arg(long, default_value = "256")]
    spot: u32,

    /// Number of sphere lights.
    #[arg(long, default_value = "256")]
    sphere: u32,

    /// Number of tube lights.
    #[arg(long, default_value = "128")]
    tube: u32,

    /// Attenuation radius of every light.
    #[arg(long, default_value = "2.0")]
    radius: f32,

    /// Placement sequence offset.
    #[arg(long, default_value = "0")]
    seed: u32,

    /// 0 uses the reconstructed tile near depth, 1 the camera near plane.
    #[arg(long, default_value = "0.0")]
    near_plane_choice: f32,

    /// Worker threads (defaults to the global rayon pool).
    #[arg(long)]
    threads: Option<usize>,

    /// Number of dispatches to time.
    #[arg(long, default_value = "1")]
    frames: u32,

    /// Print a per-tile heatmap for one light type.
    #[arg(long, value_enum)]
    heatmap: Option<CliLightType>,
}

fn main() -> CullingResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    redlilium_light_culling::init();

    let args = Args::parse();

    let mut config = CullingConfig::default();
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    let culler = LightCuller::new(config)?;

    let scene = SyntheticScene::generate(&SyntheticSceneParams {
        width: args.width,
        height: args.height,
        light_counts: PerLightType([args.point, args.spot, args.sphere, args.tube]),
        light_radius: args.radius,
        seed: args.seed,
    });
    let frame = scene.frame_uniforms(args.near_plane_choice);
    let depth = scene.depth_view()?;
    let lights = scene.lights();
    let mut buffers = LightListBuffers::for_screen(args.width, args.height);

    let frames = args.frames.max(1);
    let start = Instant::now();
    let mut report = None;
    for _ in 0..frames {
        buffers.reset_allocator();
        report = Some(culler.dispatch(&frame, &depth, &lights, &mut buffers)?);
    }
    let elapsed = start.elapsed();

    let grid = buffers.grid();
    println!(
        "{}x{} pixels, {}x{} tiles",
        args.width, args.height, grid.tiles_x, grid.tiles_y
    );
    println!(
        "{} frames, {:.3} ms per dispatch",
        frames,
        elapsed.as_secs_f64() * 1000.0 / f64::from(frames)
    );
    if let Some(report) = report {
        println!("{} background tiles", report.background_tiles);
        for ty in LightType::ALL {
            println!(
                "{:>6}: {:>8} indices, {} saturated tiles, {} dropped",
                ty.name(),
                report.listed[ty],
                report.saturated_tiles[ty],
                report.dropped[ty]
            );
        }
    }

    if let Some(ty) = args.heatmap {
        let heatmap = TileHeatmap::from_buffers(&buffers, ty.into());
        print!("{}", heatmap.to_ascii());
        println!("{}", heatmap.summary());
    }

    Ok(())
}
