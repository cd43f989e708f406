mod logger;

use std::time::Instant;

use anyhow::Context;
use clap::{
    Parser,
    ValueEnum,
};
use log::{
    info,
    LevelFilter,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use spheretrace::scene;
use spheretrace::scene::example::Example;
use spheretrace::RenderSettings;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(version)]
/// A simple ray tracer for scenes made of spheres.
struct TracerOpt {
    /// Number of samples to take per pixel.
    #[arg(
        long,
        short,
        default_value_t = RenderSettings::DEFAULT_SAMPLES_PER_PIXEL,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    num_samples: usize,
    /// Maximum number of times a ray may bounce.
    #[arg(long, default_value_t = RenderSettings::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Destination of the output image.
    ///
    /// supported formats: ppm, png
    #[arg(long, short, default_value = "out.ppm")]
    output: String,
    /// Output image width.
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,
    /// Output image height.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
    /// Seed to use for RNG.
    ///
    /// By default the RNG will be seeded through the OS-provided entropy source.
    #[arg(long)]
    seed: Option<u64>,
    /// A scene file to load from configuration (YAML, optionally gzipped).
    #[arg(long, conflicts_with = "example")]
    scene: Option<String>,
    /// Built-in scene to render when no scene file is given.
    ///
    /// one of: materials, defocus, single, one-weekend
    #[arg(long, default_value = "materials")]
    example: Example,
    /// Logging verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let config = TracerOpt::parse();
    logger::init_logger(config.log_level.into());

    let settings = RenderSettings {
        width: config.width as usize,
        height: config.height as usize,
        samples_per_pixel: config.num_samples,
        max_depth: config.max_depth,
    };
    let rays = settings.width * settings.height * settings.samples_per_pixel;
    let mut rng = small_rng(config.seed);

    let (scene, camera) = if let Some(ref path) = config.scene {
        scene::load_scene(path, settings.aspect_ratio())
            .with_context(|| format!("load scene file '{}'", path))?
    } else {
        info!("rendering example scene {:?}", config.example);
        config.example.scene(settings.aspect_ratio(), &mut rng)
    };

    let start = Instant::now();
    let img = spheretrace::render(&scene, &camera, &settings, &mut rng);
    let elapsed_sec = start.elapsed().as_secs_f64();
    let rays_per_sec = (rays as f64) / elapsed_sec;
    info!("traced {} primary rays ({:.0} rays/s)", rays, rays_per_sec);

    img.save(&config.output)
        .with_context(|| format!("could not write image to '{}'", config.output))?;
    info!("wrote {}", config.output);
    Ok(())
}

fn small_rng(seed: Option<u64>) -> SmallRng {
    seed.map(SmallRng::seed_from_u64)
        .unwrap_or_else(SmallRng::from_entropy)
}
