use log::info;
use rand::Rng;

use crate::camera::Camera;
use crate::geom::Color;
use crate::output::Image;
use crate::progress::{
    format_duration,
    Progress,
};
use crate::scene::Scene;

/// Knobs controlling image size and quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    /// Number of jittered rays averaged for each pixel.
    pub samples_per_pixel: usize,
    /// Maximum number of times a ray may scatter.
    pub max_depth: usize,
}

impl RenderSettings {
    pub const DEFAULT_SAMPLES_PER_PIXEL: usize = 100;
    pub const DEFAULT_MAX_DEPTH: usize = 50;

    pub fn new(width: usize, height: usize) -> Self {
        RenderSettings {
            width,
            height,
            samples_per_pixel: Self::DEFAULT_SAMPLES_PER_PIXEL,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Render `scene` as seen by `camera`.
///
/// All randomness is drawn from `rng`, so a seeded generator renders the same
/// image every time.
pub fn render<R: Rng>(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    rng: &mut R,
) -> Image {
    let RenderSettings {
        width,
        height,
        samples_per_pixel,
        max_depth,
    } = *settings;
    info!(
        "rendering {}x{} with {} samples per pixel, max depth {}",
        width, height, samples_per_pixel, max_depth
    );

    let mut image = Image::new(width, height);
    let mut progress = Progress::new(height, width * samples_per_pixel);
    // Image rows are stored top first while v grows upwards.
    for (row, j) in (0..height).rev().enumerate() {
        for i in 0..width {
            let color = average(samples_per_pixel, || {
                let u = (i as f64 + rng.gen::<f64>()) / width as f64;
                let v = (j as f64 + rng.gen::<f64>()) / height as f64;
                let ray = camera.get_ray(rng, u, v);
                scene.ray_color(ray, rng, max_depth)
            });
            image.set(i, row, to_rgb8(color));
        }
        progress.record();
    }
    info!("done in {}", format_duration(progress.elapsed()));
    image
}

/// Gamma correct (gamma 2) a linear color and quantize it to 8 bits per channel.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    let encode = |c: f64| (255.999 * c.max(0.0).sqrt().min(1.0)) as u8;
    [encode(color.x()), encode(color.y()), encode(color.z())]
}

fn average<F>(n: usize, mut f: F) -> Color
where
    F: FnMut() -> Color,
{
    let mut acc = Color::default();
    for _ in 0..n {
        acc += f();
    }
    acc / (n as f64)
}
