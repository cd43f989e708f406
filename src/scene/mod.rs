use log::debug;
use rand::Rng;

use crate::geom::{
    Color,
    Vec3,
};
use crate::surfaces::{
    HittableList,
    Sphere,
};
use crate::trace::Hittable;
use crate::trace::Ray;

pub mod example;
mod load;

pub use load::{
    load_scene,
    parse_scene,
};

/// Rays starting this close to a surface do not hit it again.
///
/// Without it, a scattered ray would often re-intersect the surface it just left
/// due to floating point error ("shadow acne").
pub const T_MIN: f64 = 0.001;

/// The color seen by rays escaping the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// A vertical blend from `bottom` (looking straight down) to `top` (looking straight up).
    Gradient { bottom: Color, top: Color },
    Solid(Color),
}

impl Background {
    pub fn sky() -> Self {
        Background::Gradient {
            bottom: Vec3::new(1.0, 1.0, 1.0),
            top: Vec3::new(0.5, 0.7, 1.0),
        }
    }

    /// The color seen along direction `dir`, which need not be normalized.
    pub fn color(&self, dir: Vec3) -> Color {
        match *self {
            Background::Gradient { bottom, top } => {
                let t = 0.5 * (dir.unit().y() + 1.0);
                bottom.lerp(top, t)
            }
            Background::Solid(color) => color,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::sky()
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    world: HittableList<Sphere>,
    background: Background,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder {
            surfaces: HittableList::new(),
            background: Background::default(),
        }
    }

    pub fn world(&self) -> &HittableList<Sphere> {
        &self.world
    }

    pub fn background(&self) -> &Background {
        &self.background
    }
}

pub struct SceneBuilder {
    surfaces: HittableList<Sphere>,
    background: Background,
}

impl SceneBuilder {
    pub fn add(&mut self, sphere: Sphere) {
        self.surfaces.add(sphere);
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn build(self) -> Scene {
        debug!("built scene with {} spheres", self.surfaces.len());
        Scene {
            world: self.surfaces,
            background: self.background,
        }
    }
}

impl Scene {
    /// Compute the color seen along `ray`.
    ///
    /// A ray may scatter at most `max_depth` times. A ray that would need to
    /// scatter again after that, or is absorbed, contributes black.
    pub fn ray_color<R: Rng>(&self, mut ray: Ray, rng: &mut R, max_depth: usize) -> Color {
        // The recursive form is
        //
        //   color(ray, depth) = attenuation * color(scattered, depth + 1)
        //
        // which is unrolled here into a loop that carries the product of all
        // attenuations seen so far.
        let mut throughput = Vec3::new(1.0, 1.0, 1.0);
        let mut depth = 0;
        loop {
            let hit = match self.world.hit(&ray, T_MIN, ::std::f64::INFINITY) {
                Some(hit) => hit,
                // The ray escaped.
                None => return throughput.mul_pointwise(&self.background.color(ray.dir())),
            };
            if depth >= max_depth {
                return Vec3::default();
            }
            match hit.material.scatter(&ray, &hit, rng) {
                Some((attenuation, scattered)) => {
                    throughput = throughput.mul_pointwise(&attenuation);
                    ray = scattered;
                    depth += 1;
                }
                // Absorbed.
                None => return Vec3::default(),
            }
        }
    }
}
