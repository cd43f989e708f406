//! Built-in example scenes.
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use super::Scene;
use crate::camera::Camera;
use crate::geom::{
    Point3,
    Vec3,
};
use crate::material::Material;
use crate::surfaces::Sphere;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Example {
    Materials,
    Defocus,
    Single,
    OneWeekend,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown example scene '{0}', expected one of: materials, defocus, single, one-weekend")]
pub struct UnknownExample(pub String);

impl FromStr for Example {
    type Err = UnknownExample;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "materials" => Ok(Example::Materials),
            "defocus" => Ok(Example::Defocus),
            "single" => Ok(Example::Single),
            "one-weekend" => Ok(Example::OneWeekend),
            _ => Err(UnknownExample(s.to_owned())),
        }
    }
}

impl Example {
    pub const NAMES: [&'static str; 4] = ["materials", "defocus", "single", "one-weekend"];

    /// Build the scene and its camera.
    ///
    /// Scenes with randomized content draw from `rng`.
    pub fn scene<R: Rng>(&self, aspect_ratio: f64, rng: &mut R) -> (Scene, Camera) {
        match self {
            Example::Materials => materials(aspect_ratio),
            Example::Defocus => defocus(aspect_ratio),
            Example::Single => single(aspect_ratio),
            Example::OneWeekend => one_weekend(aspect_ratio, rng),
        }
    }
}

/// Diffuse, metal and glass spheres resting on a large diffuse ground sphere.
fn material_spheres() -> Scene {
    let mut scene = Scene::builder();
    scene.add(Sphere::new(
        Point3::new(0., 0., -1.),
        0.5,
        Material::lambertian(Vec3::new(0.1, 0.2, 0.5)),
    ));
    scene.add(Sphere::new(
        Point3::new(0., -100.5, -1.),
        100.,
        Material::lambertian(Vec3::new(0.8, 0.8, 0.0)),
    ));
    scene.add(Sphere::new(
        Point3::new(1., 0., -1.),
        0.5,
        Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.3),
    ));
    scene.add(Sphere::new(
        Point3::new(-1., 0., -1.),
        0.5,
        Material::dielectric(1.5),
    ));
    scene.build()
}

fn materials(aspect_ratio: f64) -> (Scene, Camera) {
    let camera = Camera::builder(20.0, aspect_ratio)
        .from(Point3::new(-2., 2., 1.))
        .towards(Point3::new(0., 0., -1.))
        .build();
    (material_spheres(), camera)
}

/// The same spheres seen through a wide aperture, focused on the center sphere.
fn defocus(aspect_ratio: f64) -> (Scene, Camera) {
    let from = Point3::new(3., 3., 2.);
    let towards = Point3::new(0., 0., -1.);
    let camera = Camera::builder(20.0, aspect_ratio)
        .from(from)
        .towards(towards)
        .aperture(2.0)
        .focus_dist((from - towards).length())
        .build();
    (material_spheres(), camera)
}

/// A single diffuse sphere directly in front of a camera at the origin.
fn single(aspect_ratio: f64) -> (Scene, Camera) {
    let camera = Camera::builder(90.0, aspect_ratio).build();
    let mut scene = Scene::builder();
    scene.add(Sphere::new(
        Point3::new(0., 0., -1.),
        0.5,
        Material::lambertian(Vec3::new(0.1, 0.2, 0.5)),
    ));
    (scene.build(), camera)
}

/// Create a random scene as shown in the final section of Ray Tracing in One Weekend.
fn one_weekend<R: Rng>(aspect_ratio: f64, rng: &mut R) -> (Scene, Camera) {
    let camera = Camera::builder(20.0, aspect_ratio)
        .from(Point3::new(13., 2., 3.))
        .towards(Point3::new(0., 0., 0.))
        .focus_dist(10.)
        .aperture(0.1)
        .build();

    let mut scene = Scene::builder();

    let ground_material = Material::lambertian(Vec3::new(0.5, 0.5, 0.5));
    scene.add(Sphere::new(
        Point3::new(0., -1000., 0.),
        1000.,
        ground_material,
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_material = rng.gen::<f64>();
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Point3::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let material = if choose_material < 0.8 {
                    // diffuse
                    let albedo = rng.gen::<Vec3>().mul_pointwise(&rng.gen::<Vec3>());
                    Material::lambertian(albedo)
                } else if choose_material < 0.95 {
                    // metal
                    let albedo = Vec3::splat(0.5) + 0.5 * rng.gen::<Vec3>();
                    let fuzz = rng.gen_range(0.0..0.5);
                    Material::metal(albedo, fuzz)
                } else {
                    // glass
                    Material::dielectric(1.5)
                };
                scene.add(Sphere::new(center, 0.2, material));
            }
        }
    }
    let material1 = Material::dielectric(1.5);
    scene.add(Sphere::new(Point3::new(0., 1., 0.), 1.0, material1));
    let material2 = Material::lambertian(Vec3::new(0.4, 0.2, 0.1));
    scene.add(Sphere::new(Point3::new(-4., 1., 0.), 1.0, material2));
    let material3 = Material::metal(Vec3::new(0.7, 0.6, 0.5), 0.0);
    scene.add(Sphere::new(Point3::new(4., 1., 0.), 1.0, material3));

    (scene.build(), camera)
}
