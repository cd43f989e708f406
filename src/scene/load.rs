//! Utilities and bindings for loading a scene from YAML configuration.
//!
//! This module contains serde bindings and wrappers for defining the scene,
//! opting for explicit conversion here rather than sprinkle #[derive(Deserialize)]
//! throughout the code. The sole exception to this is `Vec3`, since it is
//! unlikely to change.
use std::fmt;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::{
    anyhow,
    Context,
};
use log::{
    debug,
    warn,
};
use serde::de::{
    self,
    Deserializer,
};
use serde::Deserialize;

use super::{
    Background,
    Scene,
};
use crate::camera::Camera;
use crate::geom::{
    Point3,
    Vec3,
};
use crate::surfaces;

/// Load a scene from the given path.
///
/// Paths ending in `.gz` are decompressed while reading. The camera will be
/// configured with the given aspect ratio.
pub fn load_scene<P: AsRef<Path>>(path: P, aspect_ratio: f64) -> anyhow::Result<(Scene, Camera)> {
    let path = path.as_ref();
    let reader = reader_at(path)?;
    let config = serde_yaml::from_reader::<_, Config>(reader)
        .with_context(|| format!("could not parse scene file '{}'", path.display()))?;
    debug!("loaded scene file '{}'", path.display());
    build(config, aspect_ratio)
}

/// Parse a scene from a YAML document.
pub fn parse_scene(yaml: &str, aspect_ratio: f64) -> anyhow::Result<(Scene, Camera)> {
    let config = serde_yaml::from_str::<Config>(yaml).context("could not parse scene")?;
    build(config, aspect_ratio)
}

fn build(config: Config, aspect_ratio: f64) -> anyhow::Result<(Scene, Camera)> {
    if config.scene.surfaces.is_empty() {
        return Err(anyhow!("scene is empty"));
    }

    let mut builder = Scene::builder();
    if let Some(background) = config.scene.background {
        builder.set_background(background.into());
    }
    for (i, surface) in config.scene.surfaces.iter().enumerate() {
        match surface {
            Surface::Sphere {
                radius,
                position,
                material,
            } => {
                if !(*radius > 0.0) {
                    return Err(anyhow!(
                        "surface {}: sphere radius must be positive, got {}",
                        i,
                        radius
                    ));
                }
                material
                    .validate()
                    .with_context(|| format!("surface {}: invalid material", i))?;
                builder.add(surfaces::Sphere::new(*position, *radius, material.into()));
            }
        }
    }
    Ok((builder.build(), config.camera.build(aspect_ratio)?))
}

fn reader_at<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, io::Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if let Some("gz") = path.extension().and_then(|s| s.to_str()) {
        // Unfortunately, the GzDecoder doesn't implement BufRead itself
        // so we need two levels of buffering (input buffer, output buffer).
        let reader = flate2::read::GzDecoder::new(file);
        return Ok(Box::new(BufReader::new(reader)));
    }
    Ok(Box::new(BufReader::new(file)))
}

#[derive(Deserialize, Debug)]
struct Config {
    camera: CameraConfig,
    scene: SceneConfig,
}

#[derive(Deserialize, Debug)]
struct CameraConfig {
    fov: f64,
    from: Point3,
    towards: Point3,
    up: Option<Vec3>,
    focus_distance: Option<f64>,
    aperture: Option<f64>,
}

impl CameraConfig {
    fn build(self, aspect_ratio: f64) -> anyhow::Result<Camera> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(anyhow!("camera fov must be within (0, 180), got {}", self.fov));
        }
        let mut builder = Camera::builder(self.fov, aspect_ratio)
            .from(self.from)
            .towards(self.towards);
        if let Some(up) = self.up {
            builder = builder.up(up);
        }
        if let Some(aperture) = self.aperture {
            if aperture < 0.0 {
                return Err(anyhow!("camera aperture must not be negative, got {}", aperture));
            }
            builder = builder.aperture(aperture);
        }
        if let Some(focus_distance) = self.focus_distance {
            builder = builder.focus_dist(focus_distance);
        } else if self.aperture.map_or(false, |a| a > 0.0) {
            warn!("camera has an aperture but no focus_distance, focusing at 1.0");
        }
        Ok(builder.build())
    }
}

#[derive(Deserialize, Debug)]
struct SceneConfig {
    surfaces: Vec<Surface>,
    background: Option<BackgroundConfig>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
enum BackgroundConfig {
    Gradient { bottom: Albedo, top: Albedo },
    Solid { color: Albedo },
}

impl From<BackgroundConfig> for Background {
    fn from(background: BackgroundConfig) -> Self {
        match background {
            BackgroundConfig::Gradient { bottom, top } => Background::Gradient {
                bottom: bottom.0,
                top: top.0,
            },
            BackgroundConfig::Solid { color } => Background::Solid(color.0),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Surface {
    Sphere {
        radius: f64,
        position: Point3,
        material: Material,
    },
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Material {
    Lambertian { albedo: Albedo },
    Dielectric { index: f64 },
    Metal { albedo: Albedo, fuzz: f64 },
}

impl Material {
    fn validate(&self) -> anyhow::Result<()> {
        match *self {
            Material::Lambertian { .. } => Ok(()),
            Material::Dielectric { index } if !(index > 0.0 && index.is_finite()) => Err(anyhow!(
                "refractive index must be positive and finite, got {}",
                index
            )),
            Material::Dielectric { .. } => Ok(()),
            Material::Metal { fuzz, .. } if !fuzz.is_finite() => {
                Err(anyhow!("metal fuzz must be finite, got {}", fuzz))
            }
            Material::Metal { .. } => Ok(()),
        }
    }
}

impl From<&Material> for crate::material::Material {
    fn from(material: &Material) -> Self {
        match *material {
            Material::Lambertian { ref albedo } => crate::material::Material::lambertian(albedo.0),
            Material::Dielectric { index } => crate::material::Material::dielectric(index),
            Material::Metal { ref albedo, fuzz } => {
                crate::material::Material::metal(albedo.0, fuzz)
            }
        }
    }
}

/// A color, written either as `[r, g, b]` or as a hex string `aabbcc`.
#[derive(Debug)]
struct Albedo(Vec3);

impl FromStr for Albedo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return Err(anyhow!("expected hex color format aabbcc, got {}", s));
        }
        let parsed = u32::from_str_radix(s, 16).context("could not parse hex color")?;
        let bytes: [u8; 4] = parsed.to_be_bytes();

        Ok(Albedo(Vec3::new(
            bytes[1] as f64 / 255.0,
            bytes[2] as f64 / 255.0,
            bytes[3] as f64 / 255.0,
        )))
    }
}

impl<'de> Deserialize<'de> for Albedo {
    fn deserialize<D>(deserializer: D) -> Result<Albedo, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AlbedoVisitor(std::marker::PhantomData<Albedo>);

        impl<'de> de::Visitor<'de> for AlbedoVisitor {
            type Value = Albedo;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("string or array of floats")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Albedo::from_str(value).map_err(serde::de::Error::custom)
            }

            fn visit_seq<S>(self, visitor: S) -> Result<Self::Value, S::Error>
            where
                S: de::SeqAccess<'de>,
            {
                let inner =
                    Deserialize::deserialize(de::value::SeqAccessDeserializer::new(visitor))?;
                Ok(Albedo(inner))
            }
        }

        deserializer.deserialize_any(AlbedoVisitor(std::marker::PhantomData))
    }
}
