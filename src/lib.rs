//! A recursive Monte-Carlo ray tracer for scenes made of spheres.
//!
//! A [`scene::Scene`] is rendered through a [`camera::Camera`] by
//! [`render::render`] into an [`output::Image`].
#![allow(clippy::suspicious_operation_groupings)]
pub mod camera;
pub mod geom;
pub mod material;
pub mod output;
pub mod progress;
pub mod render;
pub mod scene;
pub mod surfaces;
pub mod trace;
pub mod util;

pub use camera::Camera;
pub use geom::{
    Color,
    Point3,
    Vec3,
};
pub use material::Material;
pub use output::Image;
pub use render::{
    render,
    RenderSettings,
};
pub use scene::{
    Background,
    Scene,
};
pub use surfaces::{
    HittableList,
    Sphere,
};
pub use trace::{
    Hit,
    Hittable,
    Ray,
};
