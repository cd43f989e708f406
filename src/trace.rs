use crate::geom::{
    Point3,
    Vec3,
};
use crate::material::Material;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    dir: Vec3,
}

impl Ray {
    /// Create a new ray. The direction is stored as given, it is not normalized.
    pub fn new(origin: Point3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn dir(&self) -> Vec3 {
        self.dir
    }

    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.dir * t
    }
}

/// The record of a ray striking a surface.
#[derive(Debug, Clone)]
pub struct Hit<'m> {
    pub t: f64,
    pub point: Point3,
    /// The outward facing surface normal at `point`.
    ///
    /// This is not flipped to face the incoming ray; materials that care about
    /// which side was struck compare it against the ray direction themselves.
    pub normal: Vec3,
    pub material: &'m Material,
}

impl<'m> Hit<'m> {
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'m Material) -> Self {
        Hit {
            t,
            point: ray.at(t),
            normal: outward_normal,
            material,
        }
    }
}

/// An object within the scene that can be hit by rays.
pub trait Hittable {
    /// Attempt to hit object with `ray`, returning the hit that occurred, if any.
    ///
    /// The hit must not be returned if it occured at time t outside (t_min, t_max).
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit>;
}
