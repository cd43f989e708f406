use crate::geom::Point3;
use crate::material::Material;
use crate::trace::{
    Hit,
    Hittable,
    Ray,
};

#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be positive. A zero radius produces NaN normals and a
    /// negative one inverts them; neither is checked here.
    pub fn new(center: Point3, radius: f64, material: Material) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    #[inline(always)]
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit> {
        let oc = ray.origin() - self.center;
        let a = ray.dir().square_length();
        let half_b = oc.dot(&ray.dir());
        let c = oc.square_length() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;

        if discriminant > 0.0 {
            let root = discriminant.sqrt();
            // The nearer root first, so the closest surface wins.
            let temp = (-half_b - root) / a;
            if t_min < temp && temp < t_max {
                let outward_normal = (ray.at(temp) - self.center) / self.radius;
                return Some(Hit::new(ray, temp, outward_normal, &self.material));
            }
            let temp = (-half_b + root) / a;
            if t_min < temp && temp < t_max {
                let outward_normal = (ray.at(temp) - self.center) / self.radius;
                return Some(Hit::new(ray, temp, outward_normal, &self.material));
            }
        }
        // Does not hit the sphere.
        None
    }
}

/// An unordered collection of surfaces, searched linearly for the nearest hit.
#[derive(Debug, Clone)]
pub struct HittableList<H> {
    objects: Vec<H>,
}

impl<H> HittableList<H> {
    pub fn new() -> Self {
        HittableList {
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, object: H) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.objects.iter()
    }
}

impl<H> Default for HittableList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> From<Vec<H>> for HittableList<H> {
    fn from(objects: Vec<H>) -> Self {
        HittableList { objects }
    }
}

impl<H: Hittable> Hittable for HittableList<H> {
    fn hit(&self, ray: &Ray, t_min: f64, t_max: f64) -> Option<Hit> {
        let mut closest = t_max;
        let mut closest_hit = None;
        for o in &self.objects {
            // Each accepted hit narrows the interval for the remaining objects.
            if let Some(hit) = o.hit(ray, t_min, closest) {
                closest = hit.t;
                closest_hit = Some(hit);
            }
        }
        closest_hit
    }
}
