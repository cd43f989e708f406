use rand::Rng;

use crate::geom::{
    Color,
    Vec3,
};
use crate::trace::{
    Hit,
    Ray,
};
use crate::util::RandUtil;

/// How a surface responds to incoming light.
///
/// Materials are small and `Copy`, so surfaces sharing a material each hold
/// their own copy of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse reflection.
    Lambertian { albedo: Color },
    /// Mirror-like reflection, blurred by `fuzz` in [0, 1].
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive material such as glass or water.
    Dielectric { refractive_index: f64 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// A metal surface. Fuzz is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.max(0.0).min(1.0),
        }
    }

    pub fn dielectric(refractive_index: f64) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter `ray` off the surface at `hit`.
    ///
    /// Returns the attenuation and the scattered ray, or `None` if the ray was absorbed.
    #[inline(always)]
    pub fn scatter<R: Rng>(&self, ray: &Ray, hit: &Hit, rng: &mut R) -> Option<(Color, Ray)> {
        match *self {
            Material::Lambertian { albedo } => Some((albedo, lambertian_scatter(hit, rng))),
            Material::Metal { albedo, fuzz } => {
                metallic_scatter(fuzz, ray, hit, rng).map(|r| (albedo, r))
            }
            Material::Dielectric { refractive_index } => Some((
                Vec3::new(1.0, 1.0, 1.0),
                dielectric_scatter(refractive_index, ray, hit, rng),
            )),
        }
    }
}

#[inline(always)]
fn lambertian_scatter<R: Rng>(hit: &Hit, rng: &mut R) -> Ray {
    // Sampling inside the unit sphere sitting on the normal approximates a
    // cosine weighted distribution. The direction always leaves the surface
    // since the sample is strictly shorter than the normal.
    let target = hit.point + hit.normal + rng.gen_in_unit_sphere();
    Ray::new(hit.point, target - hit.point)
}

#[inline(always)]
fn metallic_scatter<R: Rng>(fuzz: f64, ray: &Ray, hit: &Hit, rng: &mut R) -> Option<Ray> {
    let reflected = reflect(&ray.dir().unit(), &hit.normal);
    let scattered = Ray::new(hit.point, reflected + fuzz * rng.gen_in_unit_sphere());
    if scattered.dir().dot(&hit.normal) > 0.0 {
        Some(scattered)
    } else {
        // Fuzz pushed the ray below the surface.
        None
    }
}

#[inline(always)]
fn dielectric_scatter<R: Rng>(refractive_index: f64, ray: &Ray, hit: &Hit, rng: &mut R) -> Ray {
    let dir = ray.dir();
    let d_dot_n = dir.dot(&hit.normal);
    let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
        // Leaving the medium.
        (
            hit.normal.negate(),
            refractive_index,
            refractive_index * d_dot_n / dir.length(),
        )
    } else {
        (
            hit.normal,
            1.0 / refractive_index,
            -d_dot_n / dir.length(),
        )
    };

    let scatter_dir = match refract(&dir, &outward_normal, ni_over_nt) {
        Some(refracted) if rng.gen::<f64>() >= schlick(cosine, refractive_index) => refracted,
        // Either a Fresnel reflection or total internal reflection.
        _ => reflect(&dir, &hit.normal),
    };
    Ray::new(hit.point, scatter_dir)
}

/// Schlick's approximation of Fresnel reflectance.
///
/// https://en.wikipedia.org/wiki/Schlick%27s_approximation
pub fn schlick(cosine: f64, refractive_index: f64) -> f64 {
    let mut r0 = (1.0 - refractive_index) / (1.0 + refractive_index);
    r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect an inbound ray v across a surface given the surface normal n.
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    *v - (2.0 * v.dot(n)) * *n
}

/// Refract `v` through a surface with normal `n` by Snell's law.
///
/// `ni_over_nt` is the ratio of the refractive index on the incoming side to
/// the one on the far side. Returns `None` when no refracted ray exists
/// (total internal reflection).
pub fn refract(v: &Vec3, n: &Vec3, ni_over_nt: f64) -> Option<Vec3> {
    let uv = v.unit();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - dt * *n) - discriminant.sqrt() * *n)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geom::Point3;

    const EPS: f64 = 1E-8;

    /// A hit on the top of a unit sphere at the origin.
    fn hit_on_top(material: &Material) -> Hit {
        Hit {
            t: 1.0,
            point: Point3::new(0.0, 1.0, 0.0),
            normal: Vec3::jhat(),
            material,
        }
    }

    #[test]
    fn lambertian_always_scatters_away_from_surface() {
        let material = Material::lambertian(Vec3::new(0.1, 0.2, 0.5));
        let hit = hit_on_top(&material);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..1000 {
            let ray = Ray::new(Point3::new(1.0, 3.0, 0.5), Vec3::new(-1.0, -2.0, -0.5));
            let (attenuation, scattered) = material
                .scatter(&ray, &hit, &mut rng)
                .expect("lambertian never absorbs");
            assert_eq!(attenuation, Vec3::new(0.1, 0.2, 0.5));
            assert_eq!(scattered.origin(), hit.point);
            assert!(scattered.dir().dot(&hit.normal) > 0.0);
        }
    }

    #[test]
    fn polished_metal_reflects_head_on_ray_back() {
        let material = Material::metal(Vec3::new(0.8, 0.6, 0.2), 0.0);
        let hit = hit_on_top(&material);
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -2.0, 0.0));
        let mut rng = SmallRng::seed_from_u64(3);

        let (attenuation, scattered) = material.scatter(&ray, &hit, &mut rng).unwrap();
        assert_eq!(attenuation, Vec3::new(0.8, 0.6, 0.2));
        assert!(scattered.dir().rel_eq(&ray.dir().unit().negate(), EPS));
    }

    #[test]
    fn metal_absorbs_rays_scattered_below_surface() {
        let material = Material::metal(Vec3::splat(1.0), 1.0);
        let hit = hit_on_top(&material);
        // Grazing ray, so most of the fuzz sends it into the surface.
        let ray = Ray::new(Point3::new(-10.0, 1.01, 0.0), Vec3::new(1.0, -0.001, 0.0));
        let mut rng = SmallRng::seed_from_u64(5);
        let absorbed = (0..1000)
            .filter(|_| material.scatter(&ray, &hit, &mut rng).is_none())
            .count();
        assert!(absorbed > 0);
    }

    #[test]
    fn metal_fuzz_is_clamped() {
        for &(given, expected) in &[(3.5, 1.0), (-0.5, 0.0), (0.25, 0.25)] {
            match Material::metal(Vec3::splat(1.0), given) {
                Material::Metal { fuzz, .. } => assert_eq!(fuzz, expected, "fuzz {}", given),
                other => panic!("unexpected material {:?}", other),
            }
        }
    }

    #[test]
    fn index_matched_dielectric_does_not_bend() {
        let material = Material::dielectric(1.0);
        let hit = hit_on_top(&material);
        let mut rng = SmallRng::seed_from_u64(9);
        let ray = Ray::new(Point3::new(0.0, 4.0, 0.0), Vec3::new(0.0, -3.0, 0.0));
        for _ in 0..100 {
            let (attenuation, scattered) = material.scatter(&ray, &hit, &mut rng).unwrap();
            assert_eq!(attenuation, Vec3::new(1.0, 1.0, 1.0));
            assert!(scattered.dir().rel_eq(&ray.dir().unit(), EPS));
        }
    }

    #[test]
    fn dielectric_reflects_on_total_internal_reflection() {
        let material = Material::dielectric(1.5);
        let hit = hit_on_top(&material);
        // Exiting the glass at a shallow angle.
        let ray = Ray::new(Point3::new(-1.0, 0.9, 0.0), Vec3::new(1.0, 0.1, 0.0));
        // Would always refract if refraction were possible.
        let mut rng = StepRng::new(u64::MAX, 0);

        let (_, scattered) = material.scatter(&ray, &hit, &mut rng).unwrap();
        let expected = reflect(&ray.dir(), &hit.normal);
        assert!(scattered.dir().rel_eq(&expected, EPS));
        assert!(scattered.dir().y() < 0.0);
    }

    #[test]
    fn dielectric_chooses_between_reflection_and_refraction() {
        let material = Material::dielectric(1.5);
        let hit = hit_on_top(&material);
        // Entering the glass at 45 degrees, where reflectance is about 4%.
        let ray = Ray::new(Point3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let reflected = reflect(&ray.dir(), &hit.normal);
        let refracted = refract(&ray.dir(), &hit.normal, 1.0 / 1.5).unwrap();
        assert!(!reflected.rel_eq(&refracted, EPS));

        // A draw of 0 falls below the reflectance.
        let (_, scattered) = material.scatter(&ray, &hit, &mut StepRng::new(0, 0)).unwrap();
        assert!(scattered.dir().rel_eq(&reflected, EPS), "{}", scattered.dir());
        assert!(scattered.dir().y() > 0.0);

        // A draw just below 1 always refracts.
        let (_, scattered) = material
            .scatter(&ray, &hit, &mut StepRng::new(u64::MAX, 0))
            .unwrap();
        assert!(scattered.dir().rel_eq(&refracted, EPS), "{}", scattered.dir());
        assert!(scattered.dir().y() < 0.0);
    }

    #[test]
    fn refract_fails_beyond_critical_angle() {
        let n = Vec3::jhat();
        let v = Vec3::new(1.0, -0.1, 0.0);
        assert!(refract(&v, &n, 1.5).is_none());
        assert!(refract(&v, &n, 1.0 / 1.5).is_some());
    }

    #[test]
    fn refract_head_on_passes_straight_through() {
        let n = Vec3::jhat();
        let v = Vec3::new(0.0, -2.0, 0.0);
        let refracted = refract(&v, &n, 1.0 / 1.5).unwrap();
        assert!(refracted.rel_eq(&Vec3::new(0.0, -1.0, 0.0), EPS));
    }

    #[test]
    fn schlick_bounds() {
        // Head on, reflectance is r0.
        assert!((schlick(1.0, 1.5) - 0.04).abs() < EPS);
        // At grazing angles everything is reflected.
        assert!((schlick(0.0, 1.5) - 1.0).abs() < EPS);
        assert_eq!(schlick(1.0, 1.0), 0.0);
    }

    #[test]
    fn reflect_mirrors_about_normal() {
        let n = Vec3::jhat();
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(&v, &n), Vec3::new(1.0, 1.0, 0.0));
    }
}
