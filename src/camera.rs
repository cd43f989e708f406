use rand::Rng;

use crate::geom::{
    Point3,
    Vec3,
};
use crate::trace::Ray;
use crate::util::RandUtil;

/// A thin-lens camera.
///
/// With a zero aperture this degenerates into a pinhole camera where every ray
/// starts at the same origin.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

#[derive(Debug, Clone)]
pub struct CameraBuilder {
    from: Point3,
    towards: Point3,
    vup: Vec3,
    aspect_ratio: f64,
    vfov_radians: f64,
    aperture: f64,
    focus_dist: f64,
}

impl Camera {
    /// Start building a camera with the given vertical field of view (in degrees).
    pub fn builder(vfov: f64, aspect_ratio: f64) -> CameraBuilder {
        CameraBuilder {
            aspect_ratio,
            vfov_radians: vfov.to_radians(),
            from: Point3::new(0., 0., 0.),
            towards: Point3::new(0., 0., -1.),
            vup: Vec3::new(0., 1., 0.),
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }

    fn new(builder: CameraBuilder) -> Camera {
        let half_height = (builder.vfov_radians / 2.0).tan();
        let half_width = builder.aspect_ratio * half_height;
        let focus_dist = builder.focus_dist;

        // Form an orthonormal basis for our camera system.
        let w: Vec3 = (builder.from - builder.towards).unit();
        let u = builder.vup.cross(&w).unit();
        let v = w.cross(&u);

        let origin = builder.from;
        let horizontal = (2.0 * half_width * focus_dist) * u;
        let vertical = (2.0 * half_height * focus_dist) * v;
        let lower_left = origin
            - (half_width * focus_dist) * u
            - (half_height * focus_dist) * v
            - focus_dist * w;
        Camera {
            origin,
            lower_left,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: builder.aperture / 2.0,
        }
    }

    /// Returns a ray through the image plane at normalized coordinates (s, t).
    ///
    /// (0, 0) is the lower left corner of the image and (1, 1) the upper right.
    pub fn get_ray<R: Rng>(&self, rng: &mut R, s: f64, t: f64) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * rng.gen_in_unit_disk();
            rd.x() * self.u + rd.y() * self.v
        } else {
            Vec3::default()
        };
        let origin = self.origin + offset;
        let dir = self.lower_left + s * self.horizontal + t * self.vertical - origin;
        Ray::new(origin, dir)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }
}

impl CameraBuilder {
    pub fn from(self, from: Point3) -> Self {
        CameraBuilder { from, ..self }
    }

    pub fn towards(self, towards: Point3) -> Self {
        CameraBuilder { towards, ..self }
    }

    /// The "up" hint. Must not be parallel to the viewing direction.
    pub fn up(self, vup: Vec3) -> Self {
        CameraBuilder { vup, ..self }
    }

    pub fn aperture(self, aperture: f64) -> Self {
        CameraBuilder { aperture, ..self }
    }

    pub fn focus_dist(self, focus_dist: f64) -> Self {
        CameraBuilder { focus_dist, ..self }
    }

    pub fn build(self) -> Camera {
        Camera::new(self)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;

    const EPS: f64 = 1E-8;

    #[test]
    fn basis_is_orthonormal_and_right_handed() {
        let camera = Camera::builder(20.0, 2.0)
            .from(Point3::new(-2., 2., 1.))
            .towards(Point3::new(0., 0., -1.))
            .build();

        for b in [camera.u, camera.v, camera.w].iter() {
            assert!((b.length() - 1.0).abs() < EPS);
        }
        assert!(camera.u.dot(&camera.v).abs() < EPS);
        assert!(camera.v.dot(&camera.w).abs() < EPS);
        assert!(camera.w.dot(&camera.u).abs() < EPS);
        assert!(camera.u.cross(&camera.v).rel_eq(&camera.w, EPS));
        // Up stays up.
        assert!(camera.v.y() > 0.0);
    }

    #[test]
    fn pinhole_rays_match_image_plane() {
        let camera = Camera::builder(90.0, 2.0).build();
        let mut rng = SmallRng::seed_from_u64(0);

        let center = camera.get_ray(&mut rng, 0.5, 0.5);
        assert_eq!(center.origin(), Point3::default());
        assert!(center.dir().rel_eq(&Vec3::new(0.0, 0.0, -1.0), EPS));

        let lower_left = camera.get_ray(&mut rng, 0.0, 0.0);
        assert!(lower_left.dir().rel_eq(&Vec3::new(-2.0, -1.0, -1.0), EPS));

        let upper_right = camera.get_ray(&mut rng, 1.0, 1.0);
        assert!(upper_right.dir().rel_eq(&Vec3::new(2.0, 1.0, -1.0), EPS));
    }

    #[test]
    fn defocused_rays_converge_on_focal_plane() {
        let camera = Camera::builder(40.0, 1.5)
            .from(Point3::new(3., 3., 2.))
            .towards(Point3::new(0., 0., -1.))
            .aperture(2.0)
            .focus_dist(5.0)
            .build();
        let mut rng = SmallRng::seed_from_u64(42);

        let s = 0.3;
        let t = 0.8;
        let focus_point = camera.lower_left + s * camera.horizontal + t * camera.vertical;
        let mut jittered = false;
        for _ in 0..100 {
            let ray = camera.get_ray(&mut rng, s, t);
            let offset = ray.origin() - camera.origin();
            assert!(offset.length() < 1.0 + EPS, "origin outside lens: {}", offset);
            assert!(offset.dot(&camera.w).abs() < EPS, "origin off the lens plane");
            jittered |= offset.length() > EPS;
            assert!(ray.at(1.0).rel_eq(&focus_point, 1e-6));
        }
        assert!(jittered);
    }
}
