use rand::Rng;

use crate::geom::Vec3;

/// Sampling helpers used by the camera and materials.
pub trait RandUtil: Rng {
    /// A point uniformly distributed within the unit ball.
    fn gen_in_unit_sphere(&mut self) -> Vec3;

    /// A point uniformly distributed within the unit disk on the z = 0 plane.
    fn gen_in_unit_disk(&mut self) -> Vec3;
}

impl<R> RandUtil for R
where
    R: Rng,
{
    fn gen_in_unit_sphere(&mut self) -> Vec3 {
        // Rejection sampling from the enclosing cube accepts about 52% of draws.
        loop {
            let v = 2.0 * self.gen::<Vec3>() - Vec3::splat(1.0);
            if v.square_length() < 1.0 {
                return v;
            }
        }
    }

    fn gen_in_unit_disk(&mut self) -> Vec3 {
        loop {
            let v = 2.0 * Vec3::new(self.gen(), self.gen(), 0.0) - Vec3::new(1.0, 1.0, 0.0);
            if v.square_length() < 1.0 {
                return v;
            }
        }
    }
}
