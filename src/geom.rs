use std::fmt::Display;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Div;
use std::ops::DivAssign;
use std::ops::Mul;
use std::ops::MulAssign;
use std::ops::Neg;
use std::ops::Sub;

use rand::distributions::Distribution;
use rand::distributions::Standard;
use rand::Rng;
use serde::Deserialize;

/// A three component vector.
///
/// The same type is used for points, directions and linear RGB colors.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Vec3(f64, f64, f64);

pub type Point3 = Vec3;

/// A linear RGB color, each channel nominally within [0, 1].
pub type Color = Vec3;

impl Display for Vec3 {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(f, "({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3(x, y, z)
    }

    #[inline]
    pub const fn splat(v: f64) -> Self {
        Vec3(v, v, v)
    }

    #[inline]
    pub fn ihat() -> Self {
        Vec3::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn jhat() -> Self {
        Vec3::new(0.0, 1.0, 0.0)
    }

    #[inline]
    pub fn khat() -> Self {
        Vec3::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.1
    }
    #[inline]
    pub fn z(&self) -> f64 {
        self.2
    }

    #[inline]
    pub fn negate(&self) -> Self {
        Vec3(-self.0, -self.1, -self.2)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.square_length().sqrt()
    }

    #[inline]
    pub fn square_length(&self) -> f64 {
        self.0 * self.0 + self.1 * self.1 + self.2 * self.2
    }

    #[inline]
    pub fn mul_pointwise(&self, other: &Self) -> Vec3 {
        Vec3(self.0 * other.0, self.1 * other.1, self.2 * other.2)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0 * other.0 + self.1 * other.1 + self.2 * other.2
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Vec3(
            self.1 * other.2 - self.2 * other.1,
            self.2 * other.0 - self.0 * other.2,
            self.0 * other.1 - self.1 * other.0,
        )
    }

    /// Returns this vector scaled to unit length.
    ///
    /// The zero vector has no direction: every component of the result is NaN.
    /// Callers are expected to never normalize a zero-length vector.
    #[inline]
    pub fn unit(&self) -> Self {
        *self / self.length()
    }

    pub fn lerp(&self, to: Vec3, t: f64) -> Vec3 {
        Vec3::new(
            (1.0 - t) * self.0 + t * to.0,
            (1.0 - t) * self.1 + t * to.1,
            (1.0 - t) * self.2 + t * to.2,
        )
    }

    #[inline]
    pub fn rel_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.0 - other.0).abs() < epsilon
            && (self.1 - other.1).abs() < epsilon
            && (self.2 - other.2).abs() < epsilon
    }
}

impl Distribution<Vec3> for Standard {
    /// Each component is drawn independently from [0, 1).
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        Vec3(rng.gen(), rng.gen(), rng.gen())
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Vec3(arr[0], arr[1], arr[2])
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Vec3(0.0, 0.0, 0.0)
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Vec3(self.0 + other.0, self.1 + other.1, self.2 + other.2)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
        self.1 += other.1;
        self.2 += other.2;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Vec3(self.0 - other.0, self.1 - other.1, self.2 - other.2)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        Vec3(v.0 * self, v.1 * self, v.2 * self)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, c: f64) -> Self {
        Vec3(self.0 * c, self.1 * c, self.2 * c)
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, c: f64) {
        self.0 *= c;
        self.1 *= c;
        self.2 *= c;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, c: f64) -> Self {
        Vec3(self.0 / c, self.1 / c, self.2 / c)
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, c: f64) {
        self.0 /= c;
        self.1 /= c;
        self.2 /= c;
    }
}
