use std::fmt::Display;

use auto_ops::{impl_op_ex, impl_op_ex_commutative};
use serde::{Deserialize, Serialize};

use crate::utils::kinematics;

/// A vector with three components, used for both momenta and positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// The $`x`$ component
    pub x: f64,
    /// The $`y`$ component
    pub y: f64,
    /// The $`z`$ component
    pub z: f64,
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:6.3}, {:6.3}, {:6.3}]", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(value: Vec3) -> Self {
        [value.x, value.y, value.z]
    }
}

impl Vec3 {
    /// Create a new 3-vector from its components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    /// The $`x`$ component, read as a momentum
    pub fn px(&self) -> f64 {
        self.x
    }
    /// The $`y`$ component, read as a momentum
    pub fn py(&self) -> f64 {
        self.y
    }
    /// The $`z`$ component, read as a momentum
    pub fn pz(&self) -> f64 {
        self.z
    }
    /// Convert a 3-momentum into a 4-momentum with the given mass
    pub fn with_mass(&self, mass: f64) -> Vec4 {
        let e = (mass.powi(2) + self.mag2()).sqrt();
        Vec4::new(self.x, self.y, self.z, e)
    }
    /// Convert a 3-momentum into a 4-momentum with the given energy
    pub fn with_energy(&self, energy: f64) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, energy)
    }
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
    pub fn mag2(&self) -> f64 {
        self.dot(self)
    }
    pub fn mag(&self) -> f64 {
        kinematics::p(self.x, self.y, self.z)
    }
    /// The magnitude of the component transverse to the $`z`$ axis
    ///
    /// See [`kinematics::pt`].
    pub fn pt(&self) -> f64 {
        kinematics::pt(self.x, self.y)
    }
    /// The distance from the $`z`$ axis, the same value as [`Vec3::pt`] for a position
    pub fn r(&self) -> f64 {
        kinematics::r(self.x, self.y)
    }
    /// The pseudorapidity, see [`kinematics::eta`] for the behavior along the beam axis
    pub fn eta(&self) -> f64 {
        kinematics::eta(self.x, self.y, self.z)
    }
    pub fn costheta(&self) -> f64 {
        kinematics::cos_theta(self.x, self.y, self.z)
    }
    pub fn theta(&self) -> f64 {
        kinematics::theta(self.x, self.y, self.z)
    }
    pub fn phi(&self) -> f64 {
        kinematics::phi(self.x, self.y)
    }
    /// The unit vector along this direction. The null vector is returned unchanged.
    pub fn unit(&self) -> Self {
        let mag = self.mag();
        if mag == 0.0 {
            return *self;
        }
        *self / mag
    }
    /// The component transverse to the $`z`$ axis
    pub fn transverse(&self) -> Self {
        Self::new(self.x, self.y, 0.0)
    }
    /// The component along the $`z`$ axis
    pub fn longitudinal(&self) -> Self {
        Self::new(0.0, 0.0, self.z)
    }
    /// The angle between this vector and `other`, or zero when they are orthogonal
    pub fn angle_between(&self, other: &Self) -> f64 {
        let dot = self.dot(other);
        if dot == 0.0 {
            return 0.0;
        }
        (dot / (self.mag() * other.mag())).acos()
    }
    /// The projection of this vector onto `other`, or this vector's magnitude if `other` is null
    pub fn projection(&self, other: &Self) -> f64 {
        let norm = other.mag();
        if norm == 0.0 {
            return self.mag();
        }
        self.dot(other) / norm
    }
    /// Build a vector from spherical coordinates
    pub fn from_spherical(r: f64, theta: f64, phi: f64) -> Self {
        let (sth, cth) = theta.sin_cos();
        let (sph, cph) = phi.sin_cos();
        Self::new(r * sth * cph, r * sth * sph, r * cth)
    }
}

impl_op_ex!(+ |a: &Vec3, b: &Vec3| -> Vec3 { Vec3::new(a.x + b.x, a.y + b.y, a.z + b.z) });
impl_op_ex!(-|a: &Vec3, b: &Vec3| -> Vec3 { Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z) });
impl_op_ex!(-|a: &Vec3| -> Vec3 { Vec3::new(-a.x, -a.y, -a.z) });
impl_op_ex_commutative!(*|a: &Vec3, b: &f64| -> Vec3 { Vec3::new(a.x * b, a.y * b, a.z * b) });
impl_op_ex!(/ |a: &Vec3, b: &f64| -> Vec3 { Vec3::new(a.x / b, a.y / b, a.z / b) });

impl std::iter::Sum for Vec3 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Vec3::default(), |a, b| a + b)
    }
}

/// A four-momentum with spatial components `x`, `y`, `z` and energy `t`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec4 {
    /// The $`p_x`$ component
    pub x: f64,
    /// The $`p_y`$ component
    pub y: f64,
    /// The $`p_z`$ component
    pub z: f64,
    /// The energy component
    pub t: f64,
}

impl Display for Vec4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:6.3}, {:6.3}, {:6.3}; {:6.3}]",
            self.x, self.y, self.z, self.t
        )
    }
}

impl Vec4 {
    /// Create a new 4-vector from its momentum components and energy
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self {
            x: px,
            y: py,
            z: pz,
            t: e,
        }
    }
    pub fn px(&self) -> f64 {
        self.x
    }
    pub fn py(&self) -> f64 {
        self.y
    }
    pub fn pz(&self) -> f64 {
        self.z
    }
    pub fn e(&self) -> f64 {
        self.t
    }
    /// The spatial part of the 4-vector
    pub fn vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
    pub fn beta(&self) -> Vec3 {
        self.vec3() / self.t
    }
    pub fn gamma(&self) -> f64 {
        self.t / self.m()
    }
    pub fn m2(&self) -> f64 {
        self.t * self.t - self.vec3().mag2()
    }
    pub fn m(&self) -> f64 {
        self.m2().sqrt()
    }
    pub fn pt(&self) -> f64 {
        self.vec3().pt()
    }
    pub fn eta(&self) -> f64 {
        self.vec3().eta()
    }
    /// Boost the 4-vector by the given velocity
    pub fn boost(&self, beta: &Vec3) -> Self {
        let b2 = beta.mag2();
        if b2 == 0.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let p3 = self.vec3() + beta * ((gamma - 1.0) * self.vec3().dot(beta) / b2 + gamma * self.t);
        Self::new(p3.x, p3.y, p3.z, gamma * (self.t + beta.dot(&self.vec3())))
    }
    /// A compact textual form listing the components, used for event listings
    pub fn to_p4_string(&self) -> String {
        format!(
            "[e = {:.5}; p = ({:.5}, {:.5}, {:.5}); m = {:.5}]",
            self.t,
            self.x,
            self.y,
            self.z,
            self.m()
        )
    }
}

impl_op_ex!(+ |a: &Vec4, b: &Vec4| -> Vec4 { Vec4::new(a.x + b.x, a.y + b.y, a.z + b.z, a.t + b.t) });
impl_op_ex!(-|a: &Vec4, b: &Vec4| -> Vec4 { Vec4::new(a.x - b.x, a.y - b.y, a.z - b.z, a.t - b.t) });
impl_op_ex!(-|a: &Vec4| -> Vec4 { Vec4::new(-a.x, -a.y, -a.z, -a.t) });

impl std::iter::Sum for Vec4 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Vec4::default(), |a, b| a + b)
    }
}
