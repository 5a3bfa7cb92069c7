//! Geometric primitives.
//!
//! These are the point/vector/line/box types the host geometry kernel
//! provides in-process. All coordinates are `f64` in the host's internal
//! length units (decimal feet).

mod line;

pub use line::Line3;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate (elevation axis).
    pub z: f64,
}

impl Point3 {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: Self) -> f64 {
        (other - *self).length()
    }

    /// Squared distance to another point.
    ///
    /// Cheaper than [`Self::distance_to`] when only comparing distances.
    #[must_use]
    pub fn distance_squared_to(&self, other: Self) -> f64 {
        (other - *self).length_squared()
    }

    /// Returns this point translated by a vector.
    #[must_use]
    pub fn translated(&self, offset: Vector3) -> Self {
        *self + offset
    }
}

impl Add<Vector3> for Point3 {
    type Output = Self;

    fn add(self, rhs: Vector3) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A direction or displacement in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector along the Z (elevation) axis.
    pub const UP: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared vector length.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.z.mul_add(other.z, self.x.mul_add(other.x, self.y * other.y))
    }

    /// Cross product.
    #[must_use]
    pub fn cross(&self, other: Self) -> Self {
        Self::new(
            self.y.mul_add(other.z, -(self.z * other.y)),
            self.z.mul_add(other.x, -(self.x * other.z)),
            self.x.mul_add(other.y, -(self.y * other.x)),
        )
    }

    /// Returns the unit vector in this direction, or `None` for a vector
    /// of (near-)zero length.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len < 1.0e-12 {
            return None;
        }
        Some(*self * (1.0 / len))
    }

    /// True when the two directions point within `tolerance` of exactly
    /// opposite ways. Both inputs must already be unit vectors; the
    /// comparison is `dot <= -(1 - tolerance)`.
    #[must_use]
    pub fn is_anti_parallel(&self, other: Self, tolerance: f64) -> bool {
        self.dot(other) <= -(1.0 - tolerance)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Creates a bounding box from two opposite corners.
    ///
    /// The corners are sorted per axis, so the arguments may be given in
    /// any order.
    #[must_use]
    pub fn from_corners(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// A degenerate box containing a single point.
    #[must_use]
    pub const fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// The smallest box containing both inputs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }
}
