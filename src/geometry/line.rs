//! Bounded straight lines.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, Point3, Vector3};

/// A bounded straight line between two points.
///
/// This is the only curve kind the engine operates on: segment re-cutting
/// relocates one extremity and keeps the other, which is only meaningful
/// for straight runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3 {
    start: Point3,
    end: Point3,
}

impl Line3 {
    /// Creates a line between two points.
    #[must_use]
    pub const fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Start extremity.
    #[must_use]
    pub const fn start(&self) -> Point3 {
        self.start
    }

    /// End extremity.
    #[must_use]
    pub const fn end(&self) -> Point3 {
        self.end
    }

    /// Line length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Unit direction from start to end, or `None` for a degenerate line.
    #[must_use]
    pub fn direction(&self) -> Option<Vector3> {
        (self.end - self.start).normalized()
    }

    /// Returns this line translated by a vector.
    #[must_use]
    pub fn translated(&self, offset: Vector3) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// The point at parameter `t`, where 0 is the start and 1 the end.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.start + (self.end - self.start) * t
    }

    /// Parameter of the unclamped projection of `point` onto the line's
    /// axis. 0 maps to the start, 1 to the end; values outside `[0, 1]`
    /// lie beyond the extremities.
    #[must_use]
    pub fn closest_parameter(&self, point: Point3) -> f64 {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        if len_sq < 1.0e-24 {
            return 0.0;
        }
        (point - self.start).dot(axis) / len_sq
    }

    /// Distance from `point` to its unclamped projection on the line's
    /// axis (perpendicular distance to the infinite carrier line).
    #[must_use]
    pub fn distance_to_axis(&self, point: Point3) -> f64 {
        let t = self.closest_parameter(point);
        point.distance_to(self.point_at(t))
    }

    /// Axis-aligned bounding box of the line.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.start, self.end)
    }
}
