// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric primitives built on nalgebra
//!
//! A strip is represented as a [`Line3`] segment; a chamber readout plane as
//! a [`Plane3`]. Rigid-transform helpers cover the few operations the
//! geometry engine needs: rotations about fixed axes, affine placement, and
//! the shortest bridge segment between two (generally skew) lines.

use nalgebra::{Isometry3, Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D line segment with a distinguished origin and end
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Line3 {
    pub origin: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line3 {
    /// Create a segment from its endpoints
    pub fn new(origin: Point3<f64>, end: Point3<f64>) -> Self {
        Self { origin, end }
    }

    /// Direction vector from origin to end (not normalized)
    pub fn direction(&self) -> Vector3<f64> {
        self.end - self.origin
    }

    /// Unit direction vector
    pub fn unit_direction(&self) -> Vector3<f64> {
        self.direction().normalize()
    }

    /// Segment length
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Segment midpoint
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.origin, &self.end)
    }

    /// Segment rotated about the z axis by `angle` radians
    pub fn rotated_z(&self, angle: f64) -> Line3 {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
        Line3::new(rot * self.origin, rot * self.end)
    }

    /// Segment rotated about the y axis by `angle` radians
    pub fn rotated_y(&self, angle: f64) -> Line3 {
        let rot = Rotation3::from_axis_angle(&Vector3::y_axis(), angle);
        Line3::new(rot * self.origin, rot * self.end)
    }

    /// Segment mapped through a rigid transform
    pub fn transformed(&self, iso: &Isometry3<f64>) -> Line3 {
        Line3::new(
            iso.transform_point(&self.origin),
            iso.transform_point(&self.end),
        )
    }

    /// Shortest bridge segment between the infinite lines through `self` and
    /// `other`
    ///
    /// For skew lines this is the unique common perpendicular. For parallel
    /// lines the bridge is the perpendicular foot dropped from `self.origin`
    /// onto `other`; its length is still the line-to-line distance, but the
    /// foot point is arbitrary along the pair.
    pub fn bridge_to(&self, other: &Line3) -> Line3 {
        let u = self.direction();
        let v = other.direction();
        let w0 = self.origin - other.origin;

        let a = u.dot(&u);
        let b = u.dot(&v);
        let c = v.dot(&v);
        let d = u.dot(&w0);
        let e = v.dot(&w0);

        let den = a * c - b * b;
        let (s, t) = if den.abs() <= 1e-12 * a * c {
            // Parallel: pin the foot on self at its origin.
            (0.0, if c > 0.0 { e / c } else { 0.0 })
        } else {
            ((b * e - c * d) / den, (a * e - b * d) / den)
        };

        Line3::new(self.origin + u * s, other.origin + v * t)
    }
}

/// A plane through a point with a (not necessarily unit) normal
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Plane3 {
    pub point: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Plane3 {
    /// Create a plane from a point and a normal
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { point, normal }
    }

    /// Normalized plane normal
    pub fn unit_normal(&self) -> Vector3<f64> {
        self.normal.normalize()
    }

    /// Signed distance from `p` to the plane, positive on the normal side
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.unit_normal().dot(&(p - self.point))
    }
}
