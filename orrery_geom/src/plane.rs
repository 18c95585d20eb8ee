// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Double-precision planes.

use core::fmt;

use glam::DVec3;

/// A plane `{p : dot(normal, p) + distance = 0}` with a unit normal.
///
/// The positive half-space is the side the normal points into.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    normal: DVec3,
    distance: f64,
}

impl Plane {
    /// Creates a plane from a normal and its signed distance from the origin.
    ///
    /// The normal is normalized; a zero normal stays zero.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            distance,
        }
    }

    /// Creates a plane with the given normal passing through `point`.
    pub fn from_normal_and_point(normal: DVec3, point: DVec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Creates the plane through three points, wound counter-clockwise around the normal.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self::from_normal_and_point((b - a).cross(c - a), a)
    }

    /// Unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Signed distance of the plane from the origin, along the normal.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The same plane facing the other way.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }

    /// Signed distance from the plane to `point`; positive on the normal's side.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.distance
    }

    /// Projection of `point` onto the plane.
    pub fn closest_point(&self, point: DVec3) -> DVec3 {
        point - self.normal * self.signed_distance(point)
    }

    /// True when `point` lies on the positive side or on the plane itself.
    pub fn side(&self, point: DVec3) -> bool {
        self.signed_distance(point) >= 0.0
    }

    /// True when both points get the same answer from [`Plane::side`].
    pub fn same_side(&self, a: DVec3, b: DVec3) -> bool {
        self.side(a) == self.side(b)
    }

    /// Intersection of the segment line through `p1` and `p2` with the plane.
    ///
    /// The result is interpolated from `p1` towards `p2`; it lies between them when the
    /// points are on opposite sides. Returns `None` when the line is parallel to the plane.
    pub fn raycast(&self, p1: DVec3, p2: DVec3) -> Option<DVec3> {
        let d1 = self.signed_distance(p1);
        let d2 = self.signed_distance(p2);
        let denom = d1 - d2;
        if denom == 0.0 {
            return None;
        }
        Some(p1.lerp(p2, d1 / denom))
    }

    /// The plane with `dot(normal, translation)` added to its distance.
    ///
    /// The normal is kept. Since points satisfy `dot(normal, p) + distance = 0`, the
    /// result lies at `p - translation` for each point `p` of `self`, which matches
    /// moving the origin by `translation`.
    pub fn translate(&self, translation: DVec3) -> Self {
        Self {
            normal: self.normal,
            distance: self.distance + self.normal.dot(translation),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.normal;
        write!(
            f,
            "Normal: ({:.1}, {:.1}, {:.1}), Distance: {:.1}",
            n.x, n.y, n.z, self.distance
        )
    }
}
