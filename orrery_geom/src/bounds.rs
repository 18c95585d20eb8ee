// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounds stored as center and extents, with a distinguished empty state.
//!
//! ## Projective transforms and clipping
//!
//! For an affine matrix, [`Bounds::transform`] carries the center through the matrix and
//! grows the extents by the absolute linear part, so an identity transform is exact at
//! any magnitude. Otherwise it maps the eight corners (perspective divide included) and
//! takes the axis-aligned hull of the results. Under a projection, corners behind the
//! eye produce flipped or exploded coordinates, so
//! [`Bounds::transform_clipped`] first replaces every corner on the negative side of a
//! clip plane by the intersections of its edges with that plane.
//!
//! ```
//! use glam::{DMat3, DMat4, DVec3, DVec4};
//! use orrery_geom::{Bounds, Plane};
//!
//! let cube = Bounds::from_center_extents(DVec3::ZERO, DVec3::ONE);
//! let clip = Plane::new(DVec3::X, 0.0);
//! let kept = cube.transform_clipped(&DMat4::IDENTITY, &clip);
//! assert_eq!(kept.min().x, 0.0);
//! assert_eq!(kept.max().x, 1.0);
//! ```

use core::fmt;

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::GeomError;
use crate::plane::Plane;
use crate::trs::transform_point;

/// Axis-aligned bounding box in double precision.
///
/// Equality is exact on center, extents, and the empty flag.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawBounds", into = "RawBounds")
)]
pub struct Bounds {
    center: DVec3,
    extents: DVec3,
    empty: bool,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bounds {
    /// Bounds holding no geometry. Its extents are negative so that `min > max`.
    pub const EMPTY: Self = Self {
        center: DVec3::ZERO,
        extents: DVec3::NEG_ONE,
        empty: true,
    };

    /// Creates bounds from a center and a full size (twice the extents).
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        Self::from_center_extents(center, 0.5 * size)
    }

    /// Creates bounds from a center and half-sizes.
    ///
    /// Extents must be non-negative; this is checked in debug builds only.
    /// Use [`Bounds::try_from_center_extents`] for untrusted input.
    pub fn from_center_extents(center: DVec3, extents: DVec3) -> Self {
        debug_assert!(
            extents.cmpge(DVec3::ZERO).all(),
            "bounds extents cannot be negative: {extents}"
        );
        Self {
            center,
            extents,
            empty: false,
        }
    }

    /// Creates bounds from a center and half-sizes, rejecting negative extents.
    pub fn try_from_center_extents(center: DVec3, extents: DVec3) -> Result<Self, GeomError> {
        if extents.cmplt(DVec3::ZERO).any() {
            return Err(GeomError::NegativeExtents {
                x: extents.x,
                y: extents.y,
                z: extents.z,
            });
        }
        Ok(Self {
            center,
            extents,
            empty: false,
        })
    }

    /// Creates the bounds spanning `min..=max`.
    pub fn from_min_max(min: DVec3, max: DVec3) -> Self {
        Self::from_center_size(0.5 * (min + max), max - min)
    }

    /// Center point. Meaningless for [`Bounds::EMPTY`].
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Half-sizes along each axis.
    pub fn extents(&self) -> DVec3 {
        self.extents
    }

    /// True for the empty bounds.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> DVec3 {
        self.center - self.extents
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> DVec3 {
        self.center + self.extents
    }

    /// Full size along each axis.
    pub fn size(&self) -> DVec3 {
        self.extents * 2.0
    }

    /// The eight corners. Bit 2 of the index selects +x, bit 1 +y, bit 0 +z,
    /// so corners `i` and `i ^ 1`, `i ^ 2`, `i ^ 4` share an edge.
    pub fn corners(&self) -> [DVec3; 8] {
        let sign = |bit: bool| if bit { 1.0 } else { -1.0 };
        core::array::from_fn(|i| {
            let s = DVec3::new(sign(i & 4 != 0), sign(i & 2 != 0), sign(i & 1 != 0));
            self.center + s * self.extents
        })
    }

    /// True when both bounds are non-empty and overlap (touching counts).
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.empty || other.empty {
            return false;
        }
        self.min().cmple(other.max()).all() && other.min().cmple(self.max()).all()
    }

    /// True when both bounds are non-empty and `other` lies entirely inside `self`.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        if self.empty || other.empty {
            return false;
        }
        self.min().cmple(other.min()).all() && self.max().cmpge(other.max()).all()
    }

    /// True when `point` lies inside or on the boundary.
    pub fn contains_point(&self, point: DVec3) -> bool {
        !self.empty && self.min().cmple(point).all() && point.cmple(self.max()).all()
    }

    /// The overlapping region, or [`Bounds::EMPTY`] when the two do not intersect.
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects(other) {
            return Self::EMPTY;
        }
        Self::from_min_max(self.min().max(other.min()), self.max().min(other.max()))
    }

    /// The smallest bounds enclosing both. Empty operands are ignored.
    pub fn union(&self, other: &Self) -> Self {
        match (self.empty, other.empty) {
            (true, _) => *other,
            (_, true) => *self,
            _ => Self::from_min_max(self.min().min(other.min()), self.max().max(other.max())),
        }
    }

    /// Axis-aligned bounds of the box after a transform.
    ///
    /// Affine matrices (last row `0, 0, 0, 1`) move the center and widen the extents by
    /// the absolute linear part. Projective matrices take the hull of the transformed corners.
    pub fn transform(&self, matrix: &DMat4) -> Self {
        if self.empty || matrix.row(3) != DVec4::W {
            return self.transform_impl(matrix, None);
        }
        let linear = DMat3::from_mat4(*matrix);
        let extents = linear.x_axis.abs() * self.extents.x
            + linear.y_axis.abs() * self.extents.y
            + linear.z_axis.abs() * self.extents.z;
        Self {
            center: transform_point(matrix, self.center),
            extents,
            empty: false,
        }
    }

    /// Like [`Bounds::transform`], but only the part on the positive side of `clip` is kept.
    ///
    /// A corner behind the plane is replaced by the intersection of the plane with each
    /// edge leading to a corner in front of it. Returns [`Bounds::EMPTY`] when the whole
    /// box is behind the plane.
    pub fn transform_clipped(&self, matrix: &DMat4, clip: &Plane) -> Self {
        self.transform_impl(matrix, Some(clip))
    }

    fn transform_impl(&self, matrix: &DMat4, clip: Option<&Plane>) -> Self {
        if self.empty {
            return Self::EMPTY;
        }

        let corners = self.corners();
        let mut hull = Hull::default();

        for (i, &corner) in corners.iter().enumerate() {
            match clip {
                Some(plane) if !plane.side(corner) => {
                    for neighbour in [i ^ 0x01, i ^ 0x02, i ^ 0x04] {
                        let other = corners[neighbour];
                        if !plane.side(other) {
                            continue;
                        }
                        if let Some(hit) = plane.raycast(corner, other) {
                            hull.add(transform_point(matrix, hit));
                        }
                    }
                }
                _ => hull.add(transform_point(matrix, corner)),
            }
        }

        hull.finish()
    }
}

/// Running min/max of transformed points.
#[derive(Default)]
struct Hull(Option<(DVec3, DVec3)>);

impl Hull {
    fn add(&mut self, p: DVec3) {
        self.0 = Some(match self.0 {
            None => (p, p),
            Some((lo, hi)) => (lo.min(p), hi.max(p)),
        });
    }

    fn finish(self) -> Bounds {
        match self.0 {
            Some((lo, hi)) => Bounds::from_min_max(lo, hi),
            None => Bounds::EMPTY,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            return f.write_str("Empty");
        }
        let (c, e) = (self.center, self.extents);
        write!(
            f,
            "Center: ({:.1}, {:.1}, {:.1}), Extents: ({:.1}, {:.1}, {:.1})",
            c.x, c.y, c.z, e.x, e.y, e.z
        )
    }
}

/// Wire form: the empty flag travels explicitly next to the sentinel extents.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawBounds {
    center: DVec3,
    extents: DVec3,
    #[serde(default)]
    empty: bool,
}

#[cfg(feature = "serde")]
impl From<Bounds> for RawBounds {
    fn from(b: Bounds) -> Self {
        Self {
            center: b.center,
            extents: b.extents,
            empty: b.empty,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawBounds> for Bounds {
    type Error = GeomError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        if raw.empty {
            return Ok(Self::EMPTY);
        }
        Self::try_from_center_extents(raw.center, raw.extents)
    }
}
