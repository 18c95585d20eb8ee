// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation/rotation/scale composition and decomposition.
//!
//! Matrices are column-major `glam::DMat4` values with the translation in the
//! last column. [`compose`] builds `T · R · S`; [`decompose`] recovers the
//! three parts using a look-rotation built from the third and second basis
//! columns, which keeps per-axis scale *signed*: a negative component means
//! that axis is mirrored.
//!
//! ```
//! use glam::{DQuat, DVec3};
//! use orrery_geom::{compose, decompose};
//!
//! let rotation = DQuat::from_rotation_y(0.5);
//! let m = compose(DVec3::new(1.0e9, 0.0, -4.0), rotation, DVec3::new(2.0, 3.0, 4.0));
//! let trs = decompose(&m);
//! assert!(trs.scale.abs_diff_eq(DVec3::new(2.0, 3.0, 4.0), 1e-12));
//! assert!(trs.translation == DVec3::new(1.0e9, 0.0, -4.0));
//! ```

use glam::{DMat3, DMat4, DQuat, DVec3, EulerRot};
use tracing::trace;

use crate::consts::{MAX_BASIS_LENGTH_SQ, MIN_BASIS_LENGTH_SQ};

/// A decomposed translation, rotation, and scale triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trs {
    /// Translation (last matrix column).
    pub translation: DVec3,
    /// Rotation as a unit quaternion.
    pub rotation: DQuat,
    /// Signed per-axis scale, expressed in the rotated frame.
    pub scale: DVec3,
}

impl Default for Trs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Trs {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    /// Creates a triple from its parts.
    pub const fn new(translation: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Decomposes `matrix`. See [`decompose`].
    pub fn from_matrix(matrix: &DMat4) -> Self {
        decompose(matrix)
    }

    /// Composes the triple into a matrix. See [`compose`].
    pub fn to_matrix(&self) -> DMat4 {
        compose(self.translation, self.rotation, self.scale)
    }

    /// True when no component is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// Builds `translate · rotate · scale`.
///
/// Scale multiplies the rotated basis columns, so non-uniform scale is applied in
/// the rotated local frame rather than along world axes.
pub fn compose(translation: DVec3, rotation: DQuat, scale: DVec3) -> DMat4 {
    let r = DMat3::from_quat(rotation);
    DMat4::from_cols(
        (r.x_axis * scale.x).extend(0.0),
        (r.y_axis * scale.y).extend(0.0),
        (r.z_axis * scale.z).extend(0.0),
        translation.extend(1.0),
    )
}

/// Recovers translation, rotation, and signed scale from `matrix`.
///
/// This is not a polar decomposition. The rotation is
/// [`look_rotation_safe`]`(third column, second column)` and each scale component is
/// the dot product of the original basis column with the matching rotated unit axis.
/// Degenerate columns yield an identity rotation rather than an error.
pub fn decompose(matrix: &DMat4) -> Trs {
    let x = matrix.x_axis.truncate();
    let y = matrix.y_axis.truncate();
    let z = matrix.z_axis.truncate();

    let rotation = look_rotation_safe(z, y);
    let scale = DVec3::new(
        x.dot(rotation * DVec3::X),
        y.dot(rotation * DVec3::Y),
        z.dot(rotation * DVec3::Z),
    );

    Trs {
        translation: matrix.w_axis.truncate(),
        rotation,
        scale,
    }
}

/// Rotation whose +Z axis points along `forward` and whose +Y axis is as close to `up` as possible.
///
/// Inputs need not be normalized or orthogonal. Returns [`DQuat::IDENTITY`] when either
/// input is zero-length, too large, non-finite, or when the two are parallel.
pub fn look_rotation_safe(forward: DVec3, up: DVec3) -> DQuat {
    let forward_len_sq = forward.length_squared();
    let up_len_sq = up.length_squared();
    let f = forward * forward.length_recip();
    let u = up * up.length_recip();

    let side = u.cross(f);
    let side_len_sq = side.length_squared();
    let s = side * side.length_recip();

    let shortest = forward_len_sq.min(up_len_sq).min(side_len_sq);
    let longest = forward_len_sq.max(up_len_sq).max(side_len_sq);
    let accept = shortest > MIN_BASIS_LENGTH_SQ
        && longest < MAX_BASIS_LENGTH_SQ
        && forward_len_sq.is_finite()
        && up_len_sq.is_finite()
        && side_len_sq.is_finite();

    if !accept {
        trace!(?forward, ?up, "degenerate look rotation, using identity");
        return DQuat::IDENTITY;
    }

    DQuat::from_mat3(&DMat3::from_cols(s, f.cross(s), f))
}

/// Rotation part of `matrix`, as computed by [`decompose`].
pub fn matrix_rotation(matrix: &DMat4) -> DQuat {
    look_rotation_safe(matrix.z_axis.truncate(), matrix.y_axis.truncate())
}

/// Signed scale part of `matrix`, as computed by [`decompose`].
pub fn matrix_scale(matrix: &DMat4) -> DVec3 {
    decompose(matrix).scale
}

/// Translation part of `matrix`.
pub fn matrix_translation(matrix: &DMat4) -> DVec3 {
    matrix.w_axis.truncate()
}

/// Transforms a point with `w = 1`, including the perspective divide.
pub fn transform_point(matrix: &DMat4, point: DVec3) -> DVec3 {
    let r = *matrix * point.extend(1.0);
    r.truncate() * r.w.recip()
}

/// Transforms a direction with `w = 0` (translation and projection are ignored).
pub fn transform_vector(matrix: &DMat4, vector: DVec3) -> DVec3 {
    (*matrix * vector.extend(0.0)).truncate()
}

/// Returns `dst` with each component's sign flipped where it disagrees with `src`.
///
/// A zero in either input counts as agreeing.
pub fn copy_sign(src: DVec3, dst: DVec3) -> DVec3 {
    let pick = |s: f64, d: f64| if s * d >= 0.0 { d } else { -d };
    DVec3::new(
        pick(src.x, dst.x),
        pick(src.y, dst.y),
        pick(src.z, dst.z),
    )
}

/// Rotation about `axis` by `degrees`. A zero axis yields the identity.
pub fn axis_angle_degrees(axis: DVec3, degrees: f64) -> DQuat {
    let axis = axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    DQuat::from_axis_angle(axis, degrees.to_radians())
}

/// Rotation from Euler angles in degrees, applied about z first, then x, then y.
pub fn euler_zxy_degrees(degrees: DVec3) -> DQuat {
    DQuat::from_euler(
        EulerRot::YXZ,
        degrees.y.to_radians(),
        degrees.x.to_radians(),
        degrees.z.to_radians(),
    )
}

/// Inverse of [`euler_zxy_degrees`]; returns `(x, y, z)` angles in degrees.
pub fn to_euler_zxy_degrees(rotation: DQuat) -> DVec3 {
    let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
    DVec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    fn same_rotation(a: DQuat, b: DQuat) -> bool {
        let d = a.dot(b);
        d * d > 1.0 - 1e-12
    }

    #[test]
    fn compose_identity_is_identity() {
        let m = compose(DVec3::ZERO, DQuat::IDENTITY, DVec3::ONE);
        assert_eq!(m, DMat4::IDENTITY, "identity TRS must compose to identity");
    }

    #[test]
    fn compose_matches_glam_srt() {
        let t = DVec3::new(3.0, -2.0, 8.0);
        let r = DQuat::from_rotation_x(0.3) * DQuat::from_rotation_z(-1.1);
        let s = DVec3::new(2.0, 0.5, 7.0);
        let ours = compose(t, r, s);
        let glams = DMat4::from_scale_rotation_translation(s, r, t);
        assert!(ours.abs_diff_eq(glams, 1e-12), "compose must equal T*R*S");
    }

    #[test]
    fn scale_is_expressed_in_rotated_frame() {
        let r = DQuat::from_rotation_z(FRAC_PI_2);
        let m = compose(DVec3::ZERO, r, DVec3::new(2.0, 1.0, 1.0));
        // Local +X is scaled by two, then rotated onto world +Y.
        let p = transform_point(&m, DVec3::X);
        assert!(p.abs_diff_eq(DVec3::new(0.0, 2.0, 0.0), 1e-12), "got {p}");
    }

    #[test]
    fn decompose_recovers_parts() {
        let t = DVec3::new(6.4e6, -1.0, 2.5e-3);
        let r = DQuat::from_rotation_y(FRAC_PI_3) * DQuat::from_rotation_x(0.2);
        let s = DVec3::new(1.5, 2.0, 0.25);
        let trs = decompose(&compose(t, r, s));
        assert_eq!(trs.translation, t, "translation is copied verbatim");
        assert!(same_rotation(trs.rotation, r), "rotation {:?}", trs.rotation);
        assert!(trs.scale.abs_diff_eq(s, 1e-12), "scale {}", trs.scale);
    }

    #[test]
    fn single_mirrored_axis_keeps_signed_scale() {
        let r = DQuat::from_rotation_y(0.7);
        let s = DVec3::new(-2.0, 3.0, 4.0);
        let m = compose(DVec3::ONE, r, s);
        let trs = decompose(&m);
        assert!(trs.scale.abs_diff_eq(s, 1e-12), "scale {}", trs.scale);
        assert!(trs.to_matrix().abs_diff_eq(m, 1e-12), "recomposition");
    }

    #[test]
    fn mirrored_forward_axis_recomposes() {
        let r = DQuat::from_rotation_x(0.4);
        let m = compose(DVec3::ZERO, r, DVec3::new(2.0, 3.0, -4.0));
        let trs = decompose(&m);
        // The sign moves onto x with a half-turn folded into the rotation.
        assert!(
            trs.scale.abs_diff_eq(DVec3::new(-2.0, 3.0, 4.0), 1e-12),
            "scale {}",
            trs.scale
        );
        assert!(trs.to_matrix().abs_diff_eq(m, 1e-12), "recomposition");
    }

    #[test]
    fn degenerate_columns_fall_back_to_identity() {
        let mut m = DMat4::IDENTITY;
        m.z_axis = glam::DVec4::ZERO;
        assert_eq!(matrix_rotation(&m), DQuat::IDENTITY, "zero forward");

        let parallel = DMat4::from_cols(
            glam::DVec4::X,
            glam::DVec4::Z,
            glam::DVec4::Z,
            glam::DVec4::W,
        );
        assert_eq!(matrix_rotation(&parallel), DQuat::IDENTITY, "parallel columns");

        let nan = look_rotation_safe(DVec3::new(f64::NAN, 0.0, 1.0), DVec3::Y);
        assert_eq!(nan, DQuat::IDENTITY, "non-finite forward");
    }

    #[test]
    fn look_rotation_orthogonalizes_up() {
        let q = look_rotation_safe(DVec3::new(0.0, 0.0, 5.0), DVec3::new(0.0, 1.0, 1.0));
        assert!(same_rotation(q, DQuat::IDENTITY), "got {q:?}");
    }

    #[test]
    fn huge_but_finite_scale_is_accepted() {
        let s = DVec3::splat(1.0e20);
        let trs = decompose(&compose(DVec3::ZERO, DQuat::IDENTITY, s));
        assert_eq!(trs.rotation, DQuat::IDENTITY, "rotation");
        assert!(
            (trs.scale - s).abs().max_element() < 1.0e5,
            "scale {}",
            trs.scale
        );
    }

    #[test]
    fn homogeneous_point_divides_by_w() {
        let mut m = DMat4::IDENTITY;
        m.w_axis.w = 2.0;
        let p = transform_point(&m, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(p, DVec3::new(1.0, 2.0, 3.0), "perspective divide");
        let v = transform_vector(&compose(DVec3::splat(9.0), DQuat::IDENTITY, DVec3::ONE), DVec3::X);
        assert_eq!(v, DVec3::X, "vectors ignore translation");
    }

    #[test]
    fn copy_sign_follows_source() {
        let out = copy_sign(DVec3::new(-1.0, 2.0, 0.0), DVec3::new(3.0, -4.0, -5.0));
        assert_eq!(out, DVec3::new(-3.0, 4.0, -5.0), "zero source keeps dst");
    }

    #[test]
    fn euler_round_trip() {
        let angles = DVec3::new(10.0, 20.0, 30.0);
        let back = to_euler_zxy_degrees(euler_zxy_degrees(angles));
        assert!(back.abs_diff_eq(angles, 1e-9), "got {back}");
    }

    #[test]
    fn euler_applies_z_then_x_then_y() {
        let q = euler_zxy_degrees(DVec3::new(90.0, 90.0, 0.0));
        let expected = DQuat::from_rotation_y(FRAC_PI_2) * DQuat::from_rotation_x(FRAC_PI_2);
        assert!(same_rotation(q, expected), "got {q:?}");
    }

    #[test]
    fn axis_angle_zero_axis_is_identity() {
        assert_eq!(axis_angle_degrees(DVec3::ZERO, 45.0), DQuat::IDENTITY, "zero axis");
        let q = axis_angle_degrees(DVec3::new(0.0, 2.0, 0.0), 90.0);
        assert!(same_rotation(q, DQuat::from_rotation_y(FRAC_PI_2)), "got {q:?}");
    }
}
