// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orrery Geom: double-precision geometry for transform hierarchies that span planetary distances.
//!
//! This crate is the leaf of the Orrery family and has no notion of a hierarchy.
//! It builds on [`glam`]'s `f64` types (`DVec3`, `DQuat`, `DMat4`) and adds:
//!
//! - A TRS kernel: [`compose`] and [`decompose`] with signed per-axis scale, a
//!   degenerate-safe [`look_rotation_safe`], homogeneous point/vector transforms,
//!   Euler ZXY and axis-angle helpers in degrees.
//! - [`Plane`]: a unit normal plus signed distance, with side tests and segment raycasts.
//! - [`Bounds`]: center/extents boxes with an explicit empty state and a projective
//!   transform that can clip against a [`Plane`] before the perspective divide.
//!
//! ## Numeric thresholds
//!
//! The tolerances used to reject degenerate bases live in [`consts`]. They are far
//! wider than their `f32` counterparts so that a scale of `1e-80` or a translation of
//! `1e15` still decomposes cleanly.
//!
//! ## Features
//!
//! - `std` (enabled by default): use the platform math library through glam.
//! - `libm`: use glam's `libm` backend instead, for `no_std` targets.
//!
//! This crate is `no_std`.
//!
//! ## Serialization
//!
//! With the default `serde` feature, [`Bounds`] and [`Plane`] implement `Serialize`
//! and `Deserialize`. Deserializing a non-empty bounds with negative extents fails
//! with [`GeomError::NegativeExtents`].
//!
//! ## Example
//!
//! ```rust
//! use glam::{DQuat, DVec3};
//! use orrery_geom::{Bounds, compose, transform_point};
//!
//! let m = compose(DVec3::new(6.4e6, 0.0, 0.0), DQuat::IDENTITY, DVec3::splat(2.0));
//! assert_eq!(transform_point(&m, DVec3::X), DVec3::new(6.4e6 + 2.0, 0.0, 0.0));
//!
//! let b = Bounds::from_center_extents(DVec3::ZERO, DVec3::ONE).transform(&m);
//! assert_eq!(b.center(), DVec3::new(6.4e6, 0.0, 0.0));
//! assert_eq!(b.extents(), DVec3::splat(2.0));
//! ```

#![no_std]

mod bounds;
pub mod consts;
mod error;
mod plane;
mod trs;

pub use bounds::Bounds;
pub use error::GeomError;
pub use plane::Plane;
pub use trs::{
    Trs, axis_angle_degrees, compose, copy_sign, decompose, euler_zxy_degrees,
    look_rotation_safe, matrix_rotation, matrix_scale, matrix_translation,
    to_euler_zxy_degrees, transform_point, transform_vector,
};
