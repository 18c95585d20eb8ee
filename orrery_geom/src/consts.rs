// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric thresholds used by the kernel.
//!
//! These are tuned for `f64` inputs spanning planetary to astronomical magnitudes.
//! A basis column whose squared length falls outside
//! [`MIN_BASIS_LENGTH_SQ`]..[`MAX_BASIS_LENGTH_SQ`] is treated as degenerate by
//! [`look_rotation_safe`](crate::look_rotation_safe).

/// Smallest accepted squared length of a look-rotation input or of the derived side axis.
pub const MIN_BASIS_LENGTH_SQ: f64 = 1e-200;

/// Largest accepted squared length of a look-rotation input.
pub const MAX_BASIS_LENGTH_SQ: f64 = 1e200;

/// Default relative and absolute tolerance when comparing a recomposed matrix with its source.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
