// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors raised when building geometry from untrusted input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeomError {
    /// A non-empty bounds was given a negative extent.
    #[error("non-empty bounds cannot have negative extents ({x}, {y}, {z})")]
    NegativeExtents {
        /// X extent.
        x: f64,
        /// Y extent.
        y: f64,
        /// Z extent.
        z: f64,
    },
}
