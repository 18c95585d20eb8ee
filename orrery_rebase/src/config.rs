// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Settings for [`DistanceThreshold`](crate::DistanceThreshold).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ThresholdConfig {
    /// Universe distance between the tracked node and the anchor that triggers a rebase.
    ///
    /// The default keeps single-precision world coordinates near the node at roughly
    /// millimeter resolution when units are meters.
    pub max_distance: f64,
}

impl ThresholdConfig {
    /// Default [`max_distance`](Self::max_distance).
    pub const DEFAULT_MAX_DISTANCE: f64 = 1.0e4;
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            max_distance: Self::DEFAULT_MAX_DISTANCE,
        }
    }
}
