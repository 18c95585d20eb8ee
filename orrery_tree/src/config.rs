// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchy configuration.

/// When setters check their inputs for NaN and infinite components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Validation {
    /// Always check.
    Always,
    /// Check only when `debug_assertions` are enabled.
    #[default]
    DebugOnly,
    /// Never check. Non-finite values propagate into every derived matrix.
    Never,
}

impl Validation {
    /// True when this build performs the check.
    pub const fn is_active(self) -> bool {
        match self {
            Self::Always => true,
            Self::DebugOnly => cfg!(debug_assertions),
            Self::Never => false,
        }
    }
}

/// Settings for a [`Hierarchy`](crate::Hierarchy).
///
/// ```
/// # #[cfg(feature = "serde")] {
/// use orrery_tree::{HierarchyConfig, Validation};
///
/// let config: HierarchyConfig = serde_json::from_str(r#"{ "validation": "always" }"#).unwrap();
/// assert_eq!(config.validation, Validation::Always);
/// # }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HierarchyConfig {
    /// Input checking for setters.
    pub validation: Validation,
}
