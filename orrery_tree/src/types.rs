// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the hierarchy: node identifiers, cache flags, and host placements.

use core::fmt;

use glam::{DMat4, Quat, Vec3};
use orrery_geom::compose;

/// Identifier for a node in the hierarchy.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Every operation given a stale id fails with
/// [`HierarchyError::StaleNode`](crate::HierarchyError::StaleNode).
///
/// `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of the slot when this id was issued.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.0, self.1)
    }
}

/// The two node kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKindTag {
    /// A coordinate anchor that maps universe space to world space.
    Root,
    /// A positioned node with its own local translation, rotation, and scale.
    Transform,
}

impl fmt::Display for NodeKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Transform => "transform",
        })
    }
}

/// How a transform interprets its stored scale.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScaleMode {
    /// Per-axis scale. Used by transforms without children.
    Anisotropic,
    /// The x component of the stored scale on all three axes. Used by transforms with children.
    Isotropic,
}

/// A settable node property, named in [`HierarchyError`](crate::HierarchyError) values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Property {
    /// Translation relative to the parent.
    LocalPosition,
    /// Rotation relative to the parent.
    LocalRotation,
    /// Scale relative to the parent.
    LocalScale,
    /// Translation in universe space.
    UniversePosition,
    /// Rotation in universe space.
    UniverseRotation,
    /// Universe position mapped to the world origin by a root.
    RootUniversePosition,
    /// Universe rotation mapped to the world axes by a root.
    RootUniverseRotation,
    /// The host's single-precision placement.
    HostPlacement,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LocalPosition => "local position",
            Self::LocalRotation => "local rotation",
            Self::LocalScale => "local scale",
            Self::UniversePosition => "universe position",
            Self::UniverseRotation => "universe rotation",
            Self::RootUniversePosition => "root universe position",
            Self::RootUniverseRotation => "root universe rotation",
            Self::HostPlacement => "host placement",
        })
    }
}

bitflags::bitflags! {
    /// Derived values a node currently holds. A set bit means the value is cached and valid.
    ///
    /// Roots only ever report [`Caches::WORLD_MATRIX`]; their local and universe values are constant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Caches: u8 {
        /// Matrix built from the local translation, rotation, and effective scale.
        const LOCAL_MATRIX      = 0b0000_0001;
        /// Rotation relative to the universe origin.
        const UNIVERSE_ROTATION = 0b0000_0010;
        /// Matrix relative to the universe origin.
        const UNIVERSE_MATRIX   = 0b0000_0100;
        /// Matrix relative to the rendering origin.
        const WORLD_MATRIX      = 0b0000_1000;
        /// The host placement reflects the current world matrix.
        const PLACEMENT         = 0b0001_0000;
    }
}

/// How many times each derived value of a node has been recomputed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Local matrix rebuilds.
    pub local_matrix: u32,
    /// Universe rotation rebuilds.
    pub universe_rotation: u32,
    /// Universe matrix rebuilds.
    pub universe_matrix: u32,
    /// World matrix rebuilds.
    pub world_matrix: u32,
    /// Host placement rewrites.
    pub placement: u32,
}

/// Single-precision placement of the host object that mirrors a node.
///
/// What the fields mean depends on the node:
/// - Root: the host object's world placement.
/// - Transform without children: world translation and rotation, plus the local scale.
/// - Transform with children: pinned to zero translation, identity rotation, and the uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Translation.
    pub translation: Vec3,
    /// Rotation.
    pub rotation: Quat,
    /// Scale.
    pub scale: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Placement at `translation` with no rotation and unit scale.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// True when no component is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// The placement as a double-precision `T · R · S` matrix.
    pub fn to_matrix(&self) -> DMat4 {
        compose(
            self.translation.as_dvec3(),
            self.rotation.as_dquat(),
            self.scale.as_dvec3(),
        )
    }
}
