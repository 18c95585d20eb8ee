// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orrery Tree: a double-precision transform hierarchy with a movable rendering origin.
//!
//! Scenes that span planetary or interplanetary distances cannot be positioned in `f32`
//! without visible jitter. Orrery Tree keeps every node's local state in `f64` and maps a
//! chosen point of the *universe* onto the origin of the host's `f32` *world*.
//!
//! - A root is an anchor: its universe position and rotation land at its host placement.
//!   Moving the anchor re-centers world space without touching any universe value.
//! - A transform carries local translation, rotation, and per-axis scale relative to its parent.
//! - Local, universe, and world matrices are computed on first read and cached until an
//!   upstream change invalidates them.
//!
//! ## Spaces
//!
//! - Local: relative to the parent node.
//! - Universe: relative to the root's universe origin, always `f64`.
//! - World: relative to the host's rendering origin, suitable for narrowing to `f32`.
//!
//! ## Scale
//!
//! A transform with children scales uniformly by the x component of its stored scale
//! (see [`ScaleMode`]). The stored scale is kept, so removing the last child restores
//! per-axis scaling.
//!
//! ## Host synchronization
//!
//! The host mirrors each node with a single-precision [`Placement`]. Each frame, call
//! [`Hierarchy::reconcile`] to adopt host edits, move any root anchors, then call
//! [`Hierarchy::push_placements`] to write back stale placements.
//!
//! ## API overview
//!
//! - [`Hierarchy`]: the arena that owns every node and its caches.
//! - [`NodeId`]: generational handle of a node.
//! - [`HierarchyConfig`] and [`Validation`]: when setters reject NaN and infinite values.
//! - [`Containment`]: the host's answer to "which node encloses this one?".
//! - [`Caches`] and [`CacheStats`]: introspection into what is cached and how often it was rebuilt.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use orrery_tree::{Hierarchy, Placement};
//!
//! let mut h = Hierarchy::new();
//! let root = h.insert_root(Placement::IDENTITY);
//! let ship = h.insert_transform(Some(root)).unwrap();
//! h.set_local_position(ship, DVec3::new(1.496e11, 0.0, 0.0)).unwrap();
//!
//! // Center the rendering origin on the ship.
//! h.set_root_universe_position(root, DVec3::new(1.496e11, 0.0, 0.0)).unwrap();
//!
//! let pushed = h.push_placements().unwrap();
//! assert_eq!(pushed, vec![ship]);
//! let placement = h.host_placement(ship).unwrap();
//! assert!(placement.translation.abs_diff_eq(glam::Vec3::ZERO, 1e-3));
//! ```

mod config;
mod error;
mod lifecycle;
mod node;
mod root;
mod sync;
mod transform;
mod tree;
mod types;

pub use config::{HierarchyConfig, Validation};
pub use error::HierarchyError;
pub use lifecycle::Containment;
pub use tree::Hierarchy;
pub use types::{CacheStats, Caches, NodeId, NodeKindTag, Placement, Property, ScaleMode};
