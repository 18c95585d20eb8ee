// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Orrery Rebase: keep the rendering origin near what matters.
//!
//! An [`orrery_tree::Hierarchy`] maps a root's universe anchor onto the host's world
//! origin. This crate decides when to move that anchor and drives the per-frame
//! synchronization around it.
//!
//! - [`RebasePolicy`]: the hook. Any `FnMut(&mut Hierarchy) -> Result<bool, HierarchyError>`
//!   is a policy.
//! - [`TrackOrigin`]: moves the anchor onto a node whenever the node moves.
//! - [`DistanceThreshold`]: moves the anchor onto a node once it strays past
//!   [`ThresholdConfig::max_distance`].
//! - [`step`]: reconcile host edits, run a policy, push placements.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use orrery_rebase::{TrackOrigin, step};
//! use orrery_tree::{Hierarchy, Placement};
//!
//! let mut h = Hierarchy::new();
//! let root = h.insert_root(Placement::IDENTITY);
//! let camera = h.insert_transform(Some(root)).unwrap();
//! let mut policy = TrackOrigin::new(root, camera);
//!
//! h.set_local_position(camera, DVec3::new(4.2e8, 0.0, 0.0)).unwrap();
//! let report = step(&mut h, &mut policy).unwrap();
//! assert!(report.rebased);
//! assert_eq!(report.pushed, vec![camera]);
//! assert_eq!(h.root_universe_position(root).unwrap(), DVec3::new(4.2e8, 0.0, 0.0));
//! ```

mod config;
mod frame;
mod policy;

pub use config::ThresholdConfig;
pub use frame::{StepReport, step};
pub use policy::{DistanceThreshold, RebasePolicy, TrackOrigin};
