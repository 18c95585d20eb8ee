// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronization with the host's single-precision placements.
//!
//! Each frame runs two passes, top-down over every enabled hierarchy:
//!
//! 1. [`Hierarchy::reconcile`] adopts host edits on leaf transforms that were not edited
//!    locally since the last push. Local edits win over host edits.
//! 2. [`Hierarchy::push_placements`] rewrites every stale host placement and clears the
//!    per-node change flags.
//!
//! Anything that moves world space (for example a root anchor change) belongs between
//! the two passes so the push sees it.

use glam::{DVec3, Quat, Vec3};
use orrery_geom::{copy_sign, decompose};
use tracing::debug;

use crate::HierarchyError;
use crate::node::NodeKind;
use crate::tree::Hierarchy;
use crate::types::{NodeId, Placement, Property};

impl Hierarchy {
    /// The host placement last written by either side.
    pub fn host_placement(&self, id: NodeId) -> Result<Placement, HierarchyError> {
        Ok(self.node(id)?.host)
    }

    /// Record a host-side edit.
    ///
    /// For a root this moves the rendering frame immediately and drops every world cache
    /// below it. For a transform the edit is picked up by the next
    /// [`reconcile`](Self::reconcile).
    pub fn set_host_placement(&mut self, id: NodeId, placement: Placement) -> Result<(), HierarchyError> {
        self.node(id)?;
        self.check_finite(id, Property::HostPlacement, placement.is_finite())?;
        let node = self.node_mut(id)?;
        node.host = placement;
        if let NodeKind::Root(_) = node.kind {
            debug!(%id, "root host placement moved");
            self.invalidate_world_subtree(id)
        } else {
            node.host_changed = true;
            Ok(())
        }
    }

    /// Adopt pending host edits, top-down. Returns the transforms whose local state was
    /// rebuilt from their host placement.
    ///
    /// A transform with children never adopts its placement; it is re-pinned on push.
    pub fn reconcile(&mut self) -> Result<Vec<NodeId>, HierarchyError> {
        let mut adopted = Vec::new();
        let mut stack: Vec<NodeId> = self.tops();
        stack.reverse();
        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if !node.enabled {
                continue;
            }
            let leaf = node.children.is_empty();
            let host_changed = node.host_changed;
            stack.extend(node.children.iter().rev());

            let NodeKind::Transform(t) = &node.kind else {
                continue;
            };
            if host_changed && leaf && !t.local_changed {
                self.adopt_host_placement(id)?;
                adopted.push(id);
            }
            if host_changed {
                let node = self.node_mut(id)?;
                node.host_changed = false;
                // A rejected edit is overwritten on push.
                node.placement_valid = false;
            }
        }
        if !adopted.is_empty() {
            debug!(count = adopted.len(), "reconciled host edits");
        }
        Ok(adopted)
    }

    /// Write every stale host placement, top-down, and clear local change flags.
    /// Returns the transforms whose placement was rewritten.
    ///
    /// A leaf receives its world translation and rotation and its local scale magnitude
    /// with the sign of the decomposed world scale. A transform with children is pinned
    /// to the origin with its uniform scale so its children's placements stay in world space.
    pub fn push_placements(&mut self) -> Result<Vec<NodeId>, HierarchyError> {
        let mut pushed = Vec::new();
        let mut stack: Vec<NodeId> = self.tops();
        stack.reverse();
        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if !node.enabled {
                continue;
            }
            let leaf = node.children.is_empty();
            let stale = !node.placement_valid;
            stack.extend(node.children.iter().rev());
            if !matches!(node.kind, NodeKind::Transform(_)) {
                continue;
            }

            if stale {
                let scale = self.local_scale(id)?;
                let placement = if leaf {
                    let world = decompose(&self.world_matrix(id)?);
                    Placement {
                        translation: world.translation.as_vec3(),
                        rotation: world.rotation.as_quat(),
                        scale: copy_sign(world.scale, scale).as_vec3(),
                    }
                } else {
                    Placement {
                        translation: Vec3::ZERO,
                        rotation: Quat::IDENTITY,
                        scale: DVec3::splat(scale.x).as_vec3(),
                    }
                };
                let node = self.node_mut(id)?;
                node.host = placement;
                node.placement_valid = true;
                node.stats.placement += 1;
                pushed.push(id);
            }

            let node = self.node_mut(id)?;
            node.host_changed = false;
            if let NodeKind::Transform(t) = &mut node.kind {
                t.local_changed = false;
            }
        }
        Ok(pushed)
    }
}
