// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven lifecycle: enabling, disabling, registration, and reparenting.
//!
//! The host owns its own scene graph. A [`Containment`] tells the hierarchy which node,
//! if any, is the nearest ancestor of a given node in that graph; the hierarchy keeps
//! its parent links in step with the answer.

use glam::DMat4;
use orrery_geom::{copy_sign, decompose};
use tracing::debug;

use crate::HierarchyError;
use crate::node::{Node, NodeKind};
use crate::tree::Hierarchy;
use crate::types::{NodeId, NodeKindTag, Placement};

/// Resolves the nearest node ancestor of a node in the host's containment structure.
pub trait Containment {
    /// Returns the closest enclosing node of `node`, or `None` if it is at the top.
    fn nearest_node_ancestor(&self, node: NodeId) -> Option<NodeId>;
}

impl<F: Fn(NodeId) -> Option<NodeId>> Containment for F {
    #[inline]
    fn nearest_node_ancestor(&self, node: NodeId) -> Option<NodeId> {
        self(node)
    }
}

impl Hierarchy {
    /// Create a disabled, uninitialized transform mirroring a host object at `placement`.
    ///
    /// Call [`enable`](Self::enable) to attach it; on first enable its local state is
    /// derived from the placement.
    pub fn spawn_transform(&mut self, placement: Placement) -> NodeId {
        self.alloc(Node::transform(placement, false, false))
    }

    /// Attach a transform under the ancestor `containment` reports and start tracking it.
    ///
    /// An uninitialized transform seeds its local state from its host placement,
    /// interpreted as a world translation and rotation plus a local scale.
    /// Enabling an enabled node does nothing.
    pub fn enable(&mut self, id: NodeId, containment: &impl Containment) -> Result<(), HierarchyError> {
        let t = self.transform(id)?;
        if self.node(id)?.enabled {
            return Ok(());
        }
        let initialized = t.initialized;
        let parent = containment.nearest_node_ancestor(id);
        self.check_link(id, parent)?;

        self.node_mut(id)?.enabled = true;
        if let Some(p) = parent {
            self.link(id, p)?;
        }
        if initialized {
            self.invalidate_local(id)?;
        } else {
            self.adopt_host_placement(id)?;
        }
        debug!(%id, ?parent, "enabled");
        Ok(())
    }

    /// Detach a transform from its parent and stop tracking it. Its own children stay attached.
    pub fn disable(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        self.transform(id)?;
        let node = self.node(id)?;
        if !node.enabled {
            return Ok(());
        }
        if let Some(parent) = node.parent {
            self.unlink(id, parent)?;
        }
        self.node_mut(id)?.enabled = false;
        debug!(%id, "disabled");
        Ok(())
    }

    /// React to the host moving `id` within its own graph. Disabled nodes are ignored.
    ///
    /// The node is relinked under the ancestor `containment` now reports and its world
    /// placement is preserved, as with [`set_parent`](Self::set_parent).
    pub fn on_hierarchy_changed(
        &mut self,
        id: NodeId,
        containment: &impl Containment,
    ) -> Result<(), HierarchyError> {
        self.transform(id)?;
        if !self.node(id)?.enabled {
            return Ok(());
        }
        self.set_parent(id, containment.nearest_node_ancestor(id))
    }

    /// Move a transform under `new_parent` (or to the top) while keeping its world matrix.
    ///
    /// The new local state is the decomposition of `new parent world⁻¹ · old world`,
    /// taken after registration so a parent that just became isotropic is accounted for.
    /// Pending host edits on the node are discarded.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), HierarchyError> {
        self.transform(id)?;
        let old_parent = self.node(id)?.parent;
        if old_parent == new_parent {
            return Ok(());
        }
        self.check_link(id, new_parent)?;

        let world_from_local = self.world_matrix(id)?;
        if let Some(p) = old_parent {
            self.unlink(id, p)?;
        }
        if let Some(p) = new_parent {
            self.link(id, p)?;
        }
        self.node_mut(id)?.host_changed = false;

        let world_from_parent = match new_parent {
            Some(p) => self.world_matrix(p)?,
            None => DMat4::IDENTITY,
        };
        let trs = decompose(&(world_from_parent.inverse() * world_from_local));
        let t = self.transform_mut(id)?;
        t.translation = trs.translation;
        t.rotation = trs.rotation;
        t.scale = trs.scale;
        self.invalidate_local(id)?;
        debug!(%id, ?old_parent, ?new_parent, "reparented");
        Ok(())
    }

    /// Register `child` under `parent` without touching the child's local state.
    ///
    /// The first child switches a transform parent to isotropic scale.
    pub fn register_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        self.node(parent)?;
        self.transform(child)?;
        if let Some(current) = self.node(child)?.parent {
            return Err(HierarchyError::AlreadyRegistered {
                child,
                parent: current,
            });
        }
        self.check_link(child, Some(parent))?;
        self.link(child, parent)
    }

    /// Unregister `child` from `parent` without touching the child's local state.
    ///
    /// Removing the last child switches a transform parent back to anisotropic scale.
    pub fn unregister_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(HierarchyError::NotAChild { child, parent });
        }
        self.unlink(child, parent)
    }

    /// Derive local state from the host placement.
    ///
    /// Translation and rotation come from decomposing `parent world⁻¹ · host placement`.
    /// The scale keeps the host's magnitudes with the signs of the decomposed scale, which
    /// avoids the precision lost to translation and rotation during decomposition.
    pub(crate) fn adopt_host_placement(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        let node = self.node(id)?;
        let (host, parent) = (node.host, node.parent);
        let world_from_parent = match parent {
            Some(p) => self.world_matrix(p)?,
            None => DMat4::IDENTITY,
        };
        let trs = decompose(&(world_from_parent.inverse() * host.to_matrix()));
        let t = self.transform_mut(id)?;
        t.translation = trs.translation;
        t.rotation = trs.rotation;
        t.scale = copy_sign(trs.scale, host.scale.as_dvec3());
        debug!(%id, "adopted host placement");
        self.invalidate_local(id)
    }

    /// Rejects linking a root, or linking under a descendant of `child`.
    fn check_link(&self, child: NodeId, parent: Option<NodeId>) -> Result<(), HierarchyError> {
        let Some(parent) = parent else {
            return Ok(());
        };
        self.node(parent)?;
        if let NodeKind::Root(_) = self.node(child)?.kind {
            return Err(HierarchyError::UnsupportedNodeKind {
                node: child,
                expected: NodeKindTag::Transform,
                found: NodeKindTag::Root,
            });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(HierarchyError::Cycle { child, parent });
        }
        Ok(())
    }
}
