// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local, universe, and world accessors shared by both node kinds.
//!
//! Roots answer the local and universe getters with fixed identity values and reject
//! the setters with [`HierarchyError::UnsupportedOperation`].

use glam::{DMat4, DQuat, DVec3};
use orrery_geom::{compose, transform_point};
use tracing::trace;

use crate::HierarchyError;
use crate::node::{Node, NodeKind};
use crate::tree::Hierarchy;
use crate::types::{NodeId, Placement, Property};

impl Hierarchy {
    /// Insert an enabled transform with identity local state under `parent`
    /// (or at the top of its own hierarchy if `None`).
    pub fn insert_transform(&mut self, parent: Option<NodeId>) -> Result<NodeId, HierarchyError> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        let id = self.alloc(Node::transform(Placement::IDENTITY, true, true));
        if let Some(p) = parent {
            self.link(id, p)?;
        }
        Ok(id)
    }

    /// Translation relative to the parent. Always zero for a root.
    pub fn local_position(&self, id: NodeId) -> Result<DVec3, HierarchyError> {
        match &self.node(id)?.kind {
            NodeKind::Root(_) => Ok(DVec3::ZERO),
            NodeKind::Transform(t) => Ok(t.translation),
        }
    }

    /// Rotation relative to the parent. Always identity for a root.
    pub fn local_rotation(&self, id: NodeId) -> Result<DQuat, HierarchyError> {
        match &self.node(id)?.kind {
            NodeKind::Root(_) => Ok(DQuat::IDENTITY),
            NodeKind::Transform(t) => Ok(t.rotation),
        }
    }

    /// Scale relative to the parent, as the local matrix uses it.
    ///
    /// A transform with children reports its x component on all three axes.
    pub fn local_scale(&self, id: NodeId) -> Result<DVec3, HierarchyError> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Root(_) => Ok(DVec3::ONE),
            NodeKind::Transform(t) => Ok(t.effective_scale(node.scale_mode())),
        }
    }

    /// Set the translation relative to the parent.
    pub fn set_local_position(&mut self, id: NodeId, position: DVec3) -> Result<(), HierarchyError> {
        self.settable(id, "set_local_position")?;
        self.check_finite(id, Property::LocalPosition, position.is_finite())?;
        self.transform_mut(id)?.translation = position;
        self.invalidate_local(id)
    }

    /// Set the rotation relative to the parent.
    pub fn set_local_rotation(&mut self, id: NodeId, rotation: DQuat) -> Result<(), HierarchyError> {
        self.settable(id, "set_local_rotation")?;
        self.check_finite(id, Property::LocalRotation, rotation.is_finite())?;
        self.transform_mut(id)?.rotation = rotation;
        self.invalidate_local(id)
    }

    /// Set the stored scale. Only its x component is used while the node has children.
    pub fn set_local_scale(&mut self, id: NodeId, scale: DVec3) -> Result<(), HierarchyError> {
        self.settable(id, "set_local_scale")?;
        self.check_finite(id, Property::LocalScale, scale.is_finite())?;
        self.transform_mut(id)?.scale = scale;
        self.invalidate_local(id)
    }

    /// Set translation, rotation, and scale in one invalidation.
    pub fn set_local_trs(
        &mut self,
        id: NodeId,
        position: DVec3,
        rotation: DQuat,
        scale: DVec3,
    ) -> Result<(), HierarchyError> {
        self.settable(id, "set_local_trs")?;
        self.check_finite(id, Property::LocalPosition, position.is_finite())?;
        self.check_finite(id, Property::LocalRotation, rotation.is_finite())?;
        self.check_finite(id, Property::LocalScale, scale.is_finite())?;
        let t = self.transform_mut(id)?;
        t.translation = position;
        t.rotation = rotation;
        t.scale = scale;
        self.invalidate_local(id)
    }

    /// Position in universe space. Zero for a root.
    pub fn universe_position(&mut self, id: NodeId) -> Result<DVec3, HierarchyError> {
        let node = self.node(id)?;
        let NodeKind::Transform(t) = &node.kind else {
            return Ok(DVec3::ZERO);
        };
        let (local, parent) = (t.translation, node.parent);
        match parent {
            None => Ok(local),
            Some(p) => Ok(transform_point(&self.universe_matrix(p)?, local)),
        }
    }

    /// Move a transform to `position` in universe space by solving for its local position.
    pub fn set_universe_position(&mut self, id: NodeId, position: DVec3) -> Result<(), HierarchyError> {
        self.settable(id, "set_universe_position")?;
        self.check_finite(id, Property::UniversePosition, position.is_finite())?;
        let parent = self.node(id)?.parent;
        let local = match parent {
            None => position,
            Some(p) => transform_point(&self.universe_matrix(p)?.inverse(), position),
        };
        self.transform_mut(id)?.translation = local;
        self.invalidate_local(id)
    }

    /// Rotation in universe space. Identity for a root.
    pub fn universe_rotation(&mut self, id: NodeId) -> Result<DQuat, HierarchyError> {
        let node = self.node(id)?;
        let parent = node.parent;
        let local = match &node.kind {
            NodeKind::Root(_) => return Ok(DQuat::IDENTITY),
            NodeKind::Transform(t) => match t.universe_rotation {
                Some(q) => return Ok(q),
                None => t.rotation,
            },
        };
        let q = match parent {
            None => local,
            Some(p) => self.universe_rotation(p)? * local,
        };
        let node = self.node_mut(id)?;
        node.stats.universe_rotation += 1;
        if let NodeKind::Transform(t) = &mut node.kind {
            t.universe_rotation = Some(q);
        }
        trace!(%id, "universe rotation recomputed");
        Ok(q)
    }

    /// Rotate a transform to `rotation` in universe space by solving for its local rotation.
    pub fn set_universe_rotation(&mut self, id: NodeId, rotation: DQuat) -> Result<(), HierarchyError> {
        self.settable(id, "set_universe_rotation")?;
        self.check_finite(id, Property::UniverseRotation, rotation.is_finite())?;
        let parent = self.node(id)?.parent;
        let local = match parent {
            None => rotation,
            Some(p) => self.universe_rotation(p)?.inverse() * rotation,
        };
        self.transform_mut(id)?.rotation = local;
        self.invalidate_local(id)
    }

    /// `T · R · S` of the local state, with the effective scale. Identity for a root.
    pub fn local_matrix(&mut self, id: NodeId) -> Result<DMat4, HierarchyError> {
        let node = self.node(id)?;
        let mode = node.scale_mode();
        let NodeKind::Transform(t) = &node.kind else {
            return Ok(DMat4::IDENTITY);
        };
        if let Some(m) = t.local_matrix {
            return Ok(m);
        }
        let m = compose(t.translation, t.rotation, t.effective_scale(mode));
        let node = self.node_mut(id)?;
        node.stats.local_matrix += 1;
        if let NodeKind::Transform(t) = &mut node.kind {
            t.local_matrix = Some(m);
        }
        trace!(%id, "local matrix recomputed");
        Ok(m)
    }

    /// Universe-from-local matrix. Identity for a root.
    pub fn universe_matrix(&mut self, id: NodeId) -> Result<DMat4, HierarchyError> {
        let node = self.node(id)?;
        let NodeKind::Transform(t) = &node.kind else {
            return Ok(DMat4::IDENTITY);
        };
        if let Some(m) = t.universe_matrix {
            return Ok(m);
        }
        let parent = node.parent;
        let local = self.local_matrix(id)?;
        let m = match parent {
            None => local,
            Some(p) => self.universe_matrix(p)? * local,
        };
        let node = self.node_mut(id)?;
        node.stats.universe_matrix += 1;
        if let NodeKind::Transform(t) = &mut node.kind {
            t.universe_matrix = Some(m);
        }
        trace!(%id, "universe matrix recomputed");
        Ok(m)
    }

    /// World-from-local matrix.
    ///
    /// For a root this maps universe space to world space:
    /// `host placement · inverse(T(anchor position) · R(anchor rotation))`.
    pub fn world_matrix(&mut self, id: NodeId) -> Result<DMat4, HierarchyError> {
        let node = self.node(id)?;
        let parent = node.parent;
        let root_world = match &node.kind {
            NodeKind::Root(r) => match r.world_matrix {
                Some(m) => return Ok(m),
                None => {
                    let universe_from_root =
                        compose(r.anchor_position, r.anchor_rotation, DVec3::ONE);
                    Some(node.host.to_matrix() * universe_from_root.inverse())
                }
            },
            NodeKind::Transform(t) => match t.world_matrix {
                Some(m) => return Ok(m),
                None => None,
            },
        };
        let m = match root_world {
            Some(m) => m,
            None => {
                let local = self.local_matrix(id)?;
                match parent {
                    None => local,
                    Some(p) => self.world_matrix(p)? * local,
                }
            }
        };
        let node = self.node_mut(id)?;
        node.stats.world_matrix += 1;
        match &mut node.kind {
            NodeKind::Root(r) => r.world_matrix = Some(m),
            NodeKind::Transform(t) => t.world_matrix = Some(m),
        }
        trace!(%id, "world matrix recomputed");
        Ok(m)
    }

    /// Local +Z axis in universe space.
    pub fn forward(&mut self, id: NodeId) -> Result<DVec3, HierarchyError> {
        Ok(self.universe_rotation(id)? * DVec3::Z)
    }

    /// Local +X axis in universe space.
    pub fn right(&mut self, id: NodeId) -> Result<DVec3, HierarchyError> {
        Ok(self.universe_rotation(id)? * DVec3::X)
    }

    /// Local +Y axis in universe space.
    pub fn up(&mut self, id: NodeId) -> Result<DVec3, HierarchyError> {
        Ok(self.universe_rotation(id)? * DVec3::Y)
    }

    fn settable(&self, id: NodeId, operation: &'static str) -> Result<(), HierarchyError> {
        match self.node(id)?.kind {
            NodeKind::Transform(_) => Ok(()),
            NodeKind::Root(_) => Err(HierarchyError::UnsupportedOperation { node: id, operation }),
        }
    }
}
