// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roots: the anchors that map universe space onto the rendering origin.
//!
//! A root holds a universe position and rotation (its *anchor*). Whatever sits at the
//! anchor in universe space lands at the root's host placement in world space. Moving
//! the anchor re-centers world space without touching any universe value, so only
//! world caches below the root are rebuilt.

use glam::{DQuat, DVec3};
use orrery_geom::{matrix_rotation, transform_point, transform_vector};
use tracing::debug;

use crate::HierarchyError;
use crate::node::Node;
use crate::tree::Hierarchy;
use crate::types::{NodeId, Placement, Property};

impl Hierarchy {
    /// Insert a root whose host object sits at `placement` in world space.
    /// The anchor starts at the universe origin.
    pub fn insert_root(&mut self, placement: Placement) -> NodeId {
        let id = self.alloc(Node::root(placement));
        debug!(%id, "inserted root");
        id
    }

    /// Universe position mapped to the root's world placement.
    pub fn root_universe_position(&self, id: NodeId) -> Result<DVec3, HierarchyError> {
        Ok(self.root(id)?.anchor_position)
    }

    /// Universe rotation mapped to the root's world orientation.
    pub fn root_universe_rotation(&self, id: NodeId) -> Result<DQuat, HierarchyError> {
        Ok(self.root(id)?.anchor_rotation)
    }

    /// Move the anchor. Universe caches below the root stay valid.
    pub fn set_root_universe_position(
        &mut self,
        id: NodeId,
        position: DVec3,
    ) -> Result<(), HierarchyError> {
        self.root(id)?;
        self.check_finite(id, Property::RootUniversePosition, position.is_finite())?;
        self.root_mut(id)?.anchor_position = position;
        self.anchor_moved(id)
    }

    /// Rotate the anchor. Universe caches below the root stay valid.
    pub fn set_root_universe_rotation(
        &mut self,
        id: NodeId,
        rotation: DQuat,
    ) -> Result<(), HierarchyError> {
        self.root(id)?;
        self.check_finite(id, Property::RootUniverseRotation, rotation.is_finite())?;
        self.root_mut(id)?.anchor_rotation = rotation;
        self.anchor_moved(id)
    }

    /// Set anchor position and rotation together with a single invalidation.
    pub fn set_root_tr(
        &mut self,
        id: NodeId,
        position: DVec3,
        rotation: DQuat,
    ) -> Result<(), HierarchyError> {
        self.root(id)?;
        self.check_finite(id, Property::RootUniversePosition, position.is_finite())?;
        self.check_finite(id, Property::RootUniverseRotation, rotation.is_finite())?;
        let root = self.root_mut(id)?;
        root.anchor_position = position;
        root.anchor_rotation = rotation;
        self.anchor_moved(id)
    }

    /// Universe point to world point (homogeneous).
    pub fn universe_to_world_point(&mut self, id: NodeId, point: DVec3) -> Result<DVec3, HierarchyError> {
        self.root(id)?;
        Ok(transform_point(&self.world_matrix(id)?, point))
    }

    /// Universe direction to a normalized world direction. A zero result stays zero.
    pub fn universe_to_world_direction(
        &mut self,
        id: NodeId,
        direction: DVec3,
    ) -> Result<DVec3, HierarchyError> {
        self.root(id)?;
        Ok(transform_vector(&self.world_matrix(id)?, direction).normalize_or_zero())
    }

    /// Universe rotation to world rotation.
    pub fn universe_to_world_rotation(
        &mut self,
        id: NodeId,
        rotation: DQuat,
    ) -> Result<DQuat, HierarchyError> {
        self.root(id)?;
        Ok(matrix_rotation(&self.world_matrix(id)?) * rotation)
    }

    /// World point to universe point (homogeneous).
    pub fn world_to_universe_point(&mut self, id: NodeId, point: DVec3) -> Result<DVec3, HierarchyError> {
        self.root(id)?;
        Ok(transform_point(&self.world_matrix(id)?.inverse(), point))
    }

    /// World direction to a normalized universe direction. A zero result stays zero.
    pub fn world_to_universe_direction(
        &mut self,
        id: NodeId,
        direction: DVec3,
    ) -> Result<DVec3, HierarchyError> {
        self.root(id)?;
        Ok(transform_vector(&self.world_matrix(id)?.inverse(), direction).normalize_or_zero())
    }

    /// World rotation to universe rotation.
    pub fn world_to_universe_rotation(
        &mut self,
        id: NodeId,
        rotation: DQuat,
    ) -> Result<DQuat, HierarchyError> {
        self.root(id)?;
        Ok(matrix_rotation(&self.world_matrix(id)?).inverse() * rotation)
    }

    fn anchor_moved(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        let anchor = self.root(id)?.anchor_position;
        debug!(%id, ?anchor, "root anchor moved");
        self.invalidate_world_subtree(id)
    }
}
