// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node storage.

use glam::{DMat4, DQuat, DVec3};

use crate::types::{CacheStats, Caches, NodeId, NodeKindTag, Placement, ScaleMode};

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) host: Placement,
    /// The host edited its placement since the last reconcile or push.
    pub(crate) host_changed: bool,
    pub(crate) placement_valid: bool,
    pub(crate) enabled: bool,
    pub(crate) stats: CacheStats,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Root(RootNode),
    Transform(TransformNode),
}

#[derive(Clone, Debug)]
pub(crate) struct RootNode {
    pub(crate) anchor_position: DVec3,
    pub(crate) anchor_rotation: DQuat,
    pub(crate) world_matrix: Option<DMat4>,
}

#[derive(Clone, Debug)]
pub(crate) struct TransformNode {
    pub(crate) translation: DVec3,
    pub(crate) rotation: DQuat,
    /// Stored scale; never rewritten by a scale mode switch.
    pub(crate) scale: DVec3,
    pub(crate) initialized: bool,
    pub(crate) local_changed: bool,
    pub(crate) local_matrix: Option<DMat4>,
    pub(crate) universe_rotation: Option<DQuat>,
    pub(crate) universe_matrix: Option<DMat4>,
    pub(crate) world_matrix: Option<DMat4>,
}

impl Node {
    pub(crate) fn root(host: Placement) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Root(RootNode {
                anchor_position: DVec3::ZERO,
                anchor_rotation: DQuat::IDENTITY,
                world_matrix: None,
            }),
            host,
            host_changed: false,
            placement_valid: true,
            enabled: true,
            stats: CacheStats::default(),
        }
    }

    pub(crate) fn transform(host: Placement, initialized: bool, enabled: bool) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Transform(TransformNode {
                translation: DVec3::ZERO,
                rotation: DQuat::IDENTITY,
                scale: DVec3::ONE,
                initialized,
                local_changed: initialized,
                local_matrix: None,
                universe_rotation: None,
                universe_matrix: None,
                world_matrix: None,
            }),
            host,
            host_changed: false,
            placement_valid: false,
            enabled,
            stats: CacheStats::default(),
        }
    }

    pub(crate) fn tag(&self) -> NodeKindTag {
        match self.kind {
            NodeKind::Root(_) => NodeKindTag::Root,
            NodeKind::Transform(_) => NodeKindTag::Transform,
        }
    }

    pub(crate) fn scale_mode(&self) -> ScaleMode {
        if self.children.is_empty() {
            ScaleMode::Anisotropic
        } else {
            ScaleMode::Isotropic
        }
    }

    pub(crate) fn caches(&self) -> Caches {
        let mut caches = Caches::empty();
        match &self.kind {
            NodeKind::Root(r) => {
                caches.set(Caches::WORLD_MATRIX, r.world_matrix.is_some());
            }
            NodeKind::Transform(t) => {
                caches.set(Caches::LOCAL_MATRIX, t.local_matrix.is_some());
                caches.set(Caches::UNIVERSE_ROTATION, t.universe_rotation.is_some());
                caches.set(Caches::UNIVERSE_MATRIX, t.universe_matrix.is_some());
                caches.set(Caches::WORLD_MATRIX, t.world_matrix.is_some());
                caches.set(Caches::PLACEMENT, self.placement_valid);
            }
        }
        caches
    }

    /// Drops universe and world caches.
    pub(crate) fn invalidate_universe(&mut self) {
        if let NodeKind::Transform(t) = &mut self.kind {
            t.universe_rotation = None;
            t.universe_matrix = None;
        }
        self.invalidate_world();
    }

    /// Drops the world cache and marks the host placement stale.
    pub(crate) fn invalidate_world(&mut self) {
        match &mut self.kind {
            NodeKind::Root(r) => r.world_matrix = None,
            NodeKind::Transform(t) => {
                t.world_matrix = None;
                self.placement_valid = false;
            }
        }
    }
}

impl TransformNode {
    /// Scale as used by the local matrix under the given mode.
    pub(crate) fn effective_scale(&self, mode: ScaleMode) -> DVec3 {
        match mode {
            ScaleMode::Anisotropic => self.scale,
            ScaleMode::Isotropic => DVec3::splat(self.scale.x),
        }
    }
}
