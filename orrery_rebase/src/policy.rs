// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rebasing policies: when and where to move a root anchor.

use glam::DVec3;
use orrery_tree::{Hierarchy, HierarchyError, NodeId};
use tracing::debug;

use crate::config::ThresholdConfig;

/// Decides whether to move root anchors during a frame.
///
/// A policy runs after host edits are reconciled and before placements are pushed, so
/// it observes current universe positions and its anchor moves reach the host in the
/// same frame.
pub trait RebasePolicy {
    /// Move anchors as needed. Returns `true` if any anchor moved.
    fn rebase(&mut self, hierarchy: &mut Hierarchy) -> Result<bool, HierarchyError>;
}

impl<F> RebasePolicy for F
where
    F: FnMut(&mut Hierarchy) -> Result<bool, HierarchyError>,
{
    #[inline]
    fn rebase(&mut self, hierarchy: &mut Hierarchy) -> Result<bool, HierarchyError> {
        self(hierarchy)
    }
}

/// Keeps a node at the rendering origin by moving the anchor to it every time it moves.
///
/// After each rebase the tracked node's world translation equals the root's host
/// translation (up to the host rotation and scale).
#[derive(Clone, Debug)]
pub struct TrackOrigin {
    root: NodeId,
    origin: NodeId,
    last: Option<DVec3>,
}

impl TrackOrigin {
    /// Track `origin` with the anchor of `root`.
    pub fn new(root: NodeId, origin: NodeId) -> Self {
        Self {
            root,
            origin,
            last: None,
        }
    }

    /// The root whose anchor is moved.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The tracked node.
    pub fn origin(&self) -> NodeId {
        self.origin
    }
}

impl RebasePolicy for TrackOrigin {
    fn rebase(&mut self, hierarchy: &mut Hierarchy) -> Result<bool, HierarchyError> {
        let position = hierarchy.universe_position(self.origin)?;
        if self.last == Some(position) {
            return Ok(false);
        }
        hierarchy.set_root_universe_position(self.root, position)?;
        self.last = Some(position);
        debug!(root = %self.root, origin = %self.origin, ?position, "anchor tracked origin");
        Ok(true)
    }
}

/// Moves the anchor onto a node only once the node strays past a distance from it.
///
/// Between rebases world coordinates near the node grow up to
/// [`ThresholdConfig::max_distance`], which keeps anchor moves (and the world cache
/// rebuilds they trigger) rare.
#[derive(Clone, Debug)]
pub struct DistanceThreshold {
    root: NodeId,
    origin: NodeId,
    config: ThresholdConfig,
}

impl DistanceThreshold {
    /// Follow `origin` with the anchor of `root`, using `config`.
    pub fn new(root: NodeId, origin: NodeId, config: ThresholdConfig) -> Self {
        Self {
            root,
            origin,
            config,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }
}

impl RebasePolicy for DistanceThreshold {
    fn rebase(&mut self, hierarchy: &mut Hierarchy) -> Result<bool, HierarchyError> {
        let position = hierarchy.universe_position(self.origin)?;
        let anchor = hierarchy.root_universe_position(self.root)?;
        let distance = position.distance(anchor);
        if distance <= self.config.max_distance {
            return Ok(false);
        }
        hierarchy.set_root_universe_position(self.root, position)?;
        debug!(root = %self.root, origin = %self.origin, distance, "anchor rebased past threshold");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_tree::Placement;

    fn scene() -> (Hierarchy, NodeId, NodeId) {
        let mut h = Hierarchy::new();
        let root = h.insert_root(Placement::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        let origin = h.insert_transform(Some(root)).unwrap();
        (h, root, origin)
    }

    #[test]
    fn track_origin_pins_node_to_host_position() {
        let (mut h, root, origin) = scene();
        let mut policy = TrackOrigin::new(root, origin);
        h.set_local_position(origin, DVec3::new(7.0e10, -3.0e9, 1.0)).unwrap();

        assert!(policy.rebase(&mut h).unwrap(), "first run moves the anchor");
        let world = h.world_matrix(origin).unwrap().w_axis.truncate();
        assert!(world.abs_diff_eq(DVec3::new(1.0, 2.0, 3.0), 1e-6), "pinned {world}");
        assert!(!policy.rebase(&mut h).unwrap(), "no move while the node rests");

        h.set_local_position(origin, DVec3::new(7.0e10, -3.0e9, 2.0)).unwrap();
        assert!(policy.rebase(&mut h).unwrap(), "follows the node");
        assert_eq!(
            h.root_universe_position(root).unwrap(),
            DVec3::new(7.0e10, -3.0e9, 2.0),
            "anchor on the node"
        );
    }

    #[test]
    fn threshold_waits_for_distance() {
        let (mut h, root, origin) = scene();
        let mut policy = DistanceThreshold::new(root, origin, ThresholdConfig { max_distance: 100.0 });

        h.set_local_position(origin, DVec3::new(60.0, 0.0, 80.0)).unwrap();
        assert!(!policy.rebase(&mut h).unwrap(), "exactly at the threshold");
        assert_eq!(h.root_universe_position(root).unwrap(), DVec3::ZERO, "anchor unmoved");

        h.set_local_position(origin, DVec3::new(60.0, 0.0, 81.0)).unwrap();
        assert!(policy.rebase(&mut h).unwrap(), "past the threshold");
        assert_eq!(
            h.root_universe_position(root).unwrap(),
            DVec3::new(60.0, 0.0, 81.0),
            "anchor moved onto the node"
        );
    }

    #[test]
    fn closures_are_policies() {
        let (mut h, root, _) = scene();
        let mut calls = 0;
        let mut policy = |hierarchy: &mut Hierarchy| -> Result<bool, HierarchyError> {
            calls += 1;
            hierarchy.set_root_universe_position(root, DVec3::X)?;
            Ok(true)
        };
        assert!(policy.rebase(&mut h).unwrap(), "closure ran");
        assert_eq!(calls, 1, "called once");
        assert_eq!(h.root_universe_position(root).unwrap(), DVec3::X, "anchor set");
    }

    #[test]
    fn policy_on_a_transform_root_fails() {
        let (mut h, _, origin) = scene();
        let mut policy = TrackOrigin::new(origin, origin);
        assert!(policy.rebase(&mut h).is_err(), "anchor of a transform");
    }
}
