// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core arena: slots, linking, and cache invalidation.

use tracing::{debug, trace};

use crate::HierarchyError;
use crate::config::HierarchyConfig;
use crate::node::{Node, NodeKind, RootNode, TransformNode};
use crate::types::{CacheStats, Caches, NodeId, NodeKindTag, Property, ScaleMode};

/// A forest of roots and transforms.
///
/// Nodes live in generational slots and are addressed by [`NodeId`]. Derived values
/// (local, universe, and world matrices) are computed on first read and cached until
/// an upstream change invalidates them, which is why reads take `&mut self`.
pub struct Hierarchy {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    pub(crate) config: HierarchyConfig,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.len();
        let roots = self
            .nodes
            .iter()
            .flatten()
            .filter(|n| matches!(n.kind, NodeKind::Root(_)))
            .count();
        f.debug_struct("Hierarchy")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("roots", &roots)
            .field("free_list", &self.free_list.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Hierarchy {
    /// Create an empty hierarchy with the default configuration.
    pub fn new() -> Self {
        Self::with_config(HierarchyConfig::default())
    }

    /// Create an empty hierarchy.
    pub fn with_config(config: HierarchyConfig) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// True when no node is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes.get(id.idx()).is_some_and(|n| n.is_some())
            && self.generations.get(id.idx()) == Some(&id.1)
    }

    /// Kind of node.
    pub fn kind(&self, id: NodeId) -> Result<NodeKindTag, HierarchyError> {
        Ok(self.node(id)?.tag())
    }

    /// Parent of `id`, or `None` for roots, top-level transforms, and disabled transforms.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, HierarchyError> {
        Ok(self.node(id)?.parent)
    }

    /// Registered children in registration order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], HierarchyError> {
        Ok(&self.node(id)?.children)
    }

    /// Live nodes without a parent, in slot order.
    pub fn tops(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "NodeId stores 32-bit slot indices."
                    )]
                    Some(NodeId::new(i as u32, self.generations[i]))
                }
                _ => None,
            })
            .collect()
    }

    /// Whether the host currently drives this node.
    pub fn is_enabled(&self, id: NodeId) -> Result<bool, HierarchyError> {
        Ok(self.node(id)?.enabled)
    }

    /// Current scale mode of a transform.
    pub fn scale_mode(&self, id: NodeId) -> Result<ScaleMode, HierarchyError> {
        self.transform(id)?;
        Ok(self.node(id)?.scale_mode())
    }

    /// True when the local state of a transform was edited since the last
    /// [`push_placements`](Self::push_placements).
    pub fn has_local_changes(&self, id: NodeId) -> Result<bool, HierarchyError> {
        Ok(self.transform(id)?.local_changed)
    }

    /// Which derived values of `id` are currently cached.
    pub fn cache_state(&self, id: NodeId) -> Result<Caches, HierarchyError> {
        Ok(self.node(id)?.caches())
    }

    /// How often each derived value of `id` has been recomputed.
    pub fn cache_stats(&self, id: NodeId) -> Result<CacheStats, HierarchyError> {
        Ok(self.node(id)?.stats)
    }

    /// Remove a node and its whole subtree. Every id in the subtree becomes stale.
    pub fn remove(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        if let Some(parent) = self.node(id)?.parent {
            self.unlink(id, parent)?;
        }
        let mut stack = vec![id];
        let mut removed = 0_usize;
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n.idx()].take() {
                stack.extend_from_slice(&node.children);
                self.free_list.push(n.idx());
                removed += 1;
            }
        }
        debug!(%id, removed, "removed subtree");
        Ok(())
    }

    // --- internals ---

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].wrapping_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId stores 32-bit slot indices."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, HierarchyError> {
        if !self.is_alive(id) {
            return Err(HierarchyError::StaleNode(id));
        }
        self.nodes[id.idx()]
            .as_ref()
            .ok_or(HierarchyError::StaleNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, HierarchyError> {
        if !self.is_alive(id) {
            return Err(HierarchyError::StaleNode(id));
        }
        self.nodes[id.idx()]
            .as_mut()
            .ok_or(HierarchyError::StaleNode(id))
    }

    pub(crate) fn transform(&self, id: NodeId) -> Result<&TransformNode, HierarchyError> {
        match &self.node(id)?.kind {
            NodeKind::Transform(t) => Ok(t),
            NodeKind::Root(_) => Err(kind_mismatch(id, NodeKindTag::Transform, NodeKindTag::Root)),
        }
    }

    pub(crate) fn transform_mut(&mut self, id: NodeId) -> Result<&mut TransformNode, HierarchyError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Transform(t) => Ok(t),
            NodeKind::Root(_) => Err(kind_mismatch(id, NodeKindTag::Transform, NodeKindTag::Root)),
        }
    }

    pub(crate) fn root(&self, id: NodeId) -> Result<&RootNode, HierarchyError> {
        match &self.node(id)?.kind {
            NodeKind::Root(r) => Ok(r),
            NodeKind::Transform(_) => Err(kind_mismatch(id, NodeKindTag::Root, NodeKindTag::Transform)),
        }
    }

    pub(crate) fn root_mut(&mut self, id: NodeId) -> Result<&mut RootNode, HierarchyError> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Root(r) => Ok(r),
            NodeKind::Transform(_) => Err(kind_mismatch(id, NodeKindTag::Root, NodeKindTag::Transform)),
        }
    }

    /// Fails with `InvalidValue` when validation is active and the value is not finite.
    pub(crate) fn check_finite(
        &self,
        node: NodeId,
        property: Property,
        finite: bool,
    ) -> Result<(), HierarchyError> {
        if !finite && self.config.validation.is_active() {
            return Err(HierarchyError::InvalidValue { node, property });
        }
        Ok(())
    }

    /// True when `ancestor` is `node` or lies on its parent chain.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if n == ancestor {
                return true;
            }
            cursor = self.node(n).ok().and_then(|n| n.parent);
        }
        false
    }

    /// Appends `child` to `parent`'s children. Switching a transform to isotropic
    /// mode rebuilds its local matrix and everything beneath it.
    pub(crate) fn link(&mut self, child: NodeId, parent: NodeId) -> Result<(), HierarchyError> {
        let first_child = {
            let p = self.node_mut(parent)?;
            p.children.push(child);
            p.children.len() == 1
        };
        self.node_mut(child)?.parent = Some(parent);
        debug!(%child, %parent, "linked");

        let parent_is_transform = matches!(self.node(parent)?.kind, NodeKind::Transform(_));
        if first_child && parent_is_transform {
            self.invalidate_local(parent)?;
        } else {
            self.invalidate_universe_subtree(child)?;
        }
        if parent_is_transform {
            // An intermediate transform pins its placement.
            self.node_mut(parent)?.placement_valid = false;
        }
        Ok(())
    }

    pub(crate) fn unlink(&mut self, child: NodeId, parent: NodeId) -> Result<(), HierarchyError> {
        let now_empty = {
            let p = self.node_mut(parent)?;
            p.children.retain(|c| *c != child);
            p.children.is_empty()
        };
        self.node_mut(child)?.parent = None;
        debug!(%child, %parent, "unlinked");

        let parent_is_transform = matches!(self.node(parent)?.kind, NodeKind::Transform(_));
        if now_empty && parent_is_transform {
            self.invalidate_local(parent)?;
        }
        if parent_is_transform {
            self.node_mut(parent)?.placement_valid = false;
        }
        self.invalidate_universe_subtree(child)
    }

    /// Marks a transform locally changed and drops its local matrix, then every
    /// universe and world cache at and below it.
    pub(crate) fn invalidate_local(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        let t = self.transform_mut(id)?;
        t.initialized = true;
        t.local_changed = true;
        t.local_matrix = None;
        self.invalidate_universe_subtree(id)
    }

    pub(crate) fn invalidate_universe_subtree(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        self.node(id)?;
        let mut stack = vec![id];
        let mut touched = 0_usize;
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n.idx()].as_mut() {
                node.invalidate_universe();
                stack.extend_from_slice(&node.children);
                touched += 1;
            }
        }
        trace!(%id, touched, "universe caches invalidated");
        Ok(())
    }

    /// Drops world caches only; universe caches stay valid.
    pub(crate) fn invalidate_world_subtree(&mut self, id: NodeId) -> Result<(), HierarchyError> {
        self.node(id)?;
        let mut stack = vec![id];
        let mut touched = 0_usize;
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes[n.idx()].as_mut() {
                node.invalidate_world();
                stack.extend_from_slice(&node.children);
                touched += 1;
            }
        }
        trace!(%id, touched, "world caches invalidated");
        Ok(())
    }
}

fn kind_mismatch(node: NodeId, expected: NodeKindTag, found: NodeKindTag) -> HierarchyError {
    HierarchyError::UnsupportedNodeKind {
        node,
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Placement;

    #[test]
    fn stale_ids_never_alias() {
        let mut h = Hierarchy::new();
        let a = h.insert_transform(None).unwrap();
        h.remove(a).unwrap();
        let b = h.insert_transform(None).unwrap();
        assert_eq!(a.index(), b.index(), "slot is reused");
        assert_ne!(a, b, "generation differs");
        assert!(!h.is_alive(a), "old id is stale");
        assert_eq!(h.parent(a), Err(HierarchyError::StaleNode(a)), "stale lookup");
    }

    #[test]
    fn remove_frees_subtree_and_detaches() {
        let mut h = Hierarchy::new();
        let root = h.insert_root(Placement::IDENTITY);
        let a = h.insert_transform(Some(root)).unwrap();
        let b = h.insert_transform(Some(a)).unwrap();
        let c = h.insert_transform(Some(b)).unwrap();
        assert_eq!(h.len(), 4, "all alive");

        h.remove(a).unwrap();
        assert_eq!(h.len(), 1, "only root left");
        assert!(!h.is_alive(b) && !h.is_alive(c), "descendants gone");
        assert!(h.children(root).unwrap().is_empty(), "detached from root");
    }

    #[test]
    fn children_keep_registration_order() {
        let mut h = Hierarchy::new();
        let p = h.insert_transform(None).unwrap();
        let ids: Vec<_> = (0..4).map(|_| h.insert_transform(Some(p)).unwrap()).collect();
        assert_eq!(h.children(p).unwrap(), &ids[..], "insertion order");
        h.remove(ids[1]).unwrap();
        assert_eq!(
            h.children(p).unwrap(),
            &[ids[0], ids[2], ids[3]],
            "order survives removal"
        );
    }

    #[test]
    fn tops_lists_parentless_nodes() {
        let mut h = Hierarchy::new();
        let root = h.insert_root(Placement::IDENTITY);
        let free = h.insert_transform(None).unwrap();
        let _child = h.insert_transform(Some(root)).unwrap();
        assert_eq!(h.tops(), vec![root, free], "slot order");
    }

    #[test]
    fn debug_is_compact() {
        let mut h = Hierarchy::new();
        let _ = h.insert_root(Placement::IDENTITY);
        let s = format!("{h:?}");
        assert!(s.contains("nodes_alive: 1"), "debug output {s}");
    }
}
