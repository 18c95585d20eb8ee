// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::types::{NodeId, NodeKindTag, Property};

/// Errors returned by [`Hierarchy`](crate::Hierarchy) operations.
///
/// A failed operation never changes node state or caches.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The id refers to a removed node.
    #[error("node {0} has been removed")]
    StaleNode(NodeId),
    /// A setter was given a NaN or infinite component.
    #[error("cannot set {property} of node {node} to a NaN or infinite value")]
    InvalidValue {
        /// Target node.
        node: NodeId,
        /// Property being set.
        property: Property,
    },
    /// The property is fixed for this node.
    #[error("{operation} is not supported on node {node}")]
    UnsupportedOperation {
        /// Target node.
        node: NodeId,
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// The operation only applies to the other node kind.
    #[error("node {node} is a {found}, expected a {expected}")]
    UnsupportedNodeKind {
        /// Offending node.
        node: NodeId,
        /// Kind the operation requires.
        expected: NodeKindTag,
        /// Actual kind.
        found: NodeKindTag,
    },
    /// Linking would make a node its own ancestor.
    #[error("linking {child} under {parent} would create a cycle")]
    Cycle {
        /// Would-be child.
        child: NodeId,
        /// Would-be parent.
        parent: NodeId,
    },
    /// The child already has a parent.
    #[error("{child} is already registered under {parent}")]
    AlreadyRegistered {
        /// Child being registered.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },
    /// The node is not registered under the given parent.
    #[error("{child} is not a child of {parent}")]
    NotAChild {
        /// Child being unregistered.
        child: NodeId,
        /// Parent it was expected under.
        parent: NodeId,
    },
}
