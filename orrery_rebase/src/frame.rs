// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame driver.

use orrery_tree::{Hierarchy, HierarchyError, NodeId};
use tracing::trace;

use crate::policy::RebasePolicy;

/// What a [`step`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Transforms whose local state was rebuilt from a host edit.
    pub adopted: Vec<NodeId>,
    /// Whether the policy moved any anchor.
    pub rebased: bool,
    /// Transforms whose host placement was rewritten.
    pub pushed: Vec<NodeId>,
}

/// Run one frame: reconcile host edits, let `policy` move anchors, then push placements.
///
/// An error from any sub-pass aborts the frame; sub-passes that already ran keep their effects.
pub fn step(
    hierarchy: &mut Hierarchy,
    policy: &mut impl RebasePolicy,
) -> Result<StepReport, HierarchyError> {
    let adopted = hierarchy.reconcile()?;
    let rebased = policy.rebase(hierarchy)?;
    let pushed = hierarchy.push_placements()?;
    trace!(adopted = adopted.len(), rebased, pushed = pushed.len(), "frame");
    Ok(StepReport {
        adopted,
        rebased,
        pushed,
    })
}
