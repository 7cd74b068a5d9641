//! Shared base finder for merge operations
//!
//! Finds the commit from which `head` and a branch tip diverged, and the
//! ordered list of commits from the branch tip back to it.
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Shortcuts
//!
//! - both commits share their first parent: that parent
//! - `head`'s first parent is the branch tip: the branch tip
//! - the branch tip's first parent is `head`: `head`
//!
//! ### Phase 2: First-parent walk
//!
//! Follow the branch tip's first-parent chain until it reaches `head`. This
//! answers every case where `head` lies on the branch's first-parent lineage.
//!
//! ### Phase 3: Best common ancestor
//!
//! When the walk runs off a root commit without meeting `head`, collect every
//! common ancestor over all parents and keep the ones that are not ancestors of
//! another common ancestor:
//!
//! > A best common ancestor of X and Y is any common ancestor of X and Y that
//! > is not an ancestor of any other common ancestor.
//!
//! Among several best common ancestors the one closest to the branch tip wins,
//! ties broken by distance to `head` and then by id, so the result is stable.

use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::objects::commit_id::CommitId;
use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct SharedBaseFinder<'g> {
    graph: &'g CommitGraph,
}

impl<'g> SharedBaseFinder<'g> {
    /// Find the shared base of `head` and `branch_tip`
    ///
    /// # Returns
    ///
    /// - `Some(CommitId)` - the commit both lines of history descend from
    /// - `None` - the two commits have no ancestor in common (different roots)
    pub fn find_shared_base(&self, head: &CommitId, branch_tip: &CommitId) -> Option<CommitId> {
        if head == branch_tip {
            return Some(head.clone());
        }

        let head_parent = self.graph.first_parent(head);
        let tip_parent = self.graph.first_parent(branch_tip);

        if head_parent.is_some() && head_parent == tip_parent {
            tracing::trace!(base = ?head_parent, "shared first parent");
            return head_parent.cloned();
        }
        if head_parent == Some(branch_tip) {
            return Some(branch_tip.clone());
        }
        if tip_parent == Some(head) {
            return Some(head.clone());
        }

        self.walk_first_parents(head, branch_tip)
            .or_else(|| self.find_best_common_ancestor(head, branch_tip))
    }

    /// Follow `branch_tip`'s first parents until `head` shows up
    fn walk_first_parents(&self, head: &CommitId, branch_tip: &CommitId) -> Option<CommitId> {
        let mut current = branch_tip;

        loop {
            if current == head {
                tracing::trace!(base = %current, "first-parent walk reached head");
                return Some(current.clone());
            }

            match self.graph.first_parent(current) {
                Some(parent) => current = parent,
                None => {
                    tracing::trace!(root = %current, "first-parent walk ran off a root");
                    return None;
                }
            }
        }
    }

    fn find_best_common_ancestor(&self, head: &CommitId, branch_tip: &CommitId) -> Option<CommitId> {
        let head_ancestors = self.graph.ancestors(head);
        let tip_ancestors = self.graph.ancestors(branch_tip);

        let common_ancestors = tip_ancestors
            .iter()
            .filter_map(|(commit_id, tip_distance)| {
                head_ancestors
                    .get(commit_id)
                    .map(|head_distance| (commit_id, *tip_distance, *head_distance))
            })
            .collect::<Vec<_>>();

        tracing::trace!(count = common_ancestors.len(), "found common ancestors");

        // redundant: an ancestor of some other common ancestor
        let best_common_ancestors = common_ancestors
            .iter()
            .filter(|(candidate, _, _)| {
                !common_ancestors.iter().any(|(other, _, _)| {
                    other != candidate && self.graph.is_ancestor(candidate, other)
                })
            })
            .collect::<Vec<_>>();

        best_common_ancestors
            .into_iter()
            .min_by(|left, right| {
                (left.1, left.2, left.0).cmp(&(right.1, right.2, right.0))
            })
            .map(|(commit_id, _, _)| (*commit_id).clone())
    }

    /// Commits from `branch_tip` back to `shared_base` (both included) along first parents
    ///
    /// Stops at a root commit when the base is not on the first-parent chain.
    pub fn path_to_base(&self, branch_tip: &CommitId, shared_base: &CommitId) -> Vec<CommitId> {
        let mut path = vec![branch_tip.clone()];
        let mut current = branch_tip;

        while current != shared_base {
            match self.graph.first_parent(current) {
                Some(parent) => {
                    path.push(parent.clone());
                    current = parent;
                }
                None => break,
            }
        }

        path
    }
}
