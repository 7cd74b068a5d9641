//! Commit ancestry graph
//!
//! Not persisted anywhere: it is rebuilt on demand by scanning every stored
//! commit and reading its `parents` field.

use crate::areas::database::Database;
use crate::artifacts::objects::commit_id::CommitId;
use std::collections::{BTreeMap, HashMap, VecDeque};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitGraph {
    parents: BTreeMap<CommitId, Vec<CommitId>>,
}

impl CommitGraph {
    pub fn load(database: &Database) -> anyhow::Result<Self> {
        let mut parents = BTreeMap::new();

        for commit_id in database.list_commit_ids()? {
            let commit_parents = database.parents(&commit_id)?.unwrap_or_default();
            parents.insert(commit_id, commit_parents);
        }

        Ok(CommitGraph { parents })
    }

    pub fn from_parents(parents: BTreeMap<CommitId, Vec<CommitId>>) -> Self {
        CommitGraph { parents }
    }

    pub fn contains(&self, commit_id: &CommitId) -> bool {
        self.parents.contains_key(commit_id)
    }

    /// Parents of a commit; empty for roots and unknown ids
    pub fn parents_of(&self, commit_id: &CommitId) -> &[CommitId] {
        self.parents
            .get(commit_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn first_parent(&self, commit_id: &CommitId) -> Option<&CommitId> {
        self.parents_of(commit_id).first()
    }

    pub fn commit_ids(&self) -> impl Iterator<Item = &CommitId> {
        self.parents.keys()
    }

    /// Every `(child, parent)` pair
    pub fn edges(&self) -> impl Iterator<Item = (&CommitId, &CommitId)> {
        self.parents
            .iter()
            .flat_map(|(child, parents)| parents.iter().map(move |parent| (child, parent)))
    }

    /// Every commit reachable from `commit_id` (itself included) with its
    /// shortest distance in parent hops
    pub fn ancestors(&self, commit_id: &CommitId) -> HashMap<CommitId, usize> {
        let mut distances = HashMap::from([(commit_id.clone(), 0)]);
        let mut queue = VecDeque::from([commit_id.clone()]);

        while let Some(current) = queue.pop_front() {
            let distance = distances[&current];

            for parent in self.parents_of(&current) {
                if !distances.contains_key(parent) {
                    distances.insert(parent.clone(), distance + 1);
                    queue.push_back(parent.clone());
                }
            }
        }

        distances
    }

    pub fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> bool {
        self.ancestors(descendant).contains_key(ancestor)
    }
}
