//! Object store
//!
//! Holds every commit ever created as two co-located artifacts named by the
//! commit id:
//!
//! - `images/<id>/`: full recursive copy of the staging area at commit time
//! - `images/<id>.txt`: metadata (parents, date, message)
//!
//! Both are write-once. Only ids with a snapshot directory count as commits.

use crate::areas::workspace::{copy_tree, list_tree_files, write_atomically};
use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::MIN_COMMIT_ID_PREFIX_LENGTH;
use crate::artifacts::objects::commit::CommitMetadata;
use crate::artifacts::objects::commit_id::{CommitId, IdGenerator};
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn images_path(&self) -> &Path {
        &self.path
    }

    /// Persist a new commit: fresh id, metadata file, then a full copy of `snapshot_source`
    pub fn create_commit(
        &self,
        id_generator: &dyn IdGenerator,
        metadata: &CommitMetadata,
        snapshot_source: &Path,
    ) -> anyhow::Result<CommitId> {
        let commit_id = id_generator.generate();
        let snapshot_path = self.snapshot_path(&commit_id);

        std::fs::create_dir(&snapshot_path).with_context(|| {
            format!(
                "Unable to create commit directory {}",
                snapshot_path.display()
            )
        })?;

        write_atomically(
            &self.metadata_path(&commit_id),
            metadata.serialize().as_bytes(),
        )?;
        copy_tree(snapshot_source, &snapshot_path)?;

        tracing::debug!(
            commit = %commit_id,
            parents = metadata.parents().len(),
            "stored commit"
        );

        Ok(commit_id)
    }

    pub fn snapshot_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(commit_id.as_ref())
    }

    fn metadata_path(&self, commit_id: &CommitId) -> PathBuf {
        self.path.join(commit_id.metadata_file_name())
    }

    pub fn contains(&self, commit_id: &CommitId) -> bool {
        self.snapshot_path(commit_id).is_dir()
    }

    pub fn load_metadata(&self, commit_id: &CommitId) -> anyhow::Result<Option<CommitMetadata>> {
        let metadata_path = self.metadata_path(commit_id);
        if !metadata_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&metadata_path).with_context(|| {
            format!("Unable to read commit metadata {}", metadata_path.display())
        })?;

        CommitMetadata::parse(commit_id, &content).map(Some)
    }

    /// Parents of a commit; None for a root commit or a commit without metadata
    pub fn parents(&self, commit_id: &CommitId) -> anyhow::Result<Option<Vec<CommitId>>> {
        Ok(self
            .load_metadata(commit_id)?
            .map(|metadata| metadata.parents().to_vec())
            .filter(|parents| !parents.is_empty()))
    }

    /// Ids of every commit with a snapshot directory; stray metadata files are ignored
    pub fn list_commit_ids(&self) -> anyhow::Result<BTreeSet<CommitId>> {
        if !self.path.is_dir() {
            return Ok(BTreeSet::new());
        }

        let mut commit_ids = BTreeSet::new();
        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to list {}", self.path.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if let Ok(commit_id) = CommitId::try_parse(name) {
                commit_ids.insert(commit_id);
            }
        }

        Ok(commit_ids)
    }

    /// Relative paths of every file in a commit's snapshot
    pub fn snapshot_files(&self, commit_id: &CommitId) -> anyhow::Result<BTreeSet<PathBuf>> {
        list_tree_files(&self.snapshot_path(commit_id))
    }

    /// Find all commits whose id starts with the given prefix
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<CommitId>> {
        let prefix = prefix.to_ascii_lowercase();

        Ok(self
            .list_commit_ids()?
            .into_iter()
            .filter(|commit_id| commit_id.as_ref().starts_with(&prefix))
            .collect())
    }

    /// Resolve a full or abbreviated commit id to a stored commit
    pub fn resolve_commit(&self, target: &str) -> anyhow::Result<CommitId> {
        if let Ok(commit_id) = CommitId::try_parse(target.to_string()) {
            return if self.contains(&commit_id) {
                Ok(commit_id)
            } else {
                Err(WitError::UnknownReference(target.to_string()).into())
            };
        }

        let is_hex_prefix = target.len() >= MIN_COMMIT_ID_PREFIX_LENGTH
            && target.chars().all(|c| c.is_ascii_hexdigit());
        if !is_hex_prefix {
            return Err(WitError::UnknownReference(target.to_string()).into());
        }

        let mut candidates = self.find_commits_by_prefix(target)?;
        match candidates.len() {
            0 => Err(WitError::UnknownReference(target.to_string()).into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(WitError::AmbiguousCommitId {
                prefix: target.to_string(),
                candidates: candidates.iter().map(ToString::to_string).collect(),
            }
            .into()),
        }
    }
}
