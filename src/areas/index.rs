//! wit index (staging area)
//!
//! The staging area is a plain directory mirroring what the next commit will
//! contain, keyed by paths relative to the repository root. It has no history:
//! `add` copies files in, merge promotes files into it, and checkout replaces
//! it wholesale with the target snapshot.
//!
//! ## Comparisons
//!
//! - against history: a staged file is pending unless some stored snapshot
//!   holds a byte-identical file at the same path
//! - against the working tree: a staged file whose working copy differs (or
//!   is gone) is "not staged"
//! - untracked artifacts: files present in some stored snapshot but absent
//!   from the staging area (history relative, not working tree relative)
//!
//! History comparisons scan every snapshot for every staged file.

use crate::areas::database::Database;
use crate::areas::workspace::{Workspace, copy_file, list_tree_files, replace_tree, same_content};
use anyhow::Context;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Index {
    /// Path to the staging directory (typically `.wit/staging_area`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Relative paths of every staged file
    pub fn entries(&self) -> anyhow::Result<BTreeSet<PathBuf>> {
        list_tree_files(&self.path)
    }

    pub fn entry_path(&self, relative_path: &Path) -> PathBuf {
        self.path.join(relative_path)
    }

    pub fn is_tracked(&self, relative_path: &Path) -> bool {
        self.entry_path(relative_path).is_file()
    }

    /// Copy working files (relative to the workspace root) into the staging area
    pub fn stage(&self, workspace: &Workspace, relative_paths: &[PathBuf]) -> anyhow::Result<()> {
        for relative_path in relative_paths {
            self.write_entry(relative_path, &workspace.file_path(relative_path))
                .with_context(|| format!("Failed to stage {:?}", relative_path))?;
            tracing::trace!(path = ?relative_path, "staged");
        }

        Ok(())
    }

    /// Overwrite (or create) one staged file with the content of `source`
    pub fn write_entry(&self, relative_path: &Path, source: &Path) -> anyhow::Result<()> {
        copy_file(source, &self.entry_path(relative_path))
    }

    /// Make the staging area an exact copy of `source` (a commit snapshot)
    pub fn replace_with(&self, source: &Path) -> anyhow::Result<()> {
        replace_tree(source, &self.path)
    }

    /// Staged files with no byte-identical copy at the same path in any stored commit
    pub fn diff_against_commits(&self, database: &Database) -> anyhow::Result<BTreeSet<PathBuf>> {
        let commit_ids = database.list_commit_ids()?;
        let mut pending = BTreeSet::new();

        for entry in self.entries()? {
            let staged_path = self.entry_path(&entry);
            let mut committed = false;

            for commit_id in &commit_ids {
                let committed_path = database.snapshot_path(commit_id).join(&entry);
                if committed_path.is_file() && same_content(&committed_path, &staged_path)? {
                    committed = true;
                    break;
                }
            }

            if !committed {
                pending.insert(entry);
            }
        }

        Ok(pending)
    }

    /// Staged files whose working copy differs from the staged one or is missing
    pub fn diff_against_workspace(
        &self,
        workspace: &Workspace,
    ) -> anyhow::Result<BTreeSet<PathBuf>> {
        let mut changed = BTreeSet::new();

        for entry in self.entries()? {
            let working_path = workspace.file_path(&entry);
            if !working_path.is_file() || !same_content(&working_path, &self.entry_path(&entry))? {
                changed.insert(entry);
            }
        }

        Ok(changed)
    }

    /// Files present in some stored snapshot but not in the staging area
    pub fn untracked_artifacts(&self, database: &Database) -> anyhow::Result<BTreeSet<PathBuf>> {
        let staged = self.entries()?;
        let mut untracked = BTreeSet::new();

        for commit_id in database.list_commit_ids()? {
            untracked.extend(
                database
                    .snapshot_files(&commit_id)?
                    .into_iter()
                    .filter(|file| !staged.contains(file)),
            );
        }

        Ok(untracked)
    }
}
