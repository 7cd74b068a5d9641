use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::commit_id::CommitId;
use crate::artifacts::status::file_change::FileChangeType;
use derive_new::new;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub type FileSet = BTreeSet<PathBuf>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) last_commit: Option<CommitId>,
    pub(crate) to_commit: FileSet,
    pub(crate) not_staged: FileSet,
    pub(crate) untracked: FileSet,
}

impl StatusInfo {
    pub fn last_commit(&self) -> Option<&CommitId> {
        self.last_commit.as_ref()
    }

    pub fn to_commit(&self) -> &FileSet {
        &self.to_commit
    }

    pub fn not_staged(&self) -> &FileSet {
        &self.not_staged
    }

    pub fn untracked(&self) -> &FileSet {
        &self.untracked
    }

    /// Anything staged but not committed, or modified but not staged
    pub fn is_dirty(&self) -> bool {
        !self.to_commit.is_empty() || !self.not_staged.is_empty()
    }

    pub fn dirty_error(&self) -> WitError {
        WitError::DirtyStagingState {
            to_commit: Self::display_paths(&self.to_commit),
            not_staged: Self::display_paths(&self.not_staged),
        }
    }

    fn display_paths(files: &FileSet) -> Vec<String> {
        files
            .iter()
            .map(|file| file.to_string_lossy().into_owned())
            .collect()
    }

    fn fmt_section(
        f: &mut std::fmt::Formatter<'_>,
        change: FileChangeType,
        files: &FileSet,
    ) -> std::fmt::Result {
        let files = Self::display_paths(files)
            .iter()
            .map(|file| change.paint(file).to_string())
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(f, "{} {}", change, files)
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(last_commit) = &self.last_commit {
            writeln!(f, "Last commit id: {}", last_commit)?;
        }

        Self::fmt_section(f, FileChangeType::ToCommit, &self.to_commit)?;
        Self::fmt_section(f, FileChangeType::NotStaged, &self.not_staged)?;
        Self::fmt_section(f, FileChangeType::Untracked, &self.untracked)
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub async fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let database = self.repository.database();

        let last_commit = self.repository.refs().read_head()?;
        let to_commit = index.diff_against_commits(database)?;
        let not_staged = index.diff_against_workspace(self.repository.workspace())?;
        let untracked = index.untracked_artifacts(database)?;

        tracing::debug!(
            to_commit = to_commit.len(),
            not_staged = not_staged.len(),
            untracked = untracked.len(),
            "status collected"
        );

        Ok(StatusInfo {
            last_commit,
            to_commit,
            not_staged,
            untracked,
        })
    }
}
