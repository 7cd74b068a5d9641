use crate::areas::index::Index;
use crate::areas::refs::ActivatedBranch;
use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::commit_id::CommitId;

impl Repository {
    /// Switch to a branch (pointer move) or to a raw commit (detached, restores files)
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        if target != HEAD_REF_NAME
            && let Some(commit_id) = self.refs().read(target)?
        {
            return self.checkout_branch(target, &commit_id);
        }

        let commit_id = if target == HEAD_REF_NAME {
            self.refs()
                .read_head()?
                .ok_or_else(|| WitError::UnknownReference(target.to_string()))?
        } else {
            self.database().resolve_commit(target)?
        };

        let index = self.index();
        let index = index.lock().await;

        let status = self.inspect_status().initialize(&index).await?;
        if status.is_dirty() {
            return Err(status.dirty_error().into());
        }

        self.checkout_commit(&index, &commit_id)?;

        writeln!(
            self.writer(),
            "Note: switching to '{}'.\n\n\
            You are in 'detached head' state. New commits only move head until you check out a branch.",
            commit_id
        )?;

        Ok(())
    }

    fn checkout_branch(&self, branch: &str, commit_id: &CommitId) -> anyhow::Result<()> {
        self.set_activated(ActivatedBranch::Branch(branch.to_string()));
        self.refs().set_head(commit_id)?;
        self.persist_session()?;

        writeln!(self.writer(), "Switched to branch '{}'", branch)?;

        Ok(())
    }

    fn checkout_commit(&self, index: &Index, commit_id: &CommitId) -> anyhow::Result<()> {
        let untracked = index.untracked_artifacts(self.database())?;
        let snapshot_path = self.database().snapshot_path(commit_id);

        for file in self.database().snapshot_files(commit_id)? {
            // never clobber a working file the staging area does not know about
            if untracked.contains(&file) && self.workspace().contains_file(&file) {
                tracing::trace!(path = ?file, "kept untracked working file");
                continue;
            }

            self.workspace()
                .write_file_from(&file, &snapshot_path.join(&file))?;
        }

        self.refs().set_head(commit_id)?;
        index.replace_with(&snapshot_path)?;

        self.set_activated(ActivatedBranch::Detached);
        self.persist_session()?;
        tracing::debug!(commit = %commit_id, "checked out commit");

        Ok(())
    }
}
