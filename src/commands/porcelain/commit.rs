use crate::areas::repository::Repository;
use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::commit::{CommitKind, CommitMetadata};
use crate::artifacts::objects::commit_id::CommitId;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let is_root = self.refs().read_head()?.is_none();
        let commit_id = self
            .write_commit(CommitKind::Ordinary, message.to_string())
            .await?;

        let root_marker = if is_root { "(root-commit) " } else { "" };
        writeln!(
            self.writer(),
            "[{}{}] {}",
            root_marker,
            commit_id.to_short_id(),
            message
        )?;

        Ok(())
    }

    /// Snapshot the staging area and move references according to `kind`
    pub(crate) async fn write_commit(
        &self,
        kind: CommitKind,
        message: String,
    ) -> anyhow::Result<CommitId> {
        let head = self.refs().read_head()?;

        let parents = match (&kind, &head) {
            (CommitKind::Ordinary, Some(head)) => vec![head.clone()],
            (CommitKind::Ordinary, None) => vec![],
            (CommitKind::Merge { tip, .. }, Some(head)) => vec![head.clone(), tip.clone()],
            (CommitKind::Merge { .. }, None) => return Err(WitError::NoCommitsYet.into()),
        };

        let metadata = CommitMetadata::new(parents, self.config().commit_date(), message);

        let commit_id = {
            let index = self.index();
            let index = index.lock().await;

            self.database()
                .create_commit(self.id_generator(), &metadata, index.path())?
        };

        match head {
            Some(previous_head) => self.advance_references(&kind, &previous_head, &commit_id)?,
            None => {
                self.refs().initialize(&commit_id)?;
            }
        }

        Ok(commit_id)
    }

    fn advance_references(
        &self,
        kind: &CommitKind,
        previous_head: &CommitId,
        commit_id: &CommitId,
    ) -> anyhow::Result<()> {
        let activated = self.activated().clone();

        match kind {
            CommitKind::Ordinary => {
                // the activated branch follows only if it sat exactly at head
                if let Some(branch) = activated.branch_name() {
                    self.refs().rename(branch, previous_head, commit_id)?;
                }
            }
            CommitKind::Merge { .. } => {
                if let Some(branch) = activated.branch_name() {
                    self.refs().set(branch, commit_id)?;
                }
            }
        }

        self.refs().set_head(commit_id)
    }
}
