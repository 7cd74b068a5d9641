use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::same_content;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::core::error::WitError;
use crate::artifacts::graph::commit_graph::CommitGraph;
use crate::artifacts::merge::shared_base::SharedBaseFinder;
use crate::artifacts::objects::commit::CommitKind;
use crate::artifacts::objects::commit_id::CommitId;
use std::collections::BTreeMap;
use std::path::PathBuf;

impl Repository {
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let branch_tip = self
            .refs()
            .read(branch)?
            .filter(|_| branch != HEAD_REF_NAME)
            .ok_or_else(|| WitError::UnknownReference(branch.to_string()))?;
        let head = self.refs().read_head()?.ok_or(WitError::NoCommitsYet)?;

        if head == branch_tip {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(());
        }

        {
            let index = self.index();
            let index = index.lock().await;

            let not_staged = index.diff_against_workspace(self.workspace())?;
            if !not_staged.is_empty() {
                return Err(WitError::DirtyStagingState {
                    to_commit: vec![],
                    not_staged: not_staged
                        .iter()
                        .map(|file| file.to_string_lossy().into_owned())
                        .collect(),
                }
                .into());
            }

            let graph = CommitGraph::load(self.database())?;
            let finder = SharedBaseFinder::new(&graph);
            let shared_base = finder
                .find_shared_base(&head, &branch_tip)
                .ok_or_else(|| WitError::NoSharedBase {
                    head: head.to_string(),
                    branch: branch_tip.to_string(),
                })?;
            let path_to_base = finder.path_to_base(&branch_tip, &shared_base);

            eprintln!(
                "Merging {} into {} (base {})",
                branch_tip.to_short_id(),
                head.to_short_id(),
                shared_base.to_short_id()
            );

            let promotions = self.collect_promotions(&index, &shared_base, &path_to_base)?;
            let in_the_way = self.untracked_in_the_way(&index, &promotions)?;
            if !in_the_way.is_empty() {
                return Err(WitError::UntrackedFilesInTheWay(in_the_way).into());
            }

            self.promote_changes(&index, &promotions)?;
        }

        let commit_id = self
            .write_commit(
                CommitKind::merge(branch, branch_tip),
                CommitKind::merge_message(branch),
            )
            .await?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_id.to_short_id(),
            CommitKind::merge_message(branch)
        )?;

        Ok(())
    }

    /// Files of the branch side that differ from both the shared base and staging, newest version each
    fn collect_promotions(
        &self,
        index: &Index,
        shared_base: &CommitId,
        path_to_base: &[CommitId],
    ) -> anyhow::Result<BTreeMap<PathBuf, PathBuf>> {
        let base_snapshot = self.database().snapshot_path(shared_base);

        // oldest first, so the most recent version on the branch wins
        let mut candidates = BTreeMap::<PathBuf, PathBuf>::new();
        for commit_id in path_to_base.iter().rev() {
            let snapshot = self.database().snapshot_path(commit_id);
            for file in self.database().snapshot_files(commit_id)? {
                let source = snapshot.join(&file);
                candidates.insert(file, source);
            }
        }

        let mut promotions = BTreeMap::new();
        for (file, source) in candidates {
            let base_file = base_snapshot.join(&file);
            if base_file.is_file() && same_content(&source, &base_file)? {
                continue;
            }

            let staged_file = index.entry_path(&file);
            if staged_file.is_file() && same_content(&source, &staged_file)? {
                continue;
            }

            promotions.insert(file, source);
        }

        Ok(promotions)
    }

    /// Promoted paths holding a different, never staged working file
    fn untracked_in_the_way(
        &self,
        index: &Index,
        promotions: &BTreeMap<PathBuf, PathBuf>,
    ) -> anyhow::Result<Vec<String>> {
        let mut in_the_way = vec![];
        for (file, source) in promotions {
            if !self.workspace().contains_file(file) || index.is_tracked(file) {
                continue;
            }
            if !same_content(source, &self.workspace().file_path(file))? {
                in_the_way.push(file.to_string_lossy().into_owned());
            }
        }

        Ok(in_the_way)
    }

    /// Copy the branch side's changes into staging and the working tree
    fn promote_changes(
        &self,
        index: &Index,
        promotions: &BTreeMap<PathBuf, PathBuf>,
    ) -> anyhow::Result<()> {
        for (file, source) in promotions {
            index.write_entry(file, source)?;
            self.workspace().write_file_from(file, source)?;
            tracing::trace!(path = ?file, from = ?source, "promoted");
        }

        Ok(())
    }
}
