use crate::areas::refs::ActivatedBranch;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create `.wit/images` and `.wit/staging_area`; an existing repository is left untouched
    pub async fn init(&mut self) -> anyhow::Result<()> {
        let reinitialized = self.wit_path().is_dir();

        fs::create_dir_all(self.database().images_path())
            .context("Failed to create .wit/images directory")?;

        {
            let index = self.index();
            let index = index.lock().await;
            fs::create_dir_all(index.path())
                .context("Failed to create .wit/staging_area directory")?;
        }

        if !self.refs().activated_path().exists() {
            self.set_activated(ActivatedBranch::Branch(BranchName::default_branch().to_string()));
            self.persist_session()?;
        }

        let verb = if reinitialized {
            "Reinitialized existing"
        } else {
            "Initialized empty"
        };
        writeln!(
            self.writer(),
            "{} wit repository in {}",
            verb,
            self.wit_path().display()
        )?;

        Ok(())
    }
}
