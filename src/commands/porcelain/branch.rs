use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::WitError;

impl Repository {
    /// Create a branch pointing at the current `head`
    pub async fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head = self.refs().read_head()?.ok_or(WitError::NoCommitsYet)?;

        self.refs().append(branch_name.as_ref(), &head)?;

        Ok(())
    }
}
