use crate::areas::repository::Repository;
use std::path::Path;

impl Repository {
    /// Stage a file, or every file below a directory, keyed by its path relative to the root
    pub async fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let index = self.index();
        let index = index.lock().await;

        let relative_path = self.workspace().relative_path(Path::new(path))?;
        let files = self.workspace().list_files(Some(&relative_path))?;

        index.stage(self.workspace(), &files)?;
        tracing::debug!(count = files.len(), path, "added files");

        Ok(())
    }
}
