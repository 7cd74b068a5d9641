use crate::areas::repository::Repository;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let index = index.lock().await;

        let status = self.inspect_status().initialize(&index).await?;

        write!(self.writer(), "{}", status)?;

        Ok(())
    }
}
