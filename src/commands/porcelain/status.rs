use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn show_status(&self) -> anyhow::Result<()> {
        let status_info = self.status().initialize()?;

        write!(self.writer(), "{status_info}")?;

        Ok(())
    }
}
