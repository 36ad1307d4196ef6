use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::RepositoryError;

impl Repository {
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(path)
            .ok_or_else(|| RepositoryError::FileNotFound(path.to_string()))?;
        if !self.workspace().contains(&path) {
            return Err(RepositoryError::FileNotFound(path).into());
        }

        let content = self.workspace().read_file(&path)?;
        let head = self.head_commit()?;
        self.stage_mut().add(&path, content, head.blob(&path));

        self.persist()
    }
}
