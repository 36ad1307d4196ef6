use crate::areas::repository::Repository;
use crate::areas::stage::Removal;
use crate::areas::workspace::Workspace;
use crate::errors::RepositoryError;

impl Repository {
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(path)
            .ok_or_else(|| RepositoryError::NothingToRemove(path.to_string()))?;
        let tracked = self.head_commit()?.tracks(&path);

        if self.stage_mut().remove(&path, tracked)? == Removal::DeleteFromWorkspace {
            self.workspace().remove_file(&path)?;
        }

        self.persist()
    }
}
