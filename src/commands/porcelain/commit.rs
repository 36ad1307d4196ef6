use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            return Err(RepositoryError::EmptyMessage.into());
        }
        if self.stage().is_clean() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let parent = self.refs().head_oid().clone();
        self.write_commit(message, Parents::Single(parent))?;

        self.persist()
    }

    /// Snapshot HEAD's blob map with the stage applied as a new commit
    ///
    /// Staged content is written to the database first, then the commit, then
    /// the current branch and HEAD move to it and the stage is cleared.
    pub(crate) fn write_commit(&mut self, message: &str, parents: Parents) -> anyhow::Result<ObjectId> {
        let head = self.head_commit()?;
        let mut blobs = head.blobs().clone();

        for (path, content) in self.stage().additions() {
            let blob_id = self.database().store_blob(content.clone())?;
            blobs.insert(path.clone(), blob_id);
        }
        for path in self.stage().removals() {
            blobs.remove(path);
        }

        let commit = Commit::new(
            message.to_string(),
            Commit::timestamp_from_env()?,
            parents,
            blobs,
        );
        let commit_id = self.database().store(&commit)?;

        self.refs_mut().update_head(commit_id.clone());
        self.stage_mut().clear();

        Ok(commit_id)
    }
}
