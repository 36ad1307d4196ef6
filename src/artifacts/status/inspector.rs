use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

/// Compares working tree files against HEAD and the stage
#[derive(new)]
pub struct Inspector<'r> {
    repository: &'r Repository,
    head: &'r Commit,
}

impl<'r> Inspector<'r> {
    fn is_content_changed(&self, path: &str, expected: &ObjectId) -> anyhow::Result<bool> {
        let content = self.repository.workspace().read_file(path)?;

        Ok(&ObjectId::hash_bytes(&content) != expected)
    }

    /// Change of a path that the next commit would not pick up
    ///
    /// - staged, but deleted or changed again since it was staged
    /// - tracked and not marked for removal, but deleted or changed without staging
    pub fn check_workspace_change(&self, path: &str) -> anyhow::Result<Option<WorkspaceChangeType>> {
        let stage = self.repository.stage();
        let in_workspace = self.repository.workspace().contains(path);

        if let Some(staged_content) = stage.staged_content(path) {
            let staged_oid = ObjectId::hash_bytes(staged_content);
            return Ok(match in_workspace {
                false => Some(WorkspaceChangeType::Deleted),
                true if self.is_content_changed(path, &staged_oid)? => {
                    Some(WorkspaceChangeType::Modified)
                }
                true => None,
            });
        }

        if stage.is_removed(path) {
            return Ok(None);
        }

        match self.head.blob(path) {
            Some(_) if !in_workspace => Ok(Some(WorkspaceChangeType::Deleted)),
            Some(head_oid) if self.is_content_changed(path, head_oid)? => {
                Ok(Some(WorkspaceChangeType::Modified))
            }
            _ => Ok(None),
        }
    }
}
