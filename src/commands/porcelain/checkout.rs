use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Restore a file from HEAD's commit
    pub fn checkout_file(&self, path: &str) -> anyhow::Result<()> {
        let head_oid = self.refs().head_oid().clone();

        self.checkout_file_at(head_oid.as_ref(), path)
    }

    /// Restore a file from a (possibly abbreviated) commit
    ///
    /// The restored version is not staged.
    pub fn checkout_file_at(&self, commit_id: &str, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(path)
            .ok_or_else(|| RepositoryError::FileNotInCommit(path.to_string()))?;
        let commit_oid = self.resolve_commit(commit_id)?;
        let commit = self.database().load_commit(&commit_oid)?;

        let blob_oid = commit
            .blob(&path)
            .ok_or_else(|| RepositoryError::FileNotInCommit(path.clone()))?;
        let blob = self.database().load_blob(blob_oid)?;

        self.workspace().write_file(&path, blob.content())
    }

    /// Switch to another branch, replacing the working tree with its snapshot
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::NoSuchBranch(branch_name.to_string()))?;

        let target_oid = self
            .refs()
            .read_branch(&branch_name)
            .cloned()
            .ok_or_else(|| RepositoryError::NoSuchBranch(branch_name.to_string()))?;
        if self.refs().is_current_branch(&branch_name) {
            return Err(RepositoryError::AlreadyOnBranch(branch_name.to_string()).into());
        }

        let head = self.head_commit()?;
        let target = self.database().load_commit(&target_oid)?;
        self.checkout_snapshot(&head, &target)?;
        self.refs_mut().set_head(&branch_name)?;

        self.persist()
    }
}
