use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;

impl Repository {
    /// Create a branch pointing at HEAD's commit, without checking it out
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.refs().head_oid().clone();

        self.refs_mut().create_branch(branch_name, head_oid)?;

        self.persist()
    }

    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(branch_name.to_string()))?;

        self.refs_mut().delete_branch(&branch_name)?;

        self.persist()
    }
}
