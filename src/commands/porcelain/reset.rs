use crate::areas::repository::Repository;

impl Repository {
    /// Move the current branch to any commit and check out its snapshot
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target_oid = self.resolve_commit(commit_id)?;

        let head = self.head_commit()?;
        let target = self.database().load_commit(&target_oid)?;
        self.checkout_snapshot(&head, &target)?;
        self.refs_mut().update_head(target_oid);

        self.persist()
    }
}
