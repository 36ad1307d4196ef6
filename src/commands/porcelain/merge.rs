use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::resolution::{MergeAction, MergePlan, conflict_markers};
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::io::Write;

const GIVEN_IS_ANCESTOR: &str = "Given branch is an ancestor of the current branch.";
const FAST_FORWARDED: &str = "Current branch fast-forwarded.";
const MERGE_CONFLICT: &str = "Encountered a merge conflict.";

impl Repository {
    /// Merge the given branch into the current one
    ///
    /// Conflicts do not abort the merge: conflicted files are written with markers,
    /// staged and committed like any other merged file.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.stage().is_clean() {
            return Err(RepositoryError::UncommittedChanges.into());
        }

        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| RepositoryError::BranchNotFound(branch_name.to_string()))?;
        let given_oid = self
            .refs()
            .read_branch(&branch_name)
            .cloned()
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()))?;
        if self.refs().is_current_branch(&branch_name) {
            return Err(RepositoryError::CannotMergeSelf.into());
        }

        let head_oid = self.refs().head_oid().clone();
        let split_oid = self.graph().split_point(&head_oid, &given_oid)?;
        debug_log!(
            "Merging {} into {} from split point {}",
            given_oid.to_short_oid(),
            head_oid.to_short_oid(),
            split_oid.to_short_oid()
        );

        if split_oid == given_oid {
            writeln!(self.writer(), "{GIVEN_IS_ANCESTOR}")?;
            return Ok(());
        }

        // everything past this point touches the working tree
        let head = self.head_commit()?;
        self.check_untracked(&head)?;

        let given = self.database().load_commit(&given_oid)?;
        if split_oid == head_oid {
            self.checkout_snapshot(&head, &given)?;
            self.refs_mut().update_head(given_oid);
            self.persist()?;

            writeln!(self.writer(), "{FAST_FORWARDED}")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let plan = MergePlan::build(head.blobs(), given.blobs(), split.blobs());
        self.apply_merge_plan(&head, &plan)?;

        let message = format!("Merged {} into {}.", branch_name, self.refs().current_branch());
        self.write_commit(&message, Parents::Merge(head_oid, given_oid))?;
        self.persist()?;

        if plan.has_conflicts() {
            writeln!(self.writer(), "{MERGE_CONFLICT}")?;
        }

        Ok(())
    }

    fn apply_merge_plan(&mut self, head: &Commit, plan: &MergePlan) -> anyhow::Result<()> {
        // resolve every file's content before touching the working tree
        let mut updates = Vec::new();
        for (path, action) in plan.actions() {
            let content = match action {
                MergeAction::Keep | MergeAction::Delete => None,
                MergeAction::TakeGiven(blob_oid) => Some(self.load_content(blob_oid)?),
                MergeAction::Conflict { current, given } => {
                    let current = self.load_optional_content(current.as_ref())?;
                    let given = self.load_optional_content(given.as_ref())?;
                    Some(conflict_markers(&current, &given))
                }
            };
            updates.push((path, action, content));
        }

        for (path, action, content) in updates {
            match (action, content) {
                (MergeAction::Delete, _) => {
                    self.workspace().remove_file(path)?;
                    self.stage_mut().remove(path, true)?;
                }
                (_, Some(content)) => {
                    self.workspace().write_file(path, &content)?;
                    self.stage_mut().add(path, content, head.blob(path));
                }
                (_, None) => {}
            }
        }

        Ok(())
    }

    fn load_content(&self, blob_oid: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.database().load_blob(blob_oid)?.into_content())
    }

    fn load_optional_content(&self, blob_oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match blob_oid {
            Some(blob_oid) => self.load_content(blob_oid),
            None => Ok(Bytes::new()),
        }
    }
}
