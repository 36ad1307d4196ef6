use crate::areas::database::Database;
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::{Parents, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::RefCell;
use std::collections::HashMap;

/// Read-only view of the commit history stored in the object database
///
/// Slim commits are cached so repeated walks over the same history only decode
/// each commit once.
#[derive(Debug)]
pub struct CommitGraph<'r> {
    database: &'r Database,
    cache: RefCell<HashMap<ObjectId, SlimCommit>>,
}

impl<'r> CommitGraph<'r> {
    pub fn new(database: &'r Database) -> Self {
        CommitGraph {
            database,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn parents_of(&self, commit_id: &ObjectId) -> anyhow::Result<Parents> {
        Ok(self.database.load_commit(commit_id)?.parents().clone())
    }

    pub fn slim_commit(&self, commit_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        if let Some(slim_commit) = self.cache.borrow().get(commit_id) {
            return Ok(slim_commit.clone());
        }

        let slim_commit = self
            .database
            .load_commit(commit_id)?
            .to_slim(commit_id.clone());
        self.cache
            .borrow_mut()
            .insert(commit_id.clone(), slim_commit.clone());

        Ok(slim_commit)
    }

    /// Split point of two commits
    ///
    /// Every commit descends from the root commit, so two commits of the same
    /// repository always have one.
    pub fn split_point(&self, left: &ObjectId, right: &ObjectId) -> anyhow::Result<ObjectId> {
        let finder = SplitPointFinder::new(|commit_id| self.slim_commit(commit_id));

        finder
            .find_split_point(left, right)?
            .with_context(|| format!("Commits {left} and {right} share no history"))
    }
}
