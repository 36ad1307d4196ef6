//! Branch references and HEAD
//!
//! References are human-readable names pointing to commits:
//!
//! - Branches: a name mapped to the branch's tip commit
//! - HEAD: the checked-out branch together with the commit it points to
//!
//! The invariant `branches[head.branch] == head.commit` holds whenever the refs are
//! at rest. All mutations go through methods that keep the two in step.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::record;
use crate::errors::RepositoryError;
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// The checked-out branch and its commit
#[derive(Debug, Clone, PartialEq, Eq)]
struct Head {
    branch: BranchName,
    commit: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    branches: BTreeMap<BranchName, ObjectId>,
    head: Head,
}

impl Refs {
    /// Create refs with a single branch checked out at the given commit
    pub fn new(branch: BranchName, commit: ObjectId) -> Self {
        Refs {
            branches: BTreeMap::from([(branch.clone(), commit.clone())]),
            head: Head { branch, commit },
        }
    }

    pub fn head_oid(&self) -> &ObjectId {
        &self.head.commit
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.head.branch
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        &self.head.branch == branch_name
    }

    /// Branches in alphabetical order
    pub fn branches(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }

    pub fn read_branch(&self, branch_name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(branch_name)
    }

    pub fn create_branch(&mut self, branch_name: BranchName, oid: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&branch_name) {
            return Err(RepositoryError::BranchAlreadyExists(branch_name.to_string()).into());
        }

        self.branches.insert(branch_name, oid);
        Ok(())
    }

    pub fn delete_branch(&mut self, branch_name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(branch_name) {
            return Err(RepositoryError::BranchNotFound(branch_name.to_string()).into());
        }
        if self.is_current_branch(branch_name) {
            return Err(RepositoryError::CannotRemoveCurrentBranch(branch_name.to_string()).into());
        }

        self.branches
            .remove(branch_name)
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()).into())
    }

    /// Move the current branch (and HEAD with it) to a commit
    pub fn update_head(&mut self, oid: ObjectId) {
        self.branches
            .insert(self.head.branch.clone(), oid.clone());
        self.head.commit = oid;
    }

    /// Check out another branch: HEAD follows the branch's tip
    pub fn set_head(&mut self, branch_name: &BranchName) -> anyhow::Result<()> {
        let oid = self
            .branches
            .get(branch_name)
            .cloned()
            .ok_or_else(|| RepositoryError::NoSuchBranch(branch_name.to_string()))?;

        self.head = Head {
            branch: branch_name.clone(),
            commit: oid,
        };
        Ok(())
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Checksum<W>) -> anyhow::Result<()> {
        record::write_str(writer, self.head.branch.as_ref())?;
        record::write_oid(writer, &self.head.commit)?;

        record::write_u32(writer, self.branches.len() as u32)?;
        for (branch_name, oid) in &self.branches {
            record::write_str(writer, branch_name.as_ref())?;
            record::write_oid(writer, oid)?;
        }

        Ok(())
    }

    pub(crate) fn read_from<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<Self> {
        let branch = BranchName::try_parse(record::read_string(reader)?)?;
        let commit = record::read_oid(reader)?;

        let mut branches = BTreeMap::new();
        let branches_count = record::read_u32(reader)?;
        for _ in 0..branches_count {
            let branch_name = BranchName::try_parse(record::read_string(reader)?)?;
            let oid = record::read_oid(reader)?;
            branches.insert(branch_name, oid);
        }

        if branches.get(&branch) != Some(&commit) {
            anyhow::bail!("HEAD does not match the tip of branch {branch}");
        }

        Ok(Refs {
            branches,
            head: Head { branch, commit },
        })
    }
}
