//! Staging area
//!
//! The stage records the delta to apply on top of HEAD's blob map at the next
//! commit:
//!
//! - `additions`: path -> content that will be written as a blob on commit
//! - `removals`: paths that will be dropped from the blob map on commit
//!
//! A path is never in both sets. An empty stage means the repository is clean.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::record;
use crate::errors::RepositoryError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Read, Write};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    additions: BTreeMap<String, Bytes>,
    removals: BTreeSet<String>,
}

/// What `Stage::remove` decided about the working tree copy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Only a pending addition was dropped; the file stays where it is
    Unstaged,
    /// The file is tracked by HEAD and must be deleted from the working tree
    DeleteFromWorkspace,
}

impl Stage {
    /// Stage the current content of a path
    ///
    /// # Arguments
    ///
    /// * `path` - Working tree path
    /// * `content` - Current content of the file
    /// * `tracked` - Blob recorded for the path in HEAD, if any
    ///
    /// Content identical to HEAD's version is not a change: the path is dropped
    /// from the additions instead of being staged.
    pub fn add(&mut self, path: &str, content: Bytes, tracked: Option<&ObjectId>) {
        let content_oid = ObjectId::hash_bytes(&content);

        if tracked == Some(&content_oid) {
            self.additions.remove(path);
        } else {
            self.additions.insert(path.to_string(), content);
        }
        self.removals.remove(path);
    }

    /// Unstage a path and mark it for removal if HEAD tracks it
    pub fn remove(&mut self, path: &str, tracked: bool) -> anyhow::Result<Removal> {
        let was_staged = self.additions.remove(path).is_some();

        if tracked {
            self.removals.insert(path.to_string());
            return Ok(Removal::DeleteFromWorkspace);
        }

        if was_staged {
            Ok(Removal::Unstaged)
        } else {
            Err(RepositoryError::NothingToRemove(path.to_string()).into())
        }
    }

    pub fn is_clean(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    pub fn additions(&self) -> &BTreeMap<String, Bytes> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    pub fn staged_content(&self, path: &str) -> Option<&Bytes> {
        self.additions.get(path)
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_removed(&self, path: &str) -> bool {
        self.removals.contains(path)
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Checksum<W>) -> anyhow::Result<()> {
        record::write_u32(writer, self.additions.len() as u32)?;
        for (path, content) in &self.additions {
            record::write_str(writer, path)?;
            record::write_bytes(writer, content)?;
        }

        record::write_u32(writer, self.removals.len() as u32)?;
        for path in &self.removals {
            record::write_str(writer, path)?;
        }

        Ok(())
    }

    pub(crate) fn read_from<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<Self> {
        let mut stage = Stage::default();

        let additions_count = record::read_u32(reader)?;
        for _ in 0..additions_count {
            let path = record::read_string(reader)?;
            let content = record::read_bytes(reader)?;
            stage.additions.insert(path, content);
        }

        let removals_count = record::read_u32(reader)?;
        for _ in 0..removals_count {
            let path = record::read_string(reader)?;
            if stage.additions.contains_key(&path) {
                anyhow::bail!("Path {path} is both staged and removed");
            }
            stage.removals.insert(path);
        }

        Ok(stage)
    }
}
