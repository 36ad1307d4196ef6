//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A commit message
//! - A timestamp with timezone offset
//! - Parent commit ID(s): none for the root, one for regular commits, two for merges
//! - A blob map from path to blob ID
//!
//! ## Format
//!
//! The canonical serialization (version 1), hashed to obtain the commit ID:
//! ```text
//! bitlet-commit 1
//! time <unix-seconds> <+hhmm>
//! parent <first-parent-sha>
//! parent <merge-parent-sha>
//! blob <blob-sha> <path>
//!
//! <commit message>
//! ```
//!
//! Blob lines are sorted by path, so the same snapshot always serializes to the same
//! bytes regardless of how the map was built.

use crate::COMMIT_DATE_ENV;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Version tag written on the first line of every serialized commit
pub const COMMIT_FORMAT_VERSION: u32 = 1;

const COMMIT_FORMAT_MARKER: &str = "bitlet-commit";

/// Message of the root commit created by `init`
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Map from a file path (relative, `/`-separated) to the blob holding its content
pub type BlobMap = BTreeMap<String, ObjectId>;

/// Parent links of a commit
///
/// Whether a commit is a merge commit is encoded in the variant rather than in
/// a pair of optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parents {
    /// The root commit created by `init`
    Root,
    /// A regular commit
    Single(ObjectId),
    /// A merge commit: the current branch's tip first, the merged branch's tip second
    Merge(ObjectId, ObjectId),
}

impl Parents {
    pub fn first(&self) -> Option<&ObjectId> {
        match self {
            Parents::Root => None,
            Parents::Single(parent) | Parents::Merge(parent, _) => Some(parent),
        }
    }

    pub fn second(&self) -> Option<&ObjectId> {
        match self {
            Parents::Merge(_, parent) => Some(parent),
            _ => None,
        }
    }

    pub fn to_vec(&self) -> Vec<ObjectId> {
        self.first().into_iter().chain(self.second()).cloned().collect()
    }

    fn try_from_vec(parents: Vec<ObjectId>) -> anyhow::Result<Self> {
        let mut parents = parents.into_iter();
        match (parents.next(), parents.next(), parents.next()) {
            (None, _, _) => Ok(Parents::Root),
            (Some(first), None, _) => Ok(Parents::Single(first)),
            (Some(first), Some(second), None) => Ok(Parents::Merge(first, second)),
            _ => Err(anyhow::anyhow!("Invalid commit object: too many parents")),
        }
    }
}

/// Slim representation of a commit
///
/// Contains only essential information for graph traversal like split point finding.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs, first parent first
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for tie-breaking)
    pub timestamp: DateTime<FixedOffset>,
}

/// Commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Commit message
    message: String,
    /// When the commit was made
    timestamp: DateTime<FixedOffset>,
    /// Parent commit IDs
    parents: Parents,
    /// Snapshot of tracked files
    blobs: BlobMap,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parents: Parents,
        blobs: BlobMap,
    ) -> Self {
        Commit {
            message,
            timestamp,
            parents,
            blobs,
        }
    }

    /// The root commit every repository starts from
    pub fn root() -> Self {
        Commit::new(
            ROOT_COMMIT_MESSAGE.to_string(),
            DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            Parents::Root,
            BlobMap::new(),
        )
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn blobs(&self) -> &BlobMap {
        &self.blobs
    }

    /// Blob recorded for a path, if the path is tracked by this commit
    pub fn blob(&self, path: &str) -> Option<&ObjectId> {
        self.blobs.get(path)
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.blobs.contains_key(path)
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.to_vec(),
            timestamp: self.timestamp,
        }
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Timestamp for a new commit
    ///
    /// Reads `BITLET_COMMIT_DATE` if set (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`),
    /// otherwise uses the current local time.
    pub fn timestamp_from_env() -> anyhow::Result<DateTime<FixedOffset>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .with_context(|| format!("Invalid {COMMIT_DATE_ENV} value: {date_str}")),
            Err(_) => Ok(chrono::Local::now().fixed_offset()),
        }
    }

    fn parse_time(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        // Format: "<unix-seconds> <+hhmm>"
        let (seconds, timezone) = value
            .split_once(' ')
            .context("Invalid commit object: invalid time line")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: invalid timestamp")?;

        let (sign, digits) = match timezone.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => anyhow::bail!("Invalid commit object: invalid timezone {timezone}"),
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!("Invalid commit object: invalid timezone {timezone}");
        }
        let hours = digits[..2].parse::<i32>()?;
        let minutes = digits[2..].parse::<i32>()?;
        let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .context("Invalid commit object: timezone out of range")?;

        let datetime = DateTime::from_timestamp(seconds, 0)
            .context("Invalid commit object: timestamp out of range")?;

        Ok(datetime.with_timezone(&offset))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("{COMMIT_FORMAT_MARKER} {COMMIT_FORMAT_VERSION}"));
        object_content.push(format!(
            "time {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for parent in self.parents.to_vec() {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        for (path, blob_oid) in &self.blobs {
            if path.contains('\n') {
                anyhow::bail!("Cannot record path with a line break: {path:?}");
            }
            object_content.push(format!("blob {} {}", blob_oid.as_ref(), path));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        Ok(Bytes::from(object_content.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let version_line = lines
            .next()
            .context("Invalid commit object: missing version line")?;
        let version = version_line
            .strip_prefix(COMMIT_FORMAT_MARKER)
            .map(str::trim)
            .context("Invalid commit object: invalid version line")?;
        if version != COMMIT_FORMAT_VERSION.to_string() {
            anyhow::bail!("Unsupported commit format version: {version}");
        }

        let time_line = lines
            .next()
            .context("Invalid commit object: missing time line")?;
        let timestamp = Self::parse_time(
            time_line
                .strip_prefix("time ")
                .context("Invalid commit object: invalid time line")?,
        )?;

        let mut parents = Vec::new();
        let mut blobs = BlobMap::new();
        for line in lines {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                if !blobs.is_empty() {
                    anyhow::bail!("Invalid commit object: parent after blob entries");
                }
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(entry) = line.strip_prefix("blob ") {
                let (blob_oid, path) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid blob line")?;
                blobs.insert(path.to_string(), ObjectId::try_parse(blob_oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        Ok(Self::new(
            message.to_string(),
            timestamp,
            Parents::try_from_vec(parents)?,
            blobs,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
