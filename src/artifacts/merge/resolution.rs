//! Three-way merge resolution
//!
//! Each path present in the current or the given commit is classified by comparing
//! its blob in the current commit, the given commit and the split point. The rules
//! are applied in order:
//!
//! 1. current == given: keep (this covers identical additions and paths absent on
//!    both sides)
//! 2. given == split: keep, only the current side changed
//! 3. current == split: take the given side, or delete the path if the given side
//!    removed it
//! 4. otherwise both sides changed the path differently: conflict

use crate::artifacts::objects::commit::BlobMap;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

const CONFLICT_START: &str = "<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &str = "=======\n";
const CONFLICT_END: &str = ">>>>>>>\n";

/// Outcome of merging one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// The working tree already holds the merged version
    Keep,
    /// Check out and stage the given branch's blob
    TakeGiven(ObjectId),
    /// Delete the file and mark it for removal
    Delete,
    /// Both sides changed the file; a deleted side is `None`
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

/// Classify one path from its blob in the current commit, the given commit and
/// the split point
pub fn classify(
    current: Option<&ObjectId>,
    given: Option<&ObjectId>,
    split: Option<&ObjectId>,
) -> MergeAction {
    if current == given || given == split {
        return MergeAction::Keep;
    }

    if current == split {
        return match given {
            Some(given) => MergeAction::TakeGiven(given.clone()),
            None => MergeAction::Delete,
        };
    }

    MergeAction::Conflict {
        current: current.cloned(),
        given: given.cloned(),
    }
}

/// Conflict file content, a deleted side contributing nothing
pub fn conflict_markers(current: &[u8], given: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_START.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + given.len()
            + CONFLICT_END.len(),
    );
    content.extend_from_slice(CONFLICT_START.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(given);
    content.extend_from_slice(CONFLICT_END.as_bytes());

    Bytes::from(content)
}

/// Per-path actions of a merge, in path order
///
/// Paths that only need to be kept are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<String, MergeAction>,
}

impl MergePlan {
    pub fn build(current: &BlobMap, given: &BlobMap, split: &BlobMap) -> Self {
        let paths = current.keys().chain(given.keys()).collect::<BTreeSet<_>>();

        let actions = paths
            .into_iter()
            .filter_map(|path| {
                let action = classify(current.get(path), given.get(path), split.get(path));
                debug_log!("Merge {path}: {action:?}");

                (action != MergeAction::Keep).then(|| (path.clone(), action))
            })
            .collect();

        MergePlan { actions }
    }

    pub fn actions(&self) -> impl Iterator<Item = (&String, &MergeAction)> {
        self.actions.iter()
    }

    pub fn has_conflicts(&self) -> bool {
        self.actions
            .values()
            .any(|action| matches!(action, MergeAction::Conflict { .. }))
    }
}
