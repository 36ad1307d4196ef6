//! Split point search for three-way merges
//!
//! The split point of two commits is the common ancestor a merge uses as its base.
//!
//! ## Algorithm
//!
//! A breadth-first walk starts from both tips at once. Every queued entry carries
//! the side it was reached from and its distance from that side's tip, so the first
//! time a commit is reached from a side is also its shortest distance from it.
//!
//! Once both ancestries are exhausted, every commit reached from both sides is a
//! common ancestor. The split point is the one with the smallest sum of distances,
//! ties broken by the earlier timestamp and then by the smaller object ID, so the
//! result is deterministic for any history shape (including criss-cross merges).
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = SplitPointFinder::new(|commit_id| graph.slim_commit(commit_id));
//!
//! let split_point = finder.find_split_point(&head, &other)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What the walk learned about one commit
#[derive(Debug)]
struct Visit {
    state: VisitState,
    source_distance: usize,
    target_distance: usize,
    commit: SlimCommit,
}

impl Visit {
    fn distance_sum(&self) -> usize {
        self.source_distance + self.target_distance
    }
}

/// Finds the split point of two commits
///
/// Generic over the commit loader so it runs against the object database as well as
/// against an in-memory graph.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// # Arguments
    ///
    /// * `commit_loader` - Loads the parents and timestamp of a commit. Root commits
    ///   have an empty parents vector.
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the split point of `source` and `target`
    ///
    /// # Returns
    ///
    /// - `Some(oid)` - the closest common ancestor (`source` itself when both are equal)
    /// - `None` - the commits share no history
    pub fn find_split_point(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if source_commit_id == target_commit_id {
            return Ok(Some(source_commit_id.clone()));
        }

        let visits = self.walk(source_commit_id, target_commit_id)?;

        debug_log!(
            "Split point candidates: {}",
            visits
                .iter()
                .filter(|(_, visit)| visit.state.contains(VisitState::VISITED_FROM_BOTH))
                .map(|(oid, visit)| format!("{}: {}", oid.to_short_oid(), visit.distance_sum()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let split_point = visits
            .into_values()
            .filter(|visit| visit.state.contains(VisitState::VISITED_FROM_BOTH))
            .min_by(|left, right| {
                left.distance_sum()
                    .cmp(&right.distance_sum())
                    .then_with(|| left.commit.timestamp.cmp(&right.commit.timestamp))
                    .then_with(|| left.commit.oid.cmp(&right.commit.oid))
            })
            .map(|visit| visit.commit.oid);

        debug_log!(
            "Split point of {} and {}: {:?}",
            source_commit_id.to_short_oid(),
            target_commit_id.to_short_oid(),
            split_point.as_ref().map(ObjectId::to_short_oid)
        );

        Ok(split_point)
    }

    fn walk(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<HashMap<ObjectId, Visit>> {
        let mut visits = HashMap::<ObjectId, Visit>::new();
        let mut queue = VecDeque::from([
            (source_commit_id.clone(), VisitState::VISITED_FROM_SOURCE, 0),
            (target_commit_id.clone(), VisitState::VISITED_FROM_TARGET, 0),
        ]);

        while let Some((commit_id, side, distance)) = queue.pop_front() {
            let visit = match visits.entry(commit_id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(Visit {
                    state: VisitState::NONE,
                    source_distance: 0,
                    target_distance: 0,
                    commit: (self.commit_loader)(&commit_id)?,
                }),
            };

            // breadth-first: the first arrival from a side is the shortest one
            if visit.state.contains(side) {
                continue;
            }
            visit.state |= side;
            if side == VisitState::VISITED_FROM_SOURCE {
                visit.source_distance = distance;
            } else {
                visit.target_distance = distance;
            }

            debug_log!(
                "Visiting commit {}: state={} distance={}",
                commit_id.to_short_oid(),
                visit.state,
                distance
            );

            for parent_id in &visit.commit.parents {
                queue.push_back((parent_id.clone(), side, distance + 1));
            }
        }

        Ok(visits)
    }
}
