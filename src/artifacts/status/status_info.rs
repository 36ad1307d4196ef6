use crate::areas::repository::Repository;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type FileSet = BTreeSet<String>;
pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;

/// Snapshot of the repository status
///
/// Every section is sorted; the `Display` output is what `status` prints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) current_branch: String,
    pub(crate) branches: Vec<String>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let stage = self.repository.stage();
        let head = self.repository.head_commit()?;

        let inspector = Inspector::new(self.repository, &head);
        let candidates = head
            .blobs()
            .keys()
            .chain(stage.additions().keys())
            .collect::<BTreeSet<_>>();

        let mut workspace_changeset = ChangeSet::new();
        for path in candidates {
            if let Some(change) = inspector.check_workspace_change(path)? {
                workspace_changeset.insert(path.clone(), change);
            }
        }

        Ok(StatusInfo {
            current_branch: refs.current_branch().to_string(),
            branches: refs.branches().map(|(name, _)| name.to_string()).collect(),
            staged_files: stage.additions().keys().cloned().collect(),
            removed_files: stage.removals().clone(),
            workspace_changeset,
            untracked_files: self.repository.untracked_files(&head)?,
        })
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(f, "*{branch}")?;
            } else {
                writeln!(f, "{branch}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for path in &self.staged_files {
            writeln!(f, "{path}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for path in &self.removed_files {
            writeln!(f, "{path}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &self.workspace_changeset {
            writeln!(f, "{path} {change}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for path in &self.untracked_files {
            writeln!(f, "{path}")?;
        }
        writeln!(f)
    }
}
