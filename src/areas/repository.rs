use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::stage::Stage;
use crate::areas::state::StateFile;
use crate::areas::workspace::Workspace;
use crate::artifacts::merge::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use crate::errors::RepositoryError;
use crate::METADATA_DIR;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeSet;
use std::path::Path;

const STATE_FILE: &str = "state";

/// An opened repository
///
/// Refs, HEAD and the stage are loaded when the repository is opened, mutated in
/// memory by the commands and written back by [`Repository::persist`]. Objects
/// are written to the database as soon as they are created, always before the
/// refs that make them reachable.
pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    state_file: StateFile,
    refs: Refs,
    stage: Stage,
}

impl Repository {
    /// Open the repository rooted at `path`
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;

        let state_file = Self::state_file_at(&path);
        if !state_file.exists() {
            return Err(RepositoryError::NotInitialized.into());
        }
        let (refs, stage) = state_file.load()?;

        Ok(Self::from_parts(path.into_boxed_path(), writer, refs, stage))
    }

    pub(crate) fn metadata_path(path: &Path) -> std::path::PathBuf {
        path.join(METADATA_DIR)
    }

    pub(crate) fn state_file_at(path: &Path) -> StateFile {
        StateFile::new(
            Self::metadata_path(path)
                .join(STATE_FILE)
                .into_boxed_path(),
        )
    }

    pub(crate) fn from_parts(
        path: Box<Path>,
        writer: Box<dyn std::io::Write>,
        refs: Refs,
        stage: Stage,
    ) -> Self {
        let database = Database::new(Self::metadata_path(&path).into_boxed_path());
        let state_file = Self::state_file_at(&path);
        let workspace = Workspace::new(path);

        Repository {
            writer: RefCell::new(writer),
            database,
            workspace,
            state_file,
            refs,
            stage,
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn graph(&'_ self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database)
    }

    pub fn status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    /// Write refs, HEAD and the stage back to disk
    pub fn persist(&self) -> anyhow::Result<()> {
        self.state_file.store(&self.refs, &self.stage)
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.load_commit(self.refs.head_oid())
    }

    /// Resolve a full or abbreviated commit ID
    pub fn resolve_commit(&self, commit_id: &str) -> anyhow::Result<ObjectId> {
        let mut matches = self.database.find_commits_by_prefix(commit_id)?;

        match matches.len() {
            0 => Err(RepositoryError::NoSuchCommit(commit_id.to_string()).into()),
            1 => Ok(matches.remove(0)),
            _ => Err(RepositoryError::AmbiguousCommitId(commit_id.to_string()).into()),
        }
    }

    /// Working tree files that are neither tracked by HEAD nor known to the stage
    pub fn untracked_files(&self, head: &Commit) -> anyhow::Result<BTreeSet<String>> {
        Ok(self
            .workspace
            .list_files()?
            .into_iter()
            .filter(|path| {
                !head.tracks(path) && !self.stage.is_staged(path) && !self.stage.is_removed(path)
            })
            .collect())
    }

    /// Refuse to touch the working tree while it holds untracked files
    pub fn check_untracked(&self, head: &Commit) -> anyhow::Result<()> {
        match self.untracked_files(head)?.into_iter().next() {
            Some(path) => Err(RepositoryError::UntrackedFileWouldBeOverwritten(path).into()),
            None => Ok(()),
        }
    }

    /// Make the working tree match `target` and clear the stage
    ///
    /// Files tracked by `head` but absent from `target` are deleted. The caller
    /// moves the refs.
    pub fn checkout_snapshot(&mut self, head: &Commit, target: &Commit) -> anyhow::Result<()> {
        self.check_untracked(head)?;

        // load every blob up front so a missing object aborts before any write
        let files = target
            .blobs()
            .iter()
            .map(|(path, blob_id)| Ok((path, self.database.load_blob(blob_id)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        for (path, blob) in files {
            self.workspace.write_file(path, blob.content())?;
        }

        for path in head.blobs().keys() {
            if !target.tracks(path) {
                self.workspace.remove_file(path)?;
            }
        }

        self.stage.clear();

        Ok(())
    }
}
