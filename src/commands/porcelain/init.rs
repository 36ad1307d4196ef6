use crate::DEFAULT_BRANCH;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::areas::stage::Stage;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::fs;
use std::path::Path;

impl Repository {
    /// Create a repository at `path` holding only the root commit on `master`
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;

        let metadata_path = Self::metadata_path(&path);
        if metadata_path.exists() {
            return Err(RepositoryError::AlreadyInitialized.into());
        }

        fs::create_dir_all(&metadata_path).with_context(|| {
            format!("Failed to create directory {}", metadata_path.display())
        })?;

        let root_commit = Commit::root();
        let refs = Refs::new(
            BranchName::try_parse(DEFAULT_BRANCH.to_string())?,
            root_commit.object_id()?,
        );

        let repository = Self::from_parts(path.into_boxed_path(), writer, refs, Stage::default());
        repository
            .database()
            .init()
            .context("Failed to create object directories")?;
        repository.database().store(&root_commit)?;
        repository.persist()?;

        Ok(repository)
    }
}
