//! Persisted repository state
//!
//! Refs, HEAD and the stage are the only mutable state of a repository. They are
//! read together when a repository is opened and written together when an
//! operation completes, through a temporary file that is renamed over the old
//! one, so a crash never leaves refs pointing at a half-written state.

use crate::areas::refs::Refs;
use crate::areas::stage::Stage;
use crate::artifacts::state::checksum::Checksum;
use crate::artifacts::state::state_header::StateHeader;
use crate::artifacts::state::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::errors::RepositoryError;
use anyhow::Context;
use fake::rand;
use std::io::{Cursor, Write};
use std::path::Path;

#[derive(Debug)]
pub struct StateFile {
    path: Box<Path>,
}

impl StateFile {
    pub fn new(path: Box<Path>) -> Self {
        StateFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load refs and stage
    ///
    /// A state file that cannot be decoded is reported as
    /// [`RepositoryError::CorruptState`].
    pub fn load(&self) -> anyhow::Result<(Refs, Stage)> {
        if !self.exists() {
            return Err(RepositoryError::NotInitialized.into());
        }

        let content = std::fs::read(&self.path)
            .with_context(|| format!("Unable to read state file {}", self.path.display()))?;

        Self::decode(content)
            .map_err(|error| RepositoryError::CorruptState(format!("{error:#}")).into())
    }

    /// Persist refs and stage atomically
    pub fn store(&self, refs: &Refs, stage: &Stage) -> anyhow::Result<()> {
        let content = Self::encode(refs, stage)?;

        let state_dir = self
            .path
            .parent()
            .context(format!("Invalid state path {}", self.path.display()))?;
        let temp_path = state_dir.join(format!("tmp-state-{}", rand::random::<u32>()));

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open state file {}", temp_path.display()))?;
        file.write_all(&content)
            .with_context(|| format!("Unable to write state file {}", temp_path.display()))?;
        file.sync_all()?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to rename state file to {}", self.path.display()))?;

        Ok(())
    }

    fn encode(refs: &Refs, stage: &Stage) -> anyhow::Result<Vec<u8>> {
        let mut writer = Checksum::new(Vec::new());

        writer.write(&StateHeader::current().serialize()?)?;
        refs.write_to(&mut writer)?;
        stage.write_to(&mut writer)?;
        writer.write_checksum()?;

        Ok(writer.into_inner())
    }

    fn decode(content: Vec<u8>) -> anyhow::Result<(Refs, Stage)> {
        let mut reader = Checksum::new(Cursor::new(content));

        let header = StateHeader::deserialize(&reader.read(HEADER_SIZE)?)?;
        if header.marker != SIGNATURE {
            anyhow::bail!("Invalid state file signature");
        }
        if header.version != VERSION {
            anyhow::bail!("Unsupported state file version: {}", header.version);
        }

        let refs = Refs::read_from(&mut reader)?;
        let stage = Stage::read_from(&mut reader)?;
        reader.verify()?;

        Ok((refs, stage))
    }
}
