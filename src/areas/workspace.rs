use crate::METADATA_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// Working tree rooted at the repository directory
///
/// Paths handed in and out are relative to the root and use `/` as separator.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Turn a user-supplied path into a workspace path
    ///
    /// `./a.txt`, `dir/../a.txt` and `a.txt` name the same file; backslashes are
    /// not separators. Returns `None` for paths that climb above the root.
    pub fn normalize(file_path: &str) -> Option<String> {
        let mut components = Vec::new();

        for component in Path::new(file_path).components() {
            match component {
                Component::Normal(name) => components.push(name.to_string_lossy().into_owned()),
                Component::ParentDir => {
                    components.pop()?;
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }

        Some(components.join("/"))
    }

    /// All regular files of the working tree, metadata directory excluded
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR);

        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Unable to walk working tree {}", self.path.display())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(self.path.as_ref())
                .with_context(|| format!("Path {} escapes the working tree", entry.path().display()))?;
            if let Some(path) = Self::normalize(&relative.to_string_lossy()) {
                files.insert(path);
            }
        }

        Ok(files)
    }

    pub fn contains(&self, file_path: &str) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))
            .with_context(|| format!("Unable to read file {file_path}"))?;

        Ok(Bytes::from(content))
    }

    /// Write a file, creating its parent directories as needed
    pub fn write_file(&self, file_path: &str, content: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory for {file_path}"))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Unable to open file {file_path}"))?;
        file.write_all(content)
            .with_context(|| format!("Unable to write file {file_path}"))?;

        Ok(())
    }

    /// Delete a file and any parent directories left empty by it
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Unable to remove file {file_path}"))?;
        }

        let mut current = full_path.parent();
        while let Some(dir) = current {
            if dir == self.path.as_ref() || !Self::is_empty_dir(dir) {
                break;
            }

            std::fs::remove_dir(dir)
                .with_context(|| format!("Unable to remove directory {}", dir.display()))?;
            current = dir.parent();
        }

        Ok(())
    }

    fn is_empty_dir(dir: &Path) -> bool {
        std::fs::read_dir(dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
    }
}
