use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store
///
/// Blobs and commits live in separate flat directories keyed by their hash.
/// An object is written once and never modified afterwards.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Create the object directories
    pub fn init(&self) -> anyhow::Result<()> {
        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let dir = self.type_path(object_type);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Unable to create object directory {}", dir.display()))?;
        }

        Ok(())
    }

    /// Store an object unless it already exists
    ///
    /// # Returns
    ///
    /// The object ID, which is the same for identical content no matter how often
    /// it is stored.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::hash_bytes(&object_content);
        let object_path = self.object_path(object.object_type(), &object_id);

        // write the object to disk unless it already exists
        if !object_path.exists() {
            debug_log!("Writing {} {}", object.object_type(), object_id);
            self.write_object(object_path, object_content)?;
        }

        Ok(object_id)
    }

    pub fn store_blob(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.store(&Blob::new(content))
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_path(object_type, object_id).is_file()
    }

    pub fn contains_blob(&self, object_id: &ObjectId) -> bool {
        self.contains(ObjectType::Blob, object_id)
    }

    pub fn contains_commit(&self, object_id: &ObjectId) -> bool {
        self.contains(ObjectType::Commit, object_id)
    }

    /// Load the raw (decompressed) content of an object
    ///
    /// A missing object is reported as [`RepositoryError::ObjectNotFound`]: every
    /// hash handed to the database comes from a ref or a commit, so a miss means
    /// the store is corrupt.
    pub fn load(&self, object_type: ObjectType, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_type, object_id);
        if !object_path.is_file() {
            return Err(RepositoryError::ObjectNotFound(object_id.to_string()).into());
        }

        self.read_object(object_path)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let content = self.load(ObjectType::Blob, object_id)?;
        Blob::deserialize(Cursor::new(content))
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let content = self.load(ObjectType::Commit, object_id)?;
        Commit::deserialize(Cursor::new(content))
            .with_context(|| format!("Unable to parse commit {object_id}"))
    }

    /// List the IDs of every stored commit, in directory order
    pub fn commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let dir_path = self.type_path(ObjectType::Commit);
        let mut commit_ids = Vec::new();

        for entry in std::fs::read_dir(&dir_path)
            .with_context(|| format!("Unable to list {}", dir_path.display()))?
        {
            let entry = entry?;
            let file_name = entry.file_name();

            // skip leftovers of interrupted writes
            if let Ok(oid) = ObjectId::try_parse(file_name.to_string_lossy().to_string()) {
                commit_ids.push(oid);
            }
        }

        Ok(commit_ids)
    }

    /// Find all commits whose ID starts with the given prefix.
    ///
    /// # Arguments
    ///
    /// * `prefix` - A hexadecimal string prefix (e.g., "abc", "a1b2c3")
    ///
    /// # Returns
    ///
    /// A vector of all matching ObjectIds. If no matches are found, returns an empty vector.
    /// If multiple matches are found, all are returned (indicating an ambiguous prefix).
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        Ok(self
            .commit_ids()?
            .into_iter()
            .filter(|oid| oid.matches_prefix(prefix))
            .collect())
    }

    fn type_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.dir_name())
    }

    fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.type_path(object_type).join(object_id.as_ref())
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        // compress the object content
        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
