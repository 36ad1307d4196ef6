//! Stored object types and operations
//!
//! Everything the repository persists as immutable data is an object identified by
//! the SHA-1 of its serialized form. There are two kinds:
//!
//! - **Blob**: file content (raw bytes, identified by the hash of those bytes)
//! - **Commit**: snapshot with metadata (message, timestamp, parents, path -> blob map)
//!
//! Commits are serialized with a versioned canonical format so that the same fields
//! always produce the same identity.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
