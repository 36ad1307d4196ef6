//! Binary codec for the persisted repository state
//!
//! The state file holds the branch refs, HEAD and the stage as one unit:
//!
//! - Header: 4-byte signature and a version number
//! - Records: length-prefixed strings and byte strings in network byte order
//! - Checksum: SHA-1 of everything before it
//!
//! `record` holds the primitive read/write helpers shared by the refs and stage
//! sections.

pub mod checksum;
pub mod record;
pub mod state_header;

/// Signature at the start of the state file
pub const SIGNATURE: &str = "BLST";
/// Current state file format version
pub const VERSION: u32 = 1;
/// Header is signature (4 bytes) + version (4 bytes)
pub const HEADER_SIZE: usize = 8;
/// Size of the trailing SHA-1 checksum
pub const CHECKSUM_SIZE: usize = 20;
