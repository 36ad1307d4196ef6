//! Data structures and algorithms
//!
//! - `branch`: branch name validation
//! - `merge`: split point search and three-way merge resolution
//! - `objects`: object types (blob, commit) and their identifiers
//! - `state`: binary codec of the persisted refs and stage
//! - `status`: working tree status inspection

pub mod branch;
pub mod merge;
pub mod objects;
pub mod state;
pub mod status;
