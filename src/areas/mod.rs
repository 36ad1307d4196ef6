//! Core repository components
//!
//! - `database`: content-addressed store for blobs and commits
//! - `stage`: pending additions and removals for the next commit
//! - `refs`: branches and HEAD
//! - `state`: persistence of refs, HEAD and the stage as one unit
//! - `repository`: the opened repository tying the areas together
//! - `workspace`: working tree file system operations

pub mod database;
pub mod refs;
pub mod repository;
pub mod stage;
pub mod state;
pub mod workspace;
