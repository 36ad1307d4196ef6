//! bitlet - a small content-addressed version-control engine
//!
//! The crate is organized the same way as the on-disk repository:
//!
//! - `areas`: the stateful pieces of a repository (object database, stage, refs, workspace)
//! - `artifacts`: data structures and algorithms (objects, split point search, merge resolution)
//! - `commands`: user-facing operations implemented on top of [`Repository`]
//! - `errors`: domain errors reported to the user
//!
//! [`Repository`]: areas::repository::Repository

/// Macro for debug logging that is enabled with the debug_merge feature flag
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Name of the metadata directory at the repository root
pub const METADATA_DIR: &str = ".bitlet";

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Environment variable used to pin commit timestamps
pub const COMMIT_DATE_ENV: &str = "BITLET_COMMIT_DATE";
