//! User-facing commands
//!
//! Each command is an `impl Repository` block. Commands that change refs or the
//! stage persist the repository state before returning; a command that fails
//! leaves the persisted state untouched.
//!
//! ## Commands
//!
//! - `init`: create a repository with its root commit
//! - `add` / `rm`: stage additions and removals
//! - `commit`: record the stage as a new commit
//! - `log`: history of the current branch, every commit, or commits by message
//! - `status`: branches, stage and working tree changes
//! - `checkout`: restore files or switch branches
//! - `branch`: create and delete branches
//! - `reset`: move the current branch to any commit
//! - `merge`: three-way merge of another branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
