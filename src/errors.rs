//! Repository errors
//!
//! Every failure a user can trigger has a variant here whose `Display` text is the
//! message printed by the CLI. Errors travel through the crate wrapped in
//! `anyhow::Error`; the binary downcasts to [`RepositoryError`] to decide whether a
//! failure is a user error (print and exit normally) or store corruption (fatal).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// `init` was run inside an existing repository.
    AlreadyInitialized,
    /// Any command other than `init` was run outside a repository.
    NotInitialized,
    /// The path given to `add` is not in the working tree.
    FileNotFound(String),
    /// The path given to `rm` is neither staged nor tracked.
    NothingToRemove(String),
    /// `commit` was given an empty message.
    EmptyMessage,
    /// `commit` was run with a clean stage.
    NothingToCommit,
    /// No stored commit matches the id (or prefix).
    NoSuchCommit(String),
    /// More than one stored commit matches the prefix.
    AmbiguousCommitId(String),
    /// The requested file is not part of the commit.
    FileNotInCommit(String),
    /// `checkout` was given an unknown branch.
    NoSuchBranch(String),
    /// `checkout` was given the current branch.
    AlreadyOnBranch(String),
    /// `branch` was given an existing name.
    BranchAlreadyExists(String),
    /// `rm-branch` or `merge` was given an unknown branch.
    BranchNotFound(String),
    /// `rm-branch` was given the current branch.
    CannotRemoveCurrentBranch(String),
    /// The branch name is not a valid ref name.
    InvalidBranchName(String),
    /// A command was given the wrong number or shape of operands.
    IncorrectOperands,
    /// `merge` was run with a dirty stage.
    UncommittedChanges,
    /// `merge` was given the current branch.
    CannotMergeSelf,
    /// An untracked file would be overwritten or deleted.
    UntrackedFileWouldBeOverwritten(String),
    /// An object reachable from the refs is missing from the store.
    ObjectNotFound(String),
    /// The persisted repository state cannot be decoded.
    CorruptState(String),
}

impl RepositoryError {
    /// Whether the error was caused by user input rather than a broken repository.
    ///
    /// User errors leave the repository untouched and the process exits normally.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            RepositoryError::ObjectNotFound(_) | RepositoryError::CorruptState(_)
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::AlreadyInitialized => write!(
                f,
                "A version-control system already exists in the current directory."
            ),
            RepositoryError::NotInitialized => {
                write!(f, "Not in an initialized version-control directory.")
            }
            RepositoryError::FileNotFound(_) => write!(f, "File does not exist."),
            RepositoryError::NothingToRemove(_) => write!(f, "No reason to remove the file."),
            RepositoryError::EmptyMessage => write!(f, "Please enter a commit message."),
            RepositoryError::NothingToCommit => write!(f, "No changes added to the commit."),
            RepositoryError::NoSuchCommit(_) => write!(f, "No commit with that id exists."),
            RepositoryError::AmbiguousCommitId(prefix) => {
                write!(f, "Commit id {prefix} is ambiguous.")
            }
            RepositoryError::FileNotInCommit(_) => write!(f, "File does not exist in that commit."),
            RepositoryError::NoSuchBranch(_) => write!(f, "No such branch exists."),
            RepositoryError::AlreadyOnBranch(_) => {
                write!(f, "No need to checkout the current branch.")
            }
            RepositoryError::BranchAlreadyExists(_) => {
                write!(f, "A branch with that name already exists.")
            }
            RepositoryError::BranchNotFound(_) => {
                write!(f, "A branch with that name does not exist.")
            }
            RepositoryError::CannotRemoveCurrentBranch(_) => {
                write!(f, "Cannot remove the current branch.")
            }
            RepositoryError::InvalidBranchName(name) => write!(f, "Invalid branch name: {name}"),
            RepositoryError::IncorrectOperands => write!(f, "Incorrect operands."),
            RepositoryError::UncommittedChanges => write!(f, "You have uncommitted changes."),
            RepositoryError::CannotMergeSelf => write!(f, "Cannot merge a branch with itself."),
            RepositoryError::UntrackedFileWouldBeOverwritten(_) => write!(
                f,
                "There is an untracked file in the way; delete it, or add and commit it first."
            ),
            RepositoryError::ObjectNotFound(oid) => {
                write!(f, "Object {oid} is missing from the object store")
            }
            RepositoryError::CorruptState(reason) => {
                write!(f, "Repository state is corrupt: {reason}")
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
