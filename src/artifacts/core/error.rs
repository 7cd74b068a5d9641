//! Typed failures reported by repository operations
//!
//! Internal plumbing uses `anyhow` for I/O context; the failure kinds a caller
//! may want to react to are raised as [`WitError`] inside the `anyhow::Error`
//! and can be recovered with `downcast_ref::<WitError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WitError {
    /// no `.wit` directory in the start path or any of its ancestors
    #[error("can't find .wit folder in {} or any parent directory", start.display())]
    RepositoryNotFound { start: PathBuf },

    /// checkout to a commit or merge attempted with pending changes
    #[error(
        "There are files to commit or files that are not staged for commit, run wit status for details \
        (to be committed: [{}], not staged: [{}])",
        to_commit.join(", "),
        not_staged.join(", ")
    )]
    DirtyStagingState {
        to_commit: Vec<String>,
        not_staged: Vec<String>,
    },

    /// merge would replace working files the staging area does not know about
    #[error(
        "untracked working files would be overwritten by merge: [{}]; add or move them first",
        .0.join(", ")
    )]
    UntrackedFilesInTheWay(Vec<String>),

    /// neither a reference name nor the id of a stored commit
    #[error("unknown reference or commit id: {0}")]
    UnknownReference(String),

    #[error("commit id prefix {prefix} is ambiguous: {}", candidates.join(", "))]
    AmbiguousCommitId {
        prefix: String,
        candidates: Vec<String>,
    },

    /// operation needs a `head` but nothing has been committed yet
    #[error("no commits yet")]
    NoCommitsYet,

    #[error("a branch named '{0}' already exists")]
    BranchAlreadyExists(String),

    #[error("'{0}' is not a valid branch name")]
    InvalidBranchName(String),

    #[error("'{0}' is a reserved reference name")]
    ReservedReferenceName(String),

    /// the reference table failed its integrity check on load
    #[error("malformed references table at line {line}: {content:?}")]
    MalformedReferences { line: usize, content: String },

    #[error("malformed metadata for commit {id}: {reason}")]
    MalformedCommitMetadata { id: String, reason: String },

    #[error("no shared base between {head} and {branch}")]
    NoSharedBase { head: String, branch: String },
}

impl WitError {
    /// Extract the typed failure from an `anyhow` chain, if there is one
    pub fn from_anyhow(error: &anyhow::Error) -> Option<&WitError> {
        error.chain().find_map(|cause| cause.downcast_ref::<WitError>())
    }
}
