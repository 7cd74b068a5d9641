//! Commit objects
//!
//! - `commit_id`: Opaque 40 character commit identifiers and their generators
//! - `commit`: Commit metadata (parents, date, message) and its text format

pub mod commit;
pub mod commit_id;

/// Length of a commit id
pub const COMMIT_ID_LENGTH: usize = 40;
/// Shortest prefix accepted when resolving an abbreviated commit id
pub const MIN_COMMIT_ID_PREFIX_LENGTH: usize = 4;
