//! wit: a minimal local version-control engine
//!
//! Snapshots a working directory into immutable commit images, tracks the
//! ancestry DAG between them, keeps a flat table of named references and
//! supports checkout and two-way merge between branches.
//!
//! Everything lives under a `.wit` directory at the repository root:
//!
//! ```text
//! .wit/
//!   images/            one directory per commit id (snapshot) + <id>.txt (metadata)
//!   staging_area/      files staged for the next commit
//!   references.txt     lines "name=commitId"
//!   activated.txt      the checked out branch name, empty when detached
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::repository::Repository;
pub use artifacts::core::error::WitError;
