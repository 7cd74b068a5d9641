//! wit data structures and algorithms
//!
//! - `branch`: Branch name validation
//! - `core`: Shared error and configuration types
//! - `graph`: Commit ancestry graph derived from the object store
//! - `merge`: Shared base search and staging promotion
//! - `objects`: Commit ids and commit metadata
//! - `status`: Staging area status report

pub mod branch;
pub mod core;
pub mod graph;
pub mod merge;
pub mod objects;
pub mod status;
