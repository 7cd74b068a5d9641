//! Core repository components
//!
//! This module contains the storage areas of a wit repository:
//!
//! - `database`: Object store holding commit metadata and full snapshots
//! - `index`: Staging area for the content of the next commit
//! - `refs`: Reference table (branches, `head`) and the activated branch
//! - `repository`: Repository discovery, session state and coordination
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
