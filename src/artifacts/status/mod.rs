//! Working tree status inspection
//!
//! Compares the staging area against stored history and against the working
//! tree.
//!
//! ## Components
//!
//! - `file_change`: Categories a path can be reported under
//! - `status_info`: Status aggregation and display

pub mod file_change;
pub mod status_info;
