//! Merge support
//!
//! - `shared_base`: Shared base search between `head` and a branch tip, and
//!   the first-parent path from the tip back to that base

pub mod shared_base;
