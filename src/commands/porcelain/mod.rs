//! Porcelain commands (user-facing wit operations)
//!
//! ## Commands
//!
//! - `init`: Create the `.wit` layout
//! - `add`: Copy files into the staging area
//! - `commit`: Snapshot the staging area and advance references
//! - `status`: Report pending, unstaged and untracked files
//! - `checkout`: Switch branches or move to a raw commit
//! - `branch`: Create a branch at `head`
//! - `merge`: Promote a branch's changes and record a two-parent commit
//! - `graph`: Print the commit DAG as Graphviz DOT text

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod graph;
pub mod init;
pub mod merge;
pub mod status;
