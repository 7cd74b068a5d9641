//! wit command implementations
//!
//! Every command is an `async` method on [`Repository`](crate::areas::repository::Repository),
//! writing its report through the repository's writer.

pub mod porcelain;
