//! Core utilities and shared types
//!
//! - `error`: The typed failure kinds every public operation can report
//! - `config`: Environment driven settings (commit date override)

pub mod config;
pub mod error;
