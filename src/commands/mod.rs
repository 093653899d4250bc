//! Command implementations behind the `odb` binary
//!
//! - `plumbing`: Low-level commands for direct object manipulation (hash-object, cat-file, commit-tree)
//! - `porcelain`: User-facing setup commands (init)

pub mod plumbing;
pub mod porcelain;
