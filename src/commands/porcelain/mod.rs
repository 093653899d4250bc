//! Porcelain commands (user-facing operations)
//!
//! - `init`: Create an empty object database

pub mod init;
