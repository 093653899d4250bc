//! Core repository components
//!
//! - `database`: Loose object storage for blobs, trees, and commits
//! - `repository`: Public read/write entry point over a database root

pub mod database;
pub mod repository;
