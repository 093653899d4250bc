//! Plumbing commands (low-level object operations)
//!
//! ## Commands
//!
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Print an object's content, type or size
//! - `commit-tree`: Write a commit object for an existing tree

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
