//! Loose object database compatible with git's on-disk format
//!
//! Blobs, trees and commits are encoded to git's canonical bytes, addressed
//! by the SHA-1 of `<type> <size>\0<body>`, and stored zlib-compressed under
//! a two-character fan-out directory. Objects written here are readable by
//! git and vice versa.
//!
//! - `areas`: the stateful object store and the repository handle over it
//! - `artifacts`: object model, codecs and the digest/compression adapters
//! - `commands`: plumbing commands behind the `odb` binary
//! - `errors`: the error taxonomy shared by all of the above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use artifacts::objects::blob::Blob;
pub use artifacts::objects::commit::{Commit, MetadataEntry};
pub use artifacts::objects::object::Object;
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::objects::object_type::ObjectType;
pub use artifacts::objects::tree::{Tree, TreeItem};
pub use errors::{OdbError, OdbResult};
