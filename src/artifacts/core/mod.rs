//! Adapters over the external primitives the object database consumes
//!
//! - `digest`: SHA-1 fingerprints rendered as [`ObjectId`](crate::artifacts::objects::object_id::ObjectId)
//! - `compression`: zlib deflate/inflate of stored object files

pub mod compression;
pub mod digest;
