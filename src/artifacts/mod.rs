//! Object data structures and codecs
//!
//! - `core`: Digest and compression adapters
//! - `objects`: Object types (blob, tree, commit) and their encodings

pub mod core;
pub mod objects;
