//! Object types and codecs
//!
//! All content is stored as objects identified by SHA-1 hashes. Three kinds
//! are supported:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Ordered metadata headers plus a message
//!
//! Every kind encodes to a canonical body; the stored form is
//! `<type> <size>\0<body>`.

pub mod author;
pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
