//! Error taxonomy for object database operations
//!
//! Every fallible operation in the library returns [`OdbResult`]. Callers decide
//! how to present failures; the library never retries and never recovers partially.

use crate::artifacts::objects::object_id::ObjectId;

/// Errors raised while encoding, decoding, storing or loading objects.
#[derive(Debug, thiserror::Error)]
pub enum OdbError {
    /// No object file exists at the path derived from the fingerprint.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// Object header, tree entry or commit text is malformed.
    #[error("malformed object: {0}")]
    Format(String),

    /// The decompressed payload disagrees with the length declared in the header.
    #[error("size mismatch: header declares {declared} bytes but payload has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    /// The header names a type other than blob, tree or commit.
    #[error("unknown object type `{0}`")]
    UnknownType(String),

    /// The zlib transform rejected its input.
    #[error("compression error: {0}")]
    Compression(#[source] std::io::Error),

    /// A fingerprint that is not 40 lowercase hex characters.
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    /// An abbreviated fingerprint matches no stored object.
    #[error("object not found: no object id starts with `{0}`")]
    PrefixNotFound(String),

    /// An abbreviated fingerprint matches more than one stored object.
    #[error("ambiguous object id `{prefix}` matches {candidates:?}")]
    AmbiguousObjectId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OdbError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        OdbError::Format(reason.into())
    }
}

/// Result alias for object database operations.
pub type OdbResult<T> = Result<T, OdbError>;
