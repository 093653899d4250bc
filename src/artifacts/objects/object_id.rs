//! Object identifier (SHA-1 fingerprint)
//!
//! Object IDs are 40-character lowercase hexadecimal strings rendering the
//! 20-byte SHA-1 digest of an object's header and canonical body.
//!
//! ## Storage
//!
//! Objects are stored in `<root>/<first-2-chars>/<remaining-38-chars>`.
//! Inside tree bodies the same identifier is written as 20 raw bytes.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, RAW_OBJECT_ID_LENGTH};
use crate::errors::{OdbError, OdbResult};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

/// Object identifier
///
/// A validated 40-character lowercase hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Fails with [`OdbError::InvalidObjectId`] unless `id` is exactly 40
    /// lowercase hex digits.
    pub fn try_parse(id: impl Into<String>) -> OdbResult<Self> {
        let id = id.into();
        if id.len() != OBJECT_ID_LENGTH {
            return Err(OdbError::InvalidObjectId(format!(
                "expected {OBJECT_ID_LENGTH} characters, got {}: {id:?}",
                id.len()
            )));
        }
        if !id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(OdbError::InvalidObjectId(format!(
                "not lowercase hex: {id:?}"
            )));
        }
        Ok(Self(id))
    }

    /// Build an object ID from the 20 raw digest bytes
    pub fn from_raw(raw: &[u8; RAW_OBJECT_ID_LENGTH]) -> Self {
        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        for byte in raw {
            hex40.push_str(&format!("{byte:02x}"));
        }
        Self(hex40)
    }

    /// Convert to the 20 raw bytes stored inside tree bodies
    pub fn to_raw(&self) -> [u8; RAW_OBJECT_ID_LENGTH] {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        let hex40 = self.0.as_bytes();

        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = (nibble(hex40[2 * i]) << 4) | nibble(hex40[2 * i + 1]);
        }

        raw
    }

    /// Write the object ID in binary format (20 bytes)
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_raw())
    }

    /// Read an object ID from binary format (20 bytes)
    ///
    /// Fails with [`OdbError::Format`] if fewer than 20 bytes remain.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> OdbResult<Self> {
        let mut raw = [0u8; RAW_OBJECT_ID_LENGTH];
        reader.read_exact(&mut raw).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => OdbError::format("truncated object id"),
            _ => OdbError::Io(e),
        })?;

        Ok(Self::from_raw(&raw))
    }

    /// Convert to file system path for object storage
    ///
    /// `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

// input is validated lowercase hex
fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        _ => c - b'a' + 10,
    }
}

impl FromStr for ObjectId {
    type Err = OdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
