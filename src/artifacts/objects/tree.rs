//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are written in canonical order: byte-wise by name, where a
//! directory name compares as if it ended with `/`. The in-memory entry list
//! keeps whatever order the caller supplied.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{OdbError, OdbResult};
use bytes::Bytes;
use derive_new::new;
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// Mode text of a subdirectory entry (no zero padding)
pub const DIRECTORY_MODE: &str = "40000";
/// Mode text of a regular, non-executable file
pub const REGULAR_MODE: &str = "100644";
/// Mode text of an executable file
pub const EXECUTABLE_MODE: &str = "100755";
/// Mode text of a symbolic link
pub const SYMLINK_MODE: &str = "120000";
/// Mode text of a submodule commit
pub const GITLINK_MODE: &str = "160000";

const VALID_MODES: [&str; 5] = [
    DIRECTORY_MODE,
    REGULAR_MODE,
    EXECUTABLE_MODE,
    SYMLINK_MODE,
    GITLINK_MODE,
];

/// One directory entry
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeItem {
    /// Octal mode as it appears in the encoding, e.g. `100644` or `40000`
    #[new(into)]
    pub mode: String,
    /// File name, no path separators
    #[new(into)]
    pub name: String,
    pub oid: ObjectId,
}

impl TreeItem {
    pub fn is_tree(&self) -> bool {
        self.mode == DIRECTORY_MODE
    }

    /// Type of the object this entry points at
    pub fn object_type(&self) -> ObjectType {
        if self.is_tree() {
            ObjectType::Tree
        } else {
            ObjectType::Blob
        }
    }

    // Directories sort as if their name had a trailing '/'
    fn sort_key(&self) -> Vec<u8> {
        let mut key = self.name.as_bytes().to_vec();
        if self.is_tree() {
            key.push(b'/');
        }
        key
    }

    fn validate(&self) -> OdbResult<()> {
        // zero-padded modes like "040000" are rejected by git fsck
        if !VALID_MODES.contains(&self.mode.as_str()) {
            return Err(OdbError::format(format!(
                "invalid mode {:?} for tree entry {:?}",
                self.mode, self.name
            )));
        }
        if matches!(self.name.as_str(), "" | "." | "..") || self.name.contains(['/', '\0']) {
            return Err(OdbError::format(format!(
                "invalid tree entry name {:?}",
                self.name
            )));
        }
        Ok(())
    }
}

/// Directory listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeItem>,
}

impl Tree {
    pub fn new(entries: Vec<TreeItem>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeItem] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeItem> {
        self.entries
    }

    pub fn get(&self, name: &str) -> Option<&TreeItem> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries in the order they are written to disk
    pub fn sorted_entries(&self) -> Vec<&TreeItem> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by_cached_key(|entry| entry.sort_key());
        entries
    }
}

impl Packable for Tree {
    fn serialize(&self) -> OdbResult<Bytes> {
        let mut content_bytes = Vec::new();
        let mut names = HashSet::new();

        for entry in self.sorted_entries() {
            entry.validate()?;
            if !names.insert(entry.name.as_str()) {
                return Err(OdbError::format(format!(
                    "duplicate tree entry {:?}",
                    entry.name
                )));
            }

            write!(content_bytes, "{} {}", entry.mode, entry.name)?;
            content_bytes.push(0);
            entry.oid.write_h40_to(&mut content_bytes)?;
        }

        Ok(Bytes::from(content_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> OdbResult<Self> {
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(OdbError::format("truncated tree entry: unexpected EOF in mode"));
            }
            if mode_bytes.is_empty() || !mode_bytes.iter().all(|b| matches!(b, b'0'..=b'7')) {
                return Err(OdbError::format(format!(
                    "invalid tree entry mode {:?}",
                    String::from_utf8_lossy(&mode_bytes)
                )));
            }
            let mode = String::from_utf8_lossy(&mode_bytes).into_owned();

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(OdbError::format("truncated tree entry: unexpected EOF in name"));
            }
            let name = String::from_utf8(name_bytes.clone())
                .map_err(|_| OdbError::format("tree entry name is not valid UTF-8"))?;

            let oid = ObjectId::read_h40_from(&mut reader)?;

            entries.push(TreeItem { mode, name, oid });
        }

        Ok(Tree { entries })
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self
            .entries
            .iter()
            .map(|entry| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode,
                    entry.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>();

        write!(f, "{}", lines.join("\n"))
    }
}
