//! Commit object
//!
//! A commit is an ordered list of `key value` header records followed by a
//! blank line and the message. Keys repeat (one `parent` per parent) and
//! their order is part of the encoding.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! ## Folding
//!
//! A header line starting with a single space continues the previous value:
//! the space is dropped and the remainder is appended after a newline. Values
//! containing newlines are written back the same way, so any value survives a
//! write/read cycle unchanged.

use crate::artifacts::objects::author::Author;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{OdbError, OdbResult};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;
use std::str::FromStr;

/// One `key value` header record
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MetadataEntry {
    #[new(into)]
    pub key: String,
    #[new(into)]
    pub value: String,
}

/// Commit record: ordered metadata plus the message body
#[derive(Debug, Clone, PartialEq, Eq, Default, new)]
pub struct Commit {
    pub metadata: Vec<MetadataEntry>,
    /// Message body, trailing newline kept exactly as supplied
    #[new(into)]
    pub message: String,
}

impl Commit {
    /// Assemble a commit with the headers in the order git writes them
    pub fn build(
        tree: &ObjectId,
        parents: &[ObjectId],
        author: &Author,
        committer: &Author,
        message: impl Into<String>,
    ) -> Self {
        let mut metadata = vec![MetadataEntry::new("tree", tree.to_string())];
        metadata.extend(
            parents
                .iter()
                .map(|parent| MetadataEntry::new("parent", parent.to_string())),
        );
        metadata.push(MetadataEntry::new("author", author.to_string()));
        metadata.push(MetadataEntry::new("committer", committer.to_string()));

        Commit::new(metadata, message)
    }

    /// First value recorded under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).next()
    }

    /// Every value recorded under `key`, in order
    pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.metadata
            .iter()
            .filter(move |entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    pub fn tree(&self) -> OdbResult<ObjectId> {
        let tree = self
            .get("tree")
            .ok_or_else(|| OdbError::format("commit has no tree header"))?;
        ObjectId::try_parse(tree)
    }

    pub fn parents(&self) -> OdbResult<Vec<ObjectId>> {
        self.get_all("parent").map(ObjectId::try_parse).collect()
    }

    pub fn author(&self) -> OdbResult<Author> {
        self.signature("author")
    }

    pub fn committer(&self) -> OdbResult<Author> {
        self.signature("committer")
    }

    /// First line of the message, for one-line displays
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    fn signature(&self, key: &str) -> OdbResult<Author> {
        let value = self
            .get(key)
            .ok_or_else(|| OdbError::format(format!("commit has no {key} header")))?;
        Author::try_from(value)
    }
}

impl FromStr for Commit {
    type Err = OdbError;

    fn from_str(text: &str) -> OdbResult<Self> {
        let mut metadata: Vec<MetadataEntry> = Vec::new();
        let mut rest = text;

        loop {
            let (line, remainder) = rest.split_once('\n').ok_or_else(|| {
                OdbError::format("commit headers are not terminated by a blank line")
            })?;
            rest = remainder;

            if line.is_empty() {
                break;
            }

            if let Some(continuation) = line.strip_prefix(' ') {
                let entry = metadata.last_mut().ok_or_else(|| {
                    OdbError::format("continuation line before any commit header")
                })?;
                entry.value.push('\n');
                entry.value.push_str(continuation);
                continue;
            }

            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| OdbError::format(format!("malformed commit header {line:?}")))?;
            validate_key(key)?;
            metadata.push(MetadataEntry::new(key, value));
        }

        Ok(Commit::new(metadata, rest))
    }
}

fn validate_key(key: &str) -> OdbResult<()> {
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(OdbError::format(format!("invalid commit header key {key:?}")));
    }
    Ok(())
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.metadata {
            writeln!(f, "{} {}", entry.key, entry.value.replace('\n', "\n "))?;
        }
        writeln!(f)?;
        write!(f, "{}", self.message)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> OdbResult<Bytes> {
        for entry in &self.metadata {
            validate_key(&entry.key)?;
        }

        Ok(Bytes::from(self.to_string()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> OdbResult<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let content = String::from_utf8(content)
            .map_err(|_| OdbError::format("commit body is not valid UTF-8"))?;
        content.parse()
    }
}
