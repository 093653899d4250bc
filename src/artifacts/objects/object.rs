use crate::artifacts::core::digest;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::OdbResult;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::BufRead;

/// Encode into the canonical body (no `<type> <size>\0` header)
pub trait Packable {
    fn serialize(&self) -> OdbResult<Bytes>;
}

/// Decode from a canonical body (header already consumed)
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> OdbResult<Self>
    where
        Self: Sized;
}

/// Any object the database can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Blob(_) => ObjectType::Blob,
            Object::Tree(_) => ObjectType::Tree,
            Object::Commit(_) => ObjectType::Commit,
        }
    }

    /// Canonical body bytes
    pub fn encode(&self) -> OdbResult<Bytes> {
        match self {
            Object::Blob(blob) => blob.serialize(),
            Object::Tree(tree) => tree.serialize(),
            Object::Commit(commit) => commit.serialize(),
        }
    }

    /// Rebuild an object of `object_type` from its canonical body
    pub fn decode(object_type: ObjectType, body: &[u8]) -> OdbResult<Self> {
        match object_type {
            ObjectType::Blob => Ok(Object::Blob(Blob::deserialize(body)?)),
            ObjectType::Tree => Ok(Object::Tree(Tree::deserialize(body)?)),
            ObjectType::Commit => Ok(Object::Commit(Commit::deserialize(body)?)),
        }
    }

    /// Header plus body, the exact bytes that are hashed and compressed
    pub fn serialize_with_header(&self) -> OdbResult<Bytes> {
        let body = self.encode()?;
        let header = self.object_type().header(body.len());

        let mut object_bytes = BytesMut::with_capacity(header.len() + body.len());
        object_bytes.put_slice(header.as_bytes());
        object_bytes.put_slice(&body);

        Ok(object_bytes.freeze())
    }

    pub fn object_id(&self) -> OdbResult<ObjectId> {
        Ok(digest::object_id(&self.serialize_with_header()?))
    }
}

impl From<Blob> for Object {
    fn from(blob: Blob) -> Self {
        Object::Blob(blob)
    }
}

impl From<Tree> for Object {
    fn from(tree: Tree) -> Self {
        Object::Tree(tree)
    }
}

impl From<Commit> for Object {
    fn from(commit: Commit) -> Self {
        Object::Commit(commit)
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Blob(blob) => write!(f, "{blob}"),
            Object::Tree(tree) => write!(f, "{tree}"),
            Object::Commit(commit) => write!(f, "{commit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::MetadataEntry;
    use crate::artifacts::objects::tree::TreeItem;
    use crate::errors::OdbError;
    use rstest::rstest;

    fn oid(hex: &str) -> ObjectId {
        ObjectId::try_parse(hex).unwrap()
    }

    #[test]
    fn blob_body_is_the_content() {
        let object = Object::Blob(Blob::new("Hello, world\n"));
        assert_eq!(object.encode().unwrap(), Bytes::from("Hello, world\n"));
        assert_eq!(
            object.serialize_with_header().unwrap(),
            Bytes::from("blob 13\0Hello, world\n")
        );
    }

    #[rstest]
    #[case::blob(
        Object::Blob(Blob::new("Hello, world\n")),
        "a5c19667710254f835085b99726e523457150e03"
    )]
    #[case::empty_blob(Object::Blob(Blob::new("")), "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391")]
    #[case::empty_tree(Object::Tree(Tree::default()), "4b825dc642cb6eb9a060e54bf8d69288fbee4904")]
    #[case::tree(
        Object::Tree(Tree::new(vec![
            TreeItem::new("100644", "my-file", oid("a5c19667710254f835085b99726e523457150e03")),
            TreeItem::new("40000", "nested", oid("75b335a08dfaa6fe96127d63e514a1ea488ec5be")),
        ])),
        "c1be61088247955e5bda5984cbc675b7bd2751db"
    )]
    #[case::commit(
        Object::Commit(Commit::new(
            vec![
                MetadataEntry::new("tree", "c1be61088247955e5bda5984cbc675b7bd2751db"),
                MetadataEntry::new("parent", "c8ac29c05793b566593c308bee71c2428f505f7c"),
                MetadataEntry::new("author", "Chris Eidhof <chris@eidhof.nl> 1684850271 +0200"),
                MetadataEntry::new("committer", "Chris Eidhof <chris@eidhof.nl> 1684850271 +0200"),
            ],
            "Second commit\n",
        )),
        "bdf09c59915a4eaa51fe72639a875aeeb0994427"
    )]
    fn object_ids_match_git(#[case] object: Object, #[case] expected: &str) {
        assert_eq!(object.object_id().unwrap().to_string(), expected);
    }

    #[rstest]
    #[case(Object::Blob(Blob::new(vec![0u8, 159, 146, 150, 255])))]
    #[case(Object::Tree(Tree::new(vec![
        TreeItem::new("100755", "run.sh", oid("fe1827d8d0aebb7e7f4f4705492587bc3b0123b7")),
    ])))]
    #[case(Object::Commit(Commit::new(vec![MetadataEntry::new("tree", "x\ny")], "msg\n")))]
    fn decode_inverts_encode(#[case] object: Object) {
        let body = object.encode().unwrap();
        pretty_assertions::assert_eq!(Object::decode(object.object_type(), &body).unwrap(), object);
    }

    #[test]
    fn commit_bodies_must_be_utf8() {
        let body = b"tree \xff\n\nmsg";
        assert!(matches!(
            Object::decode(ObjectType::Commit, body),
            Err(OdbError::Format(_))
        ));
    }
}
