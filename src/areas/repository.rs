use crate::areas::database::Database;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{OdbError, OdbResult};
use std::path::Path;

/// Shortest abbreviated object id accepted by [`Repository::resolve`]
pub const MIN_ABBREV_LENGTH: usize = 4;

/// Handle on an object store rooted at a filesystem path
///
/// Holds no state beyond the root; every read builds a fresh [`Object`] and
/// every write consumes one.
#[derive(Debug)]
pub struct Repository {
    path: Box<Path>,
    database: Database,
}

impl Repository {
    /// `path` is the objects directory itself, e.g. `.git/objects`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf().into_boxed_path();
        let database = Database::new(path.clone());

        Repository { path, database }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Read the object stored under a full 40-character fingerprint
    pub fn read_object(&self, object_id: &str) -> OdbResult<Object> {
        let object_id = ObjectId::try_parse(object_id)?;
        self.database.parse_object(&object_id)
    }

    /// Store an object and return its fingerprint
    pub fn write_object(&self, object: &Object) -> OdbResult<ObjectId> {
        self.database.store(object)
    }

    /// Fingerprint an object without storing it
    pub fn hash_object(&self, object: &Object) -> OdbResult<ObjectId> {
        object.object_id()
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.database.exists(object_id)
    }

    pub fn read_header(&self, object_id: &ObjectId) -> OdbResult<(ObjectType, usize)> {
        self.database.read_header(object_id)
    }

    /// Expand a full or abbreviated fingerprint to the stored object's id
    pub fn resolve(&self, revision: &str) -> OdbResult<ObjectId> {
        if revision.len() < MIN_ABBREV_LENGTH {
            return Err(OdbError::InvalidObjectId(format!(
                "{revision:?} is shorter than {MIN_ABBREV_LENGTH} characters"
            )));
        }

        let mut candidates = self.database.find_objects_by_prefix(revision)?;
        match candidates.len() {
            0 if revision.len() == OBJECT_ID_LENGTH => {
                Err(OdbError::ObjectNotFound(ObjectId::try_parse(revision)?))
            }
            0 => Err(OdbError::PrefixNotFound(revision.to_string())),
            1 => Ok(candidates.remove(0)),
            _ => Err(OdbError::AmbiguousObjectId {
                prefix: revision.to_string(),
                candidates,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::commit::{Commit, MetadataEntry};
    use crate::artifacts::objects::tree::{Tree, TreeItem};
    use assert_fs::TempDir;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dir() -> TempDir {
        TempDir::new().unwrap()
    }

    fn oid(hex: &str) -> ObjectId {
        ObjectId::try_parse(hex).unwrap()
    }

    fn second_commit(author: &str) -> Object {
        Object::Commit(Commit::new(
            vec![
                MetadataEntry::new("tree", "c1be61088247955e5bda5984cbc675b7bd2751db"),
                MetadataEntry::new("parent", "c8ac29c05793b566593c308bee71c2428f505f7c"),
                MetadataEntry::new("author", author),
                MetadataEntry::new(
                    "committer",
                    "Chris Eidhof <chris@eidhof.nl> 1684850271 +0200",
                ),
            ],
            "Second commit\n",
        ))
    }

    #[rstest]
    fn writes_and_reads_blob(dir: TempDir) {
        let repo = Repository::new(dir.path());
        let blob = Object::Blob(Blob::new("Sample blob content\n"));

        let hash = repo.write_object(&blob).unwrap();
        assert_eq!(hash.to_string(), "fe1827d8d0aebb7e7f4f4705492587bc3b0123b7");
        pretty_assertions::assert_eq!(repo.read_object(hash.as_ref()).unwrap(), blob);
    }

    #[rstest]
    fn writes_and_reads_tree(dir: TempDir) {
        let repo = Repository::new(dir.path());
        let tree = Object::Tree(Tree::new(vec![
            TreeItem::new("100644", "my-file", oid("a5c19667710254f835085b99726e523457150e03")),
            TreeItem::new("40000", "nested", oid("75b335a08dfaa6fe96127d63e514a1ea488ec5be")),
        ]));

        let hash = repo.write_object(&tree).unwrap();
        assert_eq!(hash.to_string(), "c1be61088247955e5bda5984cbc675b7bd2751db");
        pretty_assertions::assert_eq!(repo.read_object(hash.as_ref()).unwrap(), tree);
    }

    #[rstest]
    fn folded_author_changes_the_fingerprint(dir: TempDir) {
        let repo = Repository::new(dir.path());
        let plain = second_commit("Chris Eidhof <chris@eidhof.nl> 1684850271 +0200");
        let folded = second_commit("Chris\nEidhof <chris@eidhof.nl> 1684850271 +0200");

        let plain_hash = repo.write_object(&plain).unwrap();
        let folded_hash = repo.write_object(&folded).unwrap();

        assert_eq!(plain_hash.to_string(), "bdf09c59915a4eaa51fe72639a875aeeb0994427");
        assert_eq!(folded_hash.to_string(), "633db0bc7a53edbd823da59479069750440d2975");
        pretty_assertions::assert_eq!(repo.read_object(folded_hash.as_ref()).unwrap(), folded);
    }

    #[rstest]
    fn hash_object_does_not_write(dir: TempDir) {
        let repo = Repository::new(dir.path());
        let blob = Object::Blob(Blob::new("Hello, world\n"));

        let hash = repo.hash_object(&blob).unwrap();
        assert!(!repo.contains(&hash));
        assert_eq!(repo.write_object(&blob).unwrap(), hash);
        assert!(repo.contains(&hash));
    }

    #[rstest]
    fn unknown_object_is_not_found(dir: TempDir) {
        let repo = Repository::new(dir.path());
        assert!(matches!(
            repo.read_object(&"0".repeat(40)),
            Err(OdbError::ObjectNotFound(_))
        ));
    }

    #[rstest]
    fn malformed_fingerprint_is_rejected(dir: TempDir) {
        let repo = Repository::new(dir.path());
        assert!(matches!(
            repo.read_object("a5c1"),
            Err(OdbError::InvalidObjectId(_))
        ));
    }

    #[rstest]
    fn resolves_abbreviated_ids(dir: TempDir) {
        let repo = Repository::new(dir.path());
        let hash = repo
            .write_object(&Object::Blob(Blob::new("Hello, world\n")))
            .unwrap();

        assert_eq!(repo.resolve("a5c1966").unwrap(), hash);
        assert_eq!(repo.resolve(hash.as_ref()).unwrap(), hash);
        assert!(matches!(
            repo.resolve("a5c"),
            Err(OdbError::InvalidObjectId(_))
        ));
    }

    #[rstest]
    fn unmatched_prefix_reports_what_was_asked(dir: TempDir) {
        let repo = Repository::new(dir.path());

        let err = repo.resolve("beef").unwrap_err();
        assert!(matches!(&err, OdbError::PrefixNotFound(prefix) if prefix == "beef"));
        assert_eq!(
            err.to_string(),
            "object not found: no object id starts with `beef`"
        );

        assert!(matches!(
            repo.resolve(&"0".repeat(40)),
            Err(OdbError::ObjectNotFound(_))
        ));
    }

    #[rstest]
    fn ambiguous_prefix_lists_candidates(dir: TempDir) {
        let repo = Repository::new(dir.path());
        let fan_out = dir.path().join("ab");
        std::fs::create_dir_all(&fan_out).unwrap();
        std::fs::write(fan_out.join(format!("cd{}", "0".repeat(36))), b"").unwrap();
        std::fs::write(fan_out.join(format!("cd{}", "1".repeat(36))), b"").unwrap();

        match repo.resolve("abcd") {
            Err(OdbError::AmbiguousObjectId { candidates, .. }) => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    fn arb_object() -> impl Strategy<Value = Object> {
        let blob = prop::collection::vec(any::<u8>(), 0..256)
            .prop_map(|content| Object::Blob(Blob::new(content)));
        let tree = prop::collection::btree_map(
            "[a-zA-Z0-9_-][a-zA-Z0-9._-]{0,11}",
            (prop::bool::ANY, prop::array::uniform20(any::<u8>())),
            0..6,
        )
        .prop_map(|entries| {
            let items = entries
                .into_iter()
                .map(|(name, (is_dir, raw))| {
                    let mode = if is_dir { "40000" } else { "100644" };
                    TreeItem::new(mode, name, ObjectId::from_raw(&raw))
                })
                .collect::<Vec<_>>();
            let sorted = Tree::new(items);
            Object::Tree(Tree::new(
                sorted.sorted_entries().into_iter().cloned().collect(),
            ))
        });
        let commit = (
            prop::collection::vec(("[a-z]{1,9}", "[ -~\n]{0,30}"), 0..5),
            "[ -~\n]{0,60}",
        )
            .prop_map(|(metadata, message)| {
                Object::Commit(Commit::new(
                    metadata
                        .into_iter()
                        .map(|(key, value)| MetadataEntry::new(key, value))
                        .collect(),
                    message,
                ))
            });

        prop_oneof![blob, tree, commit]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn read_inverts_write(object in arb_object()) {
            let dir = TempDir::new().unwrap();
            let repo = Repository::new(dir.path());

            let hash = repo.write_object(&object).unwrap();
            prop_assert_eq!(repo.read_object(hash.as_ref()).unwrap(), object.clone());
            prop_assert_eq!(repo.write_object(&object).unwrap(), hash);
        }
    }
}
