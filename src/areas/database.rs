use crate::artifacts::core::{compression, digest};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{OdbError, OdbResult};
use bytes::Bytes;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Loose object storage rooted at an objects directory
///
/// Each object lives in `<root>/<oid[0..2]>/<oid[2..40]>` as the zlib
/// compression of `<type> <size>\0<body>`.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Decompressed `<type> <size>\0<body>` bytes of a stored object
    pub fn load(&self, object_id: &ObjectId) -> OdbResult<Bytes> {
        let object_path = self.object_path(object_id);

        let object_content = std::fs::read(&object_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => OdbError::ObjectNotFound(object_id.clone()),
            _ => OdbError::Io(e),
        })?;

        let decompressed = compression::decompress(&object_content)?;
        trace!(
            oid = %object_id,
            compressed = object_content.len(),
            decompressed = decompressed.len(),
            "loaded object file"
        );

        Ok(decompressed)
    }

    /// Read and decode an object
    pub fn parse_object(&self, object_id: &ObjectId) -> OdbResult<Object> {
        let (object_type, body) = self.parse_object_as_bytes(object_id)?;
        debug!(oid = %object_id, %object_type, size = body.len(), "read object");

        Object::decode(object_type, &body)
    }

    /// Type and declared size of a stored object
    pub fn read_header(&self, object_id: &ObjectId) -> OdbResult<(ObjectType, usize)> {
        let (object_type, body) = self.parse_object_as_bytes(object_id)?;
        Ok((object_type, body.len()))
    }

    fn parse_object_as_bytes(&self, object_id: &ObjectId) -> OdbResult<(ObjectType, Bytes)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content.as_ref());

        let (object_type, declared) = ObjectType::parse_header(&mut object_reader)?;
        let body_start = object_reader.position() as usize;

        let actual = object_content.len() - body_start;
        if actual != declared {
            return Err(OdbError::SizeMismatch { declared, actual });
        }

        Ok((object_type, object_content.slice(body_start..)))
    }

    /// Encode, hash and store an object, returning its id
    ///
    /// Storing an object that already exists leaves the file untouched.
    pub fn store(&self, object: &Object) -> OdbResult<ObjectId> {
        let object_content = object.serialize_with_header()?;
        let object_id = digest::object_id(&object_content);
        let object_path = self.object_path(&object_id);

        // write the object to disk unless it already exists
        if object_path.is_file() {
            debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, &object_content)?;
        debug!(
            oid = %object_id,
            object_type = %object.object_type(),
            size = object_content.len(),
            "wrote object"
        );

        Ok(object_id)
    }

    /// Compress into a temp file beside the target, then rename it into place
    ///
    /// On failure the temp file is dropped and any directories created for
    /// it are removed again, so the store is left as it was before the call.
    fn write_object(&self, object_path: &Path, object_content: &[u8]) -> OdbResult<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            OdbError::Io(std::io::Error::other(format!(
                "invalid object path {}",
                object_path.display()
            )))
        })?;

        let object_content = compression::compress(object_content)?;

        // deepest first, so they can be removed in order
        let created_dirs = object_dir
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .map(Path::to_path_buf)
            .collect::<Vec<_>>();

        let result = std::fs::create_dir_all(object_dir)
            .map_err(OdbError::from)
            .and_then(|_| Self::persist_object(object_dir, object_path, &object_content));

        if result.is_err() {
            for dir in &created_dirs {
                // remove_dir only succeeds on empty directories
                if let Err(e) = std::fs::remove_dir(dir) {
                    trace!(path = %dir.display(), error = %e, "kept directory after failed write");
                    break;
                }
            }
        }

        result
    }

    fn persist_object(
        object_dir: &Path,
        object_path: &Path,
        object_content: &[u8],
    ) -> OdbResult<()> {
        let mut temp_file = tempfile::Builder::new()
            .prefix("tmp_obj_")
            .tempfile_in(object_dir)?;
        temp_file.write_all(object_content)?;
        temp_file.as_file().sync_all()?;

        match temp_file.persist_noclobber(object_path) {
            Ok(_) => Ok(()),
            // a concurrent writer stored the same content first
            Err(e)
                if e.error.kind() == std::io::ErrorKind::AlreadyExists && object_path.is_file() =>
            {
                trace!(path = %object_path.display(), "lost race to identical object");
                Ok(())
            }
            Err(e) => Err(OdbError::Io(e.error)),
        }
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated OIDs to their full form. Returns every
    /// match; more than one means the prefix is ambiguous.
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For prefixes of 0-1 characters, must search all directories (slower)
    pub fn find_objects_by_prefix(&self, prefix: &str) -> OdbResult<Vec<ObjectId>> {
        let mut matches = Vec::new();

        if prefix.len() > OBJECT_ID_LENGTH
            || !prefix.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(OdbError::InvalidObjectId(prefix.to_string()));
        }

        let dirs = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255u8).map(|i| format!("{i:02x}")).collect()
        };

        for dir_name in dirs {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let file_name = entry.file_name();
                let full_oid = format!("{}{}", dir_name, file_name.to_string_lossy());

                // skips temp files and anything else that is not an object
                if full_oid.starts_with(prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}
