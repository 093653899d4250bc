use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Hash a file as a blob and print its id, storing it when `write` is set.
    pub fn hash_file(
        &self,
        file: &Path,
        write: bool,
        writer: &mut dyn Write,
    ) -> anyhow::Result<ObjectId> {
        let content = std::fs::read(file)
            .with_context(|| format!("Unable to read file {}", file.display()))?;
        let object = Object::Blob(Blob::new(content));

        let object_id = if write {
            self.write_object(&object)
                .with_context(|| format!("Unable to store {}", file.display()))?
        } else {
            self.hash_object(&object)?
        };

        writeln!(writer, "{object_id}")?;

        Ok(object_id)
    }
}
