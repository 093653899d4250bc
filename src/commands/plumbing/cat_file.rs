use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// Content, pretty-printed by type
    Pretty,
    /// Object type name
    Type,
    /// Body size in bytes
    Size,
}

impl Repository {
    pub fn cat_file(
        &self,
        revision: &str,
        mode: CatFileMode,
        writer: &mut dyn Write,
    ) -> anyhow::Result<ObjectId> {
        let object_id = self.resolve(revision)?;

        match mode {
            CatFileMode::Pretty => match self.database().parse_object(&object_id)? {
                // blob bytes go out untouched, they need not be UTF-8
                Object::Blob(blob) => writer.write_all(blob.content())?,
                Object::Tree(tree) if tree.entries().is_empty() => {}
                Object::Tree(tree) => writeln!(writer, "{tree}")?,
                Object::Commit(commit) => write!(writer, "{commit}")?,
            },
            CatFileMode::Type => {
                let (object_type, _) = self.read_header(&object_id)?;
                writeln!(writer, "{object_type}")?;
            }
            CatFileMode::Size => {
                let (_, size) = self.read_header(&object_id)?;
                writeln!(writer, "{size}")?;
            }
        }

        Ok(object_id)
    }
}
