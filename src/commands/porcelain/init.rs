use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create the objects directory (and its parents) and open a repository on it.
    pub fn init(objects_path: &Path, writer: &mut dyn Write) -> anyhow::Result<Self> {
        fs::create_dir_all(objects_path).with_context(|| {
            format!(
                "Failed to create objects directory {}",
                objects_path.display()
            )
        })?;

        let objects_path = objects_path.canonicalize()?;
        writeln!(
            writer,
            "Initialized empty object database in {}",
            objects_path.display()
        )?;

        Ok(Repository::new(objects_path))
    }
}
