use crate::areas::repository::Repository;
use crate::artifacts::objects::author::Author;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Write a commit of `tree` with the given parents, authored from the environment.
    pub fn commit_tree(
        &self,
        tree: &str,
        parents: &[String],
        message: &str,
        writer: &mut dyn Write,
    ) -> anyhow::Result<ObjectId> {
        let tree_id = self.resolve(tree)?;
        if !matches!(self.database().parse_object(&tree_id)?, Object::Tree(_)) {
            anyhow::bail!("{tree_id} is not a tree object");
        }

        let parents = parents
            .iter()
            .map(|parent| {
                let parent_id = self.resolve(parent)?;
                match self.database().parse_object(&parent_id)? {
                    Object::Commit(_) => Ok(parent_id),
                    _ => anyhow::bail!("{parent_id} is not a commit object"),
                }
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let author = Author::load_from_env().context("Unable to load commit author")?;
        let mut message = message.to_string();
        if !message.ends_with('\n') {
            message.push('\n');
        }

        let commit = Commit::build(&tree_id, &parents, &author, &author, message);
        let commit_id = self.write_object(&Object::Commit(commit))?;

        writeln!(writer, "{commit_id}")?;

        Ok(commit_id)
    }
}
