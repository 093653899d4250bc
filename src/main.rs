use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use odb::Repository;
use odb::commands::plumbing::cat_file::CatFileMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "odb",
    version = "0.1.0",
    about = "A git-compatible loose object database",
    long_about = "Reads and writes blobs, trees and commits in git's loose object format. \
    Objects written by odb are readable by git and vice versa.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "GIT_OBJECT_DIRECTORY",
        help = "The objects directory (defaults to .git/objects)"
    )]
    objects_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize an empty object database",
        long_about = "This command creates .git/objects in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type or size of an object",
        group(ArgGroup::new("mode").required(true).args(["pretty", "show_type", "size"]))
    )]
    CatFile {
        #[arg(short, help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Show the object type")]
        show_type: bool,
        #[arg(short, help = "Show the object size")]
        size: bool,
        #[arg(index = 1, help = "Full or abbreviated object id")]
        object: String,
    },
    #[command(
        name = "commit-tree",
        about = "Create a commit object for a tree",
        long_about = "This command writes a commit of the given tree. Author and committer \
        are read from GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL and GIT_AUTHOR_DATE."
    )]
    CommitTree {
        #[arg(index = 1)]
        tree: String,
        #[arg(short, help = "Parent commit id, may be repeated")]
        parent: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
}

fn objects_dir(configured: Option<PathBuf>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?.join(".git").join("objects")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Init { path } => {
            let objects_path = match (cli.objects_dir, path) {
                (Some(objects_dir), _) => objects_dir,
                (None, Some(path)) => path.join(".git").join("objects"),
                (None, None) => objects_dir(None)?,
            };

            Repository::init(&objects_path, &mut stdout)?;
        }
        Commands::HashObject { write, file } => {
            let repository = Repository::new(objects_dir(cli.objects_dir)?);
            repository.hash_file(&file, write, &mut stdout)?;
        }
        Commands::CatFile {
            pretty,
            show_type,
            size,
            object,
        } => {
            let mode = match (pretty, show_type, size) {
                (_, true, _) => CatFileMode::Type,
                (_, _, true) => CatFileMode::Size,
                _ => CatFileMode::Pretty,
            };

            let repository = Repository::new(objects_dir(cli.objects_dir)?);
            repository.cat_file(&object, mode, &mut stdout)?;
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            let repository = Repository::new(objects_dir(cli.objects_dir)?);
            repository.commit_tree(&tree, &parent, &message, &mut stdout)?;
        }
    }

    Ok(())
}
