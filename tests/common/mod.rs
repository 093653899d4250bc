#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "Chris Eidhof";
pub const AUTHOR_EMAIL: &str = "chris@eidhof.nl";
pub const AUTHOR_DATE: &str = "1684850271 +0200";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_odb_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_odb_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("odb").expect("Failed to find odb binary");
    cmd.current_dir(dir)
        .args(args)
        .env_remove("GIT_OBJECT_DIRECTORY")
        .env("GIT_AUTHOR_NAME", AUTHOR_NAME)
        .env("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL)
        .env("GIT_AUTHOR_DATE", AUTHOR_DATE);
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}
