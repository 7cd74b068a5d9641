use crate::common::file::{FileSpec, write_file};
use crate::common::read_reference;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed as "Initial commit"
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_wit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    wit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_wit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wit").expect("Failed to find wit binary");
    cmd.envs(vec![("NO_COLOR", "1"), ("WIT_COMMIT_DATE", COMMIT_DATE)]);
    cmd.env_remove("WIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn wit_commit(dir: &Path, message: &str) -> Command {
    run_wit_command(dir, &["commit", message])
}

/// Stage everything and commit it, returning the new `head`
pub fn wit_commit_all(dir: &Path, message: &str) -> String {
    run_wit_command(dir, &["add", "."]).assert().success();
    wit_commit(dir, message).assert().success();

    read_reference(dir, "head")
}
