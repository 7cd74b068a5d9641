use crate::common::command::{init_repository_dir, repository_dir, run_wit_command, wit_commit_all};
use crate::common::file::{FileSpec, write_file};
use crate::common::read_reference;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn print_empty_sections_when_nothing_changed(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = read_reference(dir, "head");

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "Last commit id: {head}\n\
             Changes to be committed: \n\
             Changes not staged for commit: \n\
             Untracked files: \n"
        )));
}

#[rstest]
fn no_last_commit_line_before_the_first_commit(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("b.txt"), "b".to_string()));
    write_file(FileSpec::new(dir.join("a.txt"), "a".to_string()));
    run_wit_command(dir, &["add", "."]).assert().success();

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "Changes to be committed: a.txt, b.txt\n\
             Changes not staged for commit: \n\
             Untracked files: \n",
        );
}

#[rstest]
fn modified_file_is_not_staged_until_re_added(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));
    wit_commit_all(dir, "c1");

    write_file(FileSpec::new(dir.join("a.txt"), "y".to_string()));

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed: \n"))
        .stdout(predicate::str::contains(
            "Changes not staged for commit: a.txt\n",
        ));

    run_wit_command(dir, &["add", "a.txt"]).assert().success();

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed: a.txt\n"))
        .stdout(predicate::str::contains("Changes not staged for commit: \n"));
}

#[rstest]
fn deleted_working_file_is_not_staged(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    std::fs::remove_file(dir.join("a").join("2.txt")).expect("Failed to delete file");

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Changes not staged for commit: a/2.txt\n",
        ));
}

#[rstest]
fn reverting_to_a_committed_version_is_nothing_to_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    wit_commit_all(dir, "c2");

    // identical to the copy stored by the first commit
    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    run_wit_command(dir, &["add", "1.txt"]).assert().success();

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be committed: \n"));
}

#[rstest]
fn files_from_history_missing_in_staging_are_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    write_file(FileSpec::new(dir.join("new.txt"), "new".to_string()));
    wit_commit_all(dir, "c2");

    run_wit_command(dir, &["checkout", &first]).assert().success();

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untracked files: new.txt\n"))
        .stdout(predicate::str::contains(format!("Last commit id: {first}\n")));
}
