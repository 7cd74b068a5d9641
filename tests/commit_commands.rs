use crate::common::command::{
    COMMIT_DATE, init_repository_dir, repository_dir, run_wit_command, wit_commit, wit_commit_all,
};
use crate::common::file::{FileSpec, write_file};
use crate::common::{read_activated, read_parents, read_reference, read_references, snapshot_contents};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::BTreeMap;

mod common;

#[rstest]
fn first_commit_creates_head_and_master(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));
    run_wit_command(dir, &["add", "a.txt"]).assert().success();

    wit_commit(dir, "c1")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[\(root-commit\) [0-9a-f]{6}\] c1\n$").unwrap());

    let references = read_references(dir);
    assert_eq!(references.len(), 2);
    assert_eq!(references["head"], references["master"]);
    assert!(read_parents(dir, &references["head"]).is_empty());
}

#[rstest]
fn commit_stores_metadata_and_full_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = read_reference(dir, "head");

    let metadata = std::fs::read_to_string(
        dir.join(".wit").join("images").join(format!("{head}.txt")),
    )
    .expect("Failed to read metadata");

    assert_eq!(
        metadata,
        "parents=None\ndate=Sun Jan  1 12:00:00 2023 +00:00\nmessage=Initial commit"
    );
    assert_eq!(
        snapshot_contents(dir, &head),
        BTreeMap::from([
            ("1.txt".to_string(), "one".to_string()),
            ("a/2.txt".to_string(), "two".to_string()),
            ("a/b/3.txt".to_string(), "three".to_string()),
        ])
    );
}

#[rstest]
fn commit_on_master_at_head_advances_both(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));

    let second = wit_commit_all(dir, "m2");

    assert_ne!(first, second);
    assert_eq!(read_reference(dir, "master"), second);
    assert_eq!(read_parents(dir, &second), vec![first]);
    assert_eq!(read_activated(dir), "master");
}

#[rstest]
fn commit_only_moves_head_when_activated_branch_is_elsewhere(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("1.txt"), "two".to_string()));
    let second = wit_commit_all(dir, "c2");

    // feature stays at the first commit while head has moved on
    std::fs::write(dir.join(".wit").join("activated.txt"), "feature")
        .expect("Failed to write activated.txt");
    write_file(FileSpec::new(dir.join("1.txt"), "three".to_string()));
    let third = wit_commit_all(dir, "c3");

    assert_eq!(read_reference(dir, "feature"), first);
    assert_eq!(read_reference(dir, "master"), second);
    assert_eq!(read_reference(dir, "head"), third);
    assert_eq!(read_parents(dir, &third), vec![second]);
}

#[rstest]
fn commit_on_checked_out_branch_advances_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    run_wit_command(dir, &["branch", "dev"]).assert().success();
    run_wit_command(dir, &["checkout", "dev"]).assert().success();

    write_file(FileSpec::new(dir.join("dev.txt"), "dev".to_string()));
    let second = wit_commit_all(dir, "on dev");

    assert_eq!(read_reference(dir, "dev"), second);
    assert_eq!(read_reference(dir, "master"), first);
}

#[rstest]
fn commits_in_detached_state_move_head_only(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    write_file(FileSpec::new(dir.join("1.txt"), "two".to_string()));
    let second = wit_commit_all(dir, "c2");

    run_wit_command(dir, &["checkout", &first]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "detached".to_string()));
    let third = wit_commit_all(dir, "c3");

    assert_eq!(read_activated(dir), "");
    assert_eq!(read_reference(dir, "master"), second);
    assert_eq!(read_reference(dir, "head"), third);
    assert_eq!(read_parents(dir, &third), vec![first]);
}

#[rstest]
fn commit_message_keeps_spaces(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = wit_commit_all(dir, "a message with  spaces");

    let metadata = std::fs::read_to_string(
        dir.join(".wit").join("images").join(format!("{head}.txt")),
    )
    .expect("Failed to read metadata");

    assert!(metadata.ends_with("\nmessage=a message with  spaces"));
}

#[rstest]
fn commit_waits_for_the_repository_lock(init_repository_dir: TempDir) -> anyhow::Result<()> {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    run_wit_command(dir, &["add", "1.txt"]).assert().success();

    let lock_file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(".wit").join("lock"))?;
    let guard = file_guard::lock(&lock_file, file_guard::Lock::Exclusive, 0, 1)?;

    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_wit"))
        .args(["commit", "while locked"])
        .env("NO_COLOR", "1")
        .env("WIT_COMMIT_DATE", COMMIT_DATE)
        .env_remove("WIT_LOG")
        .current_dir(dir)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;

    std::thread::sleep(std::time::Duration::from_millis(500));
    let still_waiting = child.try_wait()?.is_none();
    let head_while_locked = read_reference(dir, "head");

    drop(guard);
    let status = child.wait()?;

    assert!(still_waiting);
    assert_eq!(head_while_locked, first);
    assert!(status.success());
    let second = read_reference(dir, "head");
    assert_ne!(second, first);
    assert_eq!(read_parents(dir, &second), vec![first]);
    Ok(())
}
