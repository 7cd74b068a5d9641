use crate::common::command::{init_repository_dir, repository_dir, run_wit_command, wit_commit_all};
use crate::common::file::{FileSpec, write_file};
use crate::common::read_reference;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn graph_of_empty_repository_has_no_nodes(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    run_wit_command(dir, &["graph"])
        .assert()
        .success()
        .stdout("digraph wit {\n    rankdir=RL;\n}\n");
}

#[rstest]
fn graph_lists_parent_edges_and_references(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = read_reference(dir, "head");
    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    let second = wit_commit_all(dir, "c2");

    run_wit_command(dir, &["graph"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph wit {\n    rankdir=RL;\n"))
        .stdout(predicate::str::contains(format!(
            "    \"{}\" -> \"{}\";\n",
            &second[..6],
            &first[..6]
        )))
        .stdout(predicate::str::contains(format!(
            "    \"head\" -> \"{}\";\n",
            &second[..6]
        )))
        .stdout(predicate::str::contains(format!(
            "    \"master\" -> \"{}\";\n",
            &second[..6]
        )))
        .stdout(predicate::str::ends_with("}\n"));
}

#[rstest]
fn graph_escapes_quotes_in_reference_names(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = read_reference(dir, "head");
    run_wit_command(dir, &["branch", r#"say"hi"#]).assert().success();

    run_wit_command(dir, &["graph"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"    "say\"hi" [shape=box];"#))
        .stdout(predicate::str::contains(format!(
            "    \"say\\\"hi\" -> \"{}\";\n",
            &head[..6]
        )));
}
