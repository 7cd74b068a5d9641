#![allow(dead_code)]

pub mod command;
pub mod file;

use std::collections::BTreeMap;
use std::path::Path;

/// `references.txt` as a name -> commit id map
pub fn read_references(dir: &Path) -> BTreeMap<String, String> {
    let content = std::fs::read_to_string(dir.join(".wit").join("references.txt"))
        .expect("Failed to read references.txt");

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (name, commit_id) = line.split_once('=').expect("Malformed reference line");
            (name.to_string(), commit_id.to_string())
        })
        .collect()
}

pub fn read_reference(dir: &Path, name: &str) -> String {
    read_references(dir)
        .remove(name)
        .unwrap_or_else(|| panic!("No reference named {name}"))
}

pub fn read_activated(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".wit").join("activated.txt"))
        .expect("Failed to read activated.txt")
}

/// The `parents=` line of a commit's metadata, split into ids
pub fn read_parents(dir: &Path, commit_id: &str) -> Vec<String> {
    let metadata = std::fs::read_to_string(
        dir.join(".wit")
            .join("images")
            .join(format!("{commit_id}.txt")),
    )
    .expect("Failed to read commit metadata");

    let parents = metadata
        .lines()
        .find_map(|line| line.strip_prefix("parents="))
        .expect("No parents line");

    if parents.trim() == "None" {
        vec![]
    } else {
        parents.split(", ").map(|id| id.trim().to_string()).collect()
    }
}

pub fn snapshot_path(dir: &Path, commit_id: &str) -> std::path::PathBuf {
    dir.join(".wit").join("images").join(commit_id)
}

/// Every file of a commit snapshot with its content, keyed by relative path
pub fn snapshot_contents(dir: &Path, commit_id: &str) -> BTreeMap<String, String> {
    let root = snapshot_path(dir, commit_id);

    walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(&root)
                .expect("Snapshot file outside snapshot")
                .to_string_lossy()
                .replace('\\', "/");
            let content =
                std::fs::read_to_string(entry.path()).expect("Failed to read snapshot file");
            (relative, content)
        })
        .collect()
}
