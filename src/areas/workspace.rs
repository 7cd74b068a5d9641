//! Working directory and plain file tree helpers
//!
//! Snapshots, the staging area and the working tree are all ordinary
//! directories, so the byte copy and byte compare helpers used by every area
//! live here.

use anyhow::Context;
use fake::rand;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const WIT_DIR_NAME: &str = ".wit";

const IGNORED_PATHS: [&str; 3] = [WIT_DIR_NAME, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Express `path` (absolute, or relative to the current directory) relative to the root
    pub fn relative_path(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let absolute_path = path
            .canonicalize()
            .with_context(|| format!("The specified path does not exist: {:?}", path))?;

        absolute_path
            .strip_prefix(&self.path)
            .map(PathBuf::from)
            .with_context(|| format!("{:?} is outside the repository", path))
    }

    /// All files below `root_file_path` (the whole workspace by default), relative to the root
    pub fn list_files(&self, root_file_path: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => self.path.join(p),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            anyhow::bail!("The specified path does not exist: {:?}", root_file_path);
        }

        let relative_root = root_file_path
            .strip_prefix(&self.path)
            .map(PathBuf::from)
            .unwrap_or_default();
        if is_ignored(&relative_root) {
            return Ok(vec![]);
        }

        if root_file_path.is_dir() {
            Ok(list_tree_files(&root_file_path)?
                .into_iter()
                .map(|file| relative_root.join(file))
                .collect())
        } else {
            Ok(vec![relative_root])
        }
    }

    pub fn file_path(&self, relative_path: &Path) -> PathBuf {
        self.path.join(relative_path)
    }

    pub fn contains_file(&self, relative_path: &Path) -> bool {
        self.file_path(relative_path).is_file()
    }

    /// Overwrite (or create) a working file with the content of `source`
    pub fn write_file_from(&self, relative_path: &Path, source: &Path) -> anyhow::Result<()> {
        copy_file(source, &self.file_path(relative_path))
    }
}

fn is_ignored(path: &Path) -> bool {
    path.components().any(|component| {
        if let Component::Normal(name) = component {
            let name_str = name.to_string_lossy();
            IGNORED_PATHS.contains(&name_str.as_ref())
        } else {
            false
        }
    })
}

/// Every regular file below `root`, relative to it, `.wit` excluded
pub fn list_tree_files(root: &Path) -> anyhow::Result<BTreeSet<PathBuf>> {
    if !root.is_dir() {
        return Ok(BTreeSet::new());
    }

    let mut files = BTreeSet::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != WIT_DIR_NAME);

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file = entry
            .path()
            .strip_prefix(root)
            .map(PathBuf::from)
            .with_context(|| format!("{:?} escaped {:?}", entry.path(), root))?;
        files.insert(file);
    }

    Ok(files)
}

/// Byte-for-byte copy, creating missing parent directories
pub fn copy_file(source: &Path, target: &Path) -> anyhow::Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    // a directory in the way of a file is replaced
    if target.is_dir() {
        std::fs::remove_dir_all(target)
            .with_context(|| format!("Failed to remove existing directory: {:?}", target))?;
    }

    std::fs::copy(source, target)
        .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;

    Ok(())
}

/// Recursively copy every file of `source` into `target`, merging with what is there
pub fn copy_tree(source: &Path, target: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(target)
        .with_context(|| format!("Failed to create directory: {:?}", target))?;

    list_tree_files(source)?
        .iter()
        .try_for_each(|file| copy_file(&source.join(file), &target.join(file)))
}

/// Delete `target` and recreate it as an exact copy of `source`
pub fn replace_tree(source: &Path, target: &Path) -> anyhow::Result<()> {
    if target.exists() {
        std::fs::remove_dir_all(target)
            .with_context(|| format!("Failed to remove directory: {:?}", target))?;
    }

    copy_tree(source, target)
}

/// Write `content` to a temp file next to `target`, then rename it over `target`
///
/// A crash leaves either the old or the new file in place, never a torn one.
pub fn write_atomically(target: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = target
        .parent()
        .with_context(|| format!("Invalid file path {}", target.display()))?;
    let temp_path = dir.join(generate_temp_name());

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| format!("Unable to open temp file {}", temp_path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Unable to write temp file {}", temp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("Unable to flush temp file {}", temp_path.display()))?;

    std::fs::rename(&temp_path, target)
        .with_context(|| format!("Unable to rename temp file to {}", target.display()))?;

    Ok(())
}

fn generate_temp_name() -> String {
    format!("tmp-wit-{}", rand::random::<u32>())
}

/// Whether two files hold exactly the same bytes
pub fn same_content(left: &Path, right: &Path) -> anyhow::Result<bool> {
    let left_meta =
        std::fs::metadata(left).with_context(|| format!("Failed to stat file: {:?}", left))?;
    let right_meta =
        std::fs::metadata(right).with_context(|| format!("Failed to stat file: {:?}", right))?;

    if left_meta.len() != right_meta.len() {
        return Ok(false);
    }

    let left_data = std::fs::read(left).with_context(|| format!("Failed to read: {:?}", left))?;
    let right_data =
        std::fs::read(right).with_context(|| format!("Failed to read: {:?}", right))?;

    Ok(left_data == right_data)
}
