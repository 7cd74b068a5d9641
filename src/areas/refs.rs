//! wit references (branches, `head`) and the activated branch
//!
//! References are human-readable names pointing to commits. They all live in
//! one flat table, `references.txt`, one `name=commitId` binding per line:
//!
//! - `head`: the current checkout position
//! - `master`: the default branch, created by the first commit
//! - anything else: a branch created with `wit branch`
//!
//! `activated.txt` holds the name of the checked out branch, or nothing when
//! `head` was moved to a raw commit id (detached state).
//!
//! ## Updates
//!
//! Lookups use exact key matching. Every rewrite loads the whole table,
//! mutates it in memory and atomically replaces the file on disk.

use crate::areas::workspace::write_atomically;
use crate::artifacts::branch::{DEFAULT_BRANCH, HEAD_REF_NAME};
use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::commit_id::CommitId;
use anyhow::Context;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const REFERENCES_FILE: &str = "references.txt";
const ACTIVATED_FILE: &str = "activated.txt";
const BINDING_SEPARATOR: char = '=';

/// In-memory image of the reference table, bindings kept in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    bindings: Vec<(String, CommitId)>,
}

impl ReferenceTable {
    /// Parse and validate the table; blank lines are skipped
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut bindings = Vec::new();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let malformed = || WitError::MalformedReferences {
                line: number + 1,
                content: line.to_string(),
            };

            let (name, commit_id) = line.split_once(BINDING_SEPARATOR).ok_or_else(malformed)?;
            if name.is_empty() {
                return Err(malformed().into());
            }
            let commit_id =
                CommitId::try_parse(commit_id.trim().to_string()).map_err(|_| malformed())?;

            bindings.push((name.to_string(), commit_id));
        }

        Ok(ReferenceTable { bindings })
    }

    pub fn serialize(&self) -> String {
        self.bindings
            .iter()
            .map(|(name, commit_id)| format!("{name}{BINDING_SEPARATOR}{commit_id}\n"))
            .collect()
    }

    /// Table created by the first commit: `head` and `master` at the same commit
    pub fn initial(commit_id: &CommitId) -> Self {
        ReferenceTable {
            bindings: vec![
                (HEAD_REF_NAME.to_string(), commit_id.clone()),
                (DEFAULT_BRANCH.to_string(), commit_id.clone()),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommitId> {
        self.bindings
            .iter()
            .find(|(binding_name, _)| binding_name == name)
            .map(|(_, commit_id)| commit_id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rewrite the bindings reading exactly `name=old_id`; returns how many changed
    pub fn rename(&mut self, name: &str, old_id: &CommitId, new_id: &CommitId) -> usize {
        let mut changed = 0;
        for (binding_name, commit_id) in self.bindings.iter_mut() {
            if binding_name == name && commit_id == old_id {
                *commit_id = new_id.clone();
                changed += 1;
            }
        }
        changed
    }

    /// Point `name` at `new_id` whatever it pointed at before, appending it if absent
    pub fn set(&mut self, name: &str, new_id: &CommitId) {
        match self.get(name).cloned() {
            Some(old_id) => {
                self.rename(name, &old_id, new_id);
            }
            None => self.bindings.push((name.to_string(), new_id.clone())),
        }
    }

    pub fn append(&mut self, name: &str, commit_id: &CommitId) -> anyhow::Result<()> {
        if self.contains(name) {
            return Err(WitError::BranchAlreadyExists(name.to_string()).into());
        }

        self.bindings.push((name.to_string(), commit_id.clone()));
        Ok(())
    }

    /// Inverse index: every commit id with the names pointing at it
    pub fn reversed(&self) -> BTreeMap<CommitId, Vec<String>> {
        self.bindings
            .iter()
            .fold(BTreeMap::new(), |mut acc, (name, commit_id)| {
                acc.entry(commit_id.clone())
                    .or_insert_with(Vec::new)
                    .push(name.clone());
                acc
            })
    }
}

/// Which branch is checked out
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActivatedBranch {
    Branch(String),
    /// `head` was moved to a raw commit id
    #[default]
    Detached,
}

impl ActivatedBranch {
    pub fn parse(content: &str) -> Self {
        let name = content.trim();
        if name.is_empty() {
            ActivatedBranch::Detached
        } else {
            ActivatedBranch::Branch(name.to_string())
        }
    }

    pub fn branch_name(&self) -> Option<&str> {
        match self {
            ActivatedBranch::Branch(name) => Some(name),
            ActivatedBranch::Detached => None,
        }
    }
}

impl std::fmt::Display for ActivatedBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.branch_name().unwrap_or_default())
    }
}

/// Reference table and activated branch persisted under `.wit`
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the `.wit` directory
    path: Box<Path>,
}

impl Refs {
    pub fn references_path(&self) -> PathBuf {
        self.path.join(REFERENCES_FILE)
    }

    pub fn activated_path(&self) -> PathBuf {
        self.path.join(ACTIVATED_FILE)
    }

    /// The table, or None before the first commit created it
    pub fn load(&self) -> anyhow::Result<Option<ReferenceTable>> {
        let path = self.references_path();
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read references at {:?}", path))?;

        ReferenceTable::parse(&content).map(Some)
    }

    fn store(&self, table: &ReferenceTable) -> anyhow::Result<()> {
        write_atomically(&self.references_path(), table.serialize().as_bytes())
    }

    /// Load, mutate in memory, atomically write back
    fn update<T>(
        &self,
        mutate: impl FnOnce(&mut ReferenceTable) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut table = self.load()?.unwrap_or_default();
        let result = mutate(&mut table)?;
        self.store(&table)?;

        Ok(result)
    }

    pub fn read(&self, name: &str) -> anyhow::Result<Option<CommitId>> {
        Ok(self.load()?.and_then(|table| table.get(name).cloned()))
    }

    pub fn read_head(&self) -> anyhow::Result<Option<CommitId>> {
        self.read(HEAD_REF_NAME)
    }

    pub fn contains(&self, name: &str) -> anyhow::Result<bool> {
        Ok(self.load()?.is_some_and(|table| table.contains(name)))
    }

    /// Create the table with `head` and `master` at `commit_id`; false if it already exists
    pub fn initialize(&self, commit_id: &CommitId) -> anyhow::Result<bool> {
        if self.references_path().exists() {
            return Ok(false);
        }

        self.store(&ReferenceTable::initial(commit_id))?;
        tracing::debug!(commit = %commit_id, "initialized references");

        Ok(true)
    }

    pub fn rename(&self, name: &str, old_id: &CommitId, new_id: &CommitId) -> anyhow::Result<usize> {
        let changed = self.update(|table| Ok(table.rename(name, old_id, new_id)))?;
        tracing::debug!(name, old = %old_id, new = %new_id, changed, "rewrote reference");

        Ok(changed)
    }

    pub fn set(&self, name: &str, new_id: &CommitId) -> anyhow::Result<()> {
        self.update(|table| {
            table.set(name, new_id);
            Ok(())
        })?;
        tracing::debug!(name, new = %new_id, "moved reference");

        Ok(())
    }

    pub fn set_head(&self, new_id: &CommitId) -> anyhow::Result<()> {
        self.set(HEAD_REF_NAME, new_id)
    }

    pub fn append(&self, name: &str, commit_id: &CommitId) -> anyhow::Result<()> {
        self.update(|table| table.append(name, commit_id))?;
        tracing::debug!(name, commit = %commit_id, "created reference");

        Ok(())
    }

    pub fn reverse_refs(&self) -> anyhow::Result<BTreeMap<CommitId, Vec<String>>> {
        Ok(self
            .load()?
            .map(|table| table.reversed())
            .unwrap_or_default())
    }

    pub fn read_activated(&self) -> anyhow::Result<ActivatedBranch> {
        let path = self.activated_path();
        if !path.is_file() {
            return Ok(ActivatedBranch::Detached);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read activated branch at {:?}", path))?;

        Ok(ActivatedBranch::parse(&content))
    }

    pub fn write_activated(&self, activated: &ActivatedBranch) -> anyhow::Result<()> {
        write_atomically(&self.activated_path(), activated.to_string().as_bytes())
    }
}
