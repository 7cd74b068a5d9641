//! Commit metadata
//!
//! Every commit is stored as two artifacts sharing the commit id: a snapshot
//! directory holding a full copy of the staging area, and a plain text
//! metadata file next to it.
//!
//! ## Format
//!
//! ```text
//! parents=<id1>, <id2>          (or: parents=None)
//! date=<ctime-style date> <+hh:mm>
//! message=<free text>
//! ```

use crate::artifacts::core::error::WitError;
use crate::artifacts::objects::commit_id::CommitId;
use chrono::{DateTime, FixedOffset};

const PARENTS_KEY: &str = "parents=";
const DATE_KEY: &str = "date=";
const MESSAGE_KEY: &str = "message=";
const NO_PARENTS: &str = "None";
const PARENTS_SEPARATOR: &str = ", ";
const MERGE_MESSAGE_PREFIX: &str = "merge branch ";

/// How the parents and reference updates of a new commit are decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitKind {
    /// single parent (current `head`), branch advances only if it sat at `head`
    Ordinary,
    /// two parents (`head` and the merged branch tip), head and activated branch both move
    Merge { branch: String, tip: CommitId },
}

impl CommitKind {
    pub fn merge(branch: impl Into<String>, tip: CommitId) -> Self {
        CommitKind::Merge {
            branch: branch.into(),
            tip,
        }
    }

    /// The message recorded for a merge of `branch`
    pub fn merge_message(branch: &str) -> String {
        format!("{MERGE_MESSAGE_PREFIX}{branch}")
    }
}

/// Parents, date and message of a stored commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMetadata {
    /// zero for a root commit, two for a merge commit
    parents: Vec<CommitId>,
    date: String,
    message: String,
}

impl CommitMetadata {
    pub fn new(parents: Vec<CommitId>, timestamp: DateTime<FixedOffset>, message: String) -> Self {
        CommitMetadata {
            parents,
            date: Self::format_date(&timestamp),
            message,
        }
    }

    /// ctime-style date followed by the UTC offset, e.g. `Sun Jan  1 12:00:00 2023 +00:00`
    pub fn format_date(timestamp: &DateTime<FixedOffset>) -> String {
        format!(
            "{} {}",
            timestamp.format("%a %b %e %H:%M:%S %Y"),
            timestamp.format("%:z")
        )
    }

    pub fn parents(&self) -> &[CommitId] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&CommitId> {
        self.parents.first()
    }

    pub fn serialize(&self) -> String {
        let parents = if self.parents.is_empty() {
            NO_PARENTS.to_string()
        } else {
            self.parents
                .iter()
                .map(|parent| parent.as_ref())
                .collect::<Vec<_>>()
                .join(PARENTS_SEPARATOR)
        };

        format!(
            "{PARENTS_KEY}{parents}\n{DATE_KEY}{}\n{MESSAGE_KEY}{}",
            self.date, self.message
        )
    }

    pub fn parse(id: &CommitId, content: &str) -> anyhow::Result<Self> {
        let malformed = |reason: &str| WitError::MalformedCommitMetadata {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        let mut lines = content.splitn(3, '\n');

        let parents_line = lines.next().ok_or_else(|| malformed("missing parents line"))?;
        let parents_value = parents_line
            .strip_prefix(PARENTS_KEY)
            .ok_or_else(|| malformed("invalid parents line"))?
            .trim();
        let parents = if parents_value == NO_PARENTS || parents_value.is_empty() {
            Vec::new()
        } else {
            parents_value
                .split(',')
                .map(|parent| CommitId::try_parse(parent.trim().to_string()))
                .collect::<anyhow::Result<Vec<_>>>()
                .map_err(|_| malformed("invalid parent id"))?
        };

        let date = lines
            .next()
            .and_then(|line| line.strip_prefix(DATE_KEY))
            .ok_or_else(|| malformed("missing date line"))?
            .trim()
            .to_string();

        let message = lines
            .next()
            .and_then(|rest| rest.strip_prefix(MESSAGE_KEY))
            .ok_or_else(|| malformed("missing message line"))?
            .to_string();

        Ok(CommitMetadata {
            parents,
            date,
            message,
        })
    }
}
