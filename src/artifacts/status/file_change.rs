use colored::{ColoredString, Colorize};

/// Section of the status report a path is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    /// Staged, with no byte-identical copy at the same path in any commit
    ToCommit,
    /// Staged, but the working copy differs or is gone
    NotStaged,
    /// Present in some commit snapshot, absent from the staging area
    Untracked,
}

impl FileChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            FileChangeType::ToCommit => "Changes to be committed:",
            FileChangeType::NotStaged => "Changes not staged for commit:",
            FileChangeType::Untracked => "Untracked files:",
        }
    }

    pub fn paint(&self, path: &str) -> ColoredString {
        match self {
            FileChangeType::ToCommit => path.green(),
            FileChangeType::NotStaged | FileChangeType::Untracked => path.red(),
        }
    }
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
