//! Repository identity and tree entry types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Owner/repository pair identifying a public GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Kind of a git tree entry as reported by the tree provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
    /// Submodule commits and anything else we don't read.
    #[serde(other)]
    Other,
}

/// A single path in the repository tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Slash-separated path relative to the repository root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl FileEntry {
    /// Build a blob entry for `path`.
    pub fn blob(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
        }
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }

    /// Number of directory separators in the path.
    pub fn depth(&self) -> usize {
        depth(&self.path)
    }
}

/// Final segment of a slash-separated path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Number of directory separators in a slash-separated path.
pub fn depth(path: &str) -> usize {
    path.matches('/').count()
}

/// A tree entry that survived filtering, with its inclusion rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub entry: FileEntry,
    /// Lower values are included first.
    pub priority: usize,
}

impl ClassifiedFile {
    pub fn path(&self) -> &str {
        &self.entry.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_ref_display() {
        assert_eq!(RepoRef::new("psf", "requests").to_string(), "psf/requests");
    }

    #[test]
    fn file_name_and_depth() {
        let entry = FileEntry::blob("src/utils/helper.py");
        assert_eq!(entry.file_name(), "helper.py");
        assert_eq!(entry.depth(), 2);

        let root = FileEntry::blob("README.md");
        assert_eq!(root.file_name(), "README.md");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn entry_kind_deserializes_unknown_as_other() {
        let entry: FileEntry =
            serde_json::from_str(r#"{"path":"vendor/dep","type":"commit"}"#).unwrap();
        assert_eq!(entry.kind, EntryKind::Other);

        let entry: FileEntry = serde_json::from_str(r#"{"path":"a.rs","type":"blob"}"#).unwrap();
        assert_eq!(entry.kind, EntryKind::Blob);
    }
}
