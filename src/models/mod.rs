//! Shared types used across all modules.
//!
//! Repository identity, tree entries and the summary shape live here so
//! the fetch, assembly and summarization layers don't reach into each
//! other's internals.

pub mod repo;
pub mod summary;

pub use repo::{ClassifiedFile, EntryKind, FileEntry, RepoRef};
pub use summary::SummaryResult;
