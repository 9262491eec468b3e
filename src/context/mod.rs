//! Repository content assembly.
//!
//! Builds the single bounded text blob sent to the model: a directory
//! tree followed by file bodies in priority order, stopping once the
//! character budget is spent. Lengths are counted in characters, never
//! bytes, and truncation never splits a character.

pub mod classify;
pub mod tree;

use crate::config::ContentLimits;
use crate::constants::{MIN_TRUNCATION_ROOM, TRUNCATION_MARKER, TRUNCATION_RESERVE};
use crate::github::{FetchError, RepoSource};
use crate::models::{ClassifiedFile, FileEntry, RepoRef};

/// Classify `entries` and assemble the prioritized content for `repo`.
pub async fn build_repo_content(
    repo: &RepoRef,
    entries: &[FileEntry],
    source: &dyn RepoSource,
    limits: ContentLimits,
) -> Result<String, FetchError> {
    let relevant = classify::relevant_files(entries);
    tracing::debug!(
        repo = %repo,
        total = entries.len(),
        relevant = relevant.len(),
        "classified repository tree"
    );
    assemble(repo, entries, &relevant, source, limits).await
}

/// Assemble the header section and as many file sections as fit.
///
/// `all_entries` feeds the tree rendering; `relevant` must already be in
/// priority order. Files that are unavailable or whitespace-only are
/// skipped without consuming budget. The first file that does not fit is
/// truncated to `remaining - TRUNCATION_RESERVE` characters when more than
/// `MIN_TRUNCATION_ROOM` characters remain, otherwise dropped; assembly
/// stops there either way.
pub async fn assemble(
    repo: &RepoRef,
    all_entries: &[FileEntry],
    relevant: &[ClassifiedFile],
    source: &dyn RepoSource,
    limits: ContentLimits,
) -> Result<String, FetchError> {
    let tree = tree::render_tree(all_entries, limits.max_tree_entries);
    let mut content = header_section(repo, &tree);
    let mut total = char_len(&content);
    let mut included = 0usize;

    for file in relevant {
        if total >= limits.max_chars {
            break;
        }

        let Some(body) = source.fetch_file(repo, file.path()).await? else {
            continue;
        };
        if body.trim().is_empty() {
            continue;
        }

        let section = file_section(file.path(), &body);
        let section_len = char_len(&section);

        if total + section_len > limits.max_chars {
            let remaining = limits.max_chars - total;
            if remaining > MIN_TRUNCATION_ROOM {
                let cut = truncate_chars(&body, remaining - TRUNCATION_RESERVE);
                content.push_str(&file_section(
                    file.path(),
                    &format!("{cut}{TRUNCATION_MARKER}"),
                ));
                included += 1;
                tracing::debug!(path = file.path(), remaining, "truncated final file section");
            }
            break;
        }

        content.push_str(&section);
        total += section_len;
        included += 1;
    }

    tracing::info!(
        repo = %repo,
        files = included,
        chars = char_len(&content),
        "assembled repository content"
    );
    Ok(content)
}

fn header_section(repo: &RepoRef, tree: &str) -> String {
    format!("# Repository: {repo}\n\n## Directory Structure\n```\n{tree}\n```\n")
}

fn file_section(path: &str, body: &str) -> String {
    format!("\n## File: {path}\n```\n{body}\n```\n")
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Longest prefix of `s` with at most `max_chars` characters.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
