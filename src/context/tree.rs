//! Directory tree rendering.

use crate::models::FileEntry;

/// Render every entry as an indented tree, one path per line.
///
/// Paths are sorted lexicographically and each line is indented two spaces
/// per directory separator, showing only the final segment. At most
/// `max_entries` lines are rendered; the rest are summarized by a
/// `... (N more files)` line.
pub fn render_tree(entries: &[FileEntry], max_entries: usize) -> String {
    let mut sorted: Vec<&FileEntry> = entries.iter().collect();
    sorted.sort_unstable_by(|a, b| a.path.cmp(&b.path));

    let mut lines: Vec<String> = sorted
        .iter()
        .take(max_entries)
        .map(|entry| format!("{}{}", "  ".repeat(entry.depth()), entry.file_name()))
        .collect();

    if sorted.len() > max_entries {
        lines.push(format!("... ({} more files)", sorted.len() - max_entries));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(paths: &[&str]) -> Vec<FileEntry> {
        paths.iter().copied().map(FileEntry::blob).collect()
    }

    #[test]
    fn renders_sorted_indented_names() {
        let tree = render_tree(&entries(&["src/main.rs", "Cargo.toml", "src/cli/args.rs"]), 500);
        assert_eq!(tree, "Cargo.toml\n    args.rs\n  main.rs");
    }

    #[test]
    fn truncates_with_more_files_marker() {
        let tree = render_tree(&entries(&["d.txt", "a.txt", "c.txt", "b.txt"]), 2);
        assert_eq!(tree, "a.txt\nb.txt\n... (2 more files)");
    }

    #[test]
    fn exact_cap_has_no_marker() {
        let tree = render_tree(&entries(&["a", "b"]), 2);
        assert_eq!(tree, "a\nb");
    }

    #[test]
    fn empty_tree_is_empty_string() {
        assert_eq!(render_tree(&[], 500), "");
    }
}
