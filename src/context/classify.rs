//! Path filtering and inclusion priority.
//!
//! Decides which repository files are worth showing to the model and in
//! what order. Matching is case-sensitive on directory names, filenames
//! and suffixes; only the manifest lookup in [`priority`] ignores case.

use crate::models::{repo, ClassifiedFile, FileEntry};

/// Dependency, build, VCS and cache directories.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    "__pycache__",
    ".venv",
    "venv",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "coverage",
    ".tox",
    ".nox",
    "env",
    ".eggs",
    "eggs",
    ".mypy_cache",
    ".pytest_cache",
    "bower_components",
    "jspm_packages",
    ".terraform",
    ".gradle",
];

/// Lockfiles and OS metadata.
const SKIP_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Pipfile.lock",
    "poetry.lock",
    "composer.lock",
    "Gemfile.lock",
    "go.sum",
    ".DS_Store",
    "Thumbs.db",
];

/// Binaries, archives, media, minified bundles and lockfile-style suffixes.
const SKIP_SUFFIXES: &[&str] = &[
    ".pyc", ".pyo", ".so", ".o", ".a", ".dylib", ".dll", ".exe", ".bin", ".dat", ".db",
    ".sqlite", ".sqlite3", ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".svg", ".webp",
    ".ttf", ".woff", ".woff2", ".eot", ".otf", ".zip", ".tar", ".gz", ".bz2", ".7z", ".rar",
    ".jar", ".war", ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".mp3", ".mp4",
    ".avi", ".mov", ".wav", ".flac", ".min.js", ".min.css", ".map", ".lock", ".sum",
];

/// Package manifests, build files and CI/container descriptors, lowercased.
const MANIFEST_FILES: &[&str] = &[
    "package.json",
    "requirements.txt",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "cargo.toml",
    "go.mod",
    "gemfile",
    "composer.json",
    "makefile",
    "dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "workflows",
    "tsconfig.json",
    "webpack.config.js",
    "vite.config.ts",
    "vite.config.js",
    "cmakelists.txt",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
];

/// Returns `true` if the path should never be shown to the model.
pub fn should_skip(path: &str) -> bool {
    let file_name = repo::file_name(path);

    if path.split('/').rev().skip(1).any(|dir| SKIP_DIRS.contains(&dir)) {
        return true;
    }
    if SKIP_FILES.contains(&file_name) {
        return true;
    }
    SKIP_SUFFIXES.iter().any(|suffix| file_name.ends_with(suffix))
}

/// Inclusion rank for a path: lower is more important.
///
/// READMEs rank 0, known manifests 1, other root-level files 2, and
/// nested files `3 + depth`.
pub fn priority(path: &str) -> usize {
    let file_name = repo::file_name(path).to_lowercase();
    if file_name.starts_with("readme") {
        return 0;
    }
    if MANIFEST_FILES.contains(&file_name.as_str()) {
        return 1;
    }
    match repo::depth(path) {
        0 => 2,
        depth => 3 + depth,
    }
}

/// Drop skipped entries and order the rest by priority.
///
/// The sort is stable, so entries of equal priority keep their input order.
pub fn relevant_files(entries: &[FileEntry]) -> Vec<ClassifiedFile> {
    let mut relevant: Vec<ClassifiedFile> = entries
        .iter()
        .filter(|entry| !should_skip(&entry.path))
        .map(|entry| ClassifiedFile {
            priority: priority(&entry.path),
            entry: entry.clone(),
        })
        .collect();
    relevant.sort_by_key(|file| file.priority);
    relevant
}
