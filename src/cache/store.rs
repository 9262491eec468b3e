//! Filesystem-based cache store.
//!
//! One JSON file per key in `~/.config/reposum/cache/` (or a configured
//! directory). Writes land in a uniquely named temp file that is renamed
//! into place, so readers never see a partial entry and concurrent writers
//! for the same key resolve as last-writer-wins.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk representation of one cached response.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Raw model output text.
    response: String,
    /// Model that produced it.
    model: String,
}

/// Filesystem-based cache store.
pub struct FileStore {
    cache_dir: Option<PathBuf>,
}

impl FileStore {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self { cache_dir }
    }

    /// Get the cached response for `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key)?;
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) => Some(entry.response),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Store a response under `key`.
    pub fn put(&self, key: &str, response: &str, model: &str) -> io::Result<()> {
        let Some(path) = self.key_path(key) else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entry = CacheEntry {
            response: response.to_string(),
            model: model.to_string(),
        };
        let content = serde_json::to_string(&entry).map_err(io::Error::other)?;

        let tmp = path.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4()));
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path).inspect_err(|_| {
            let _ = std::fs::remove_file(&tmp);
        })
    }

    /// Remove all cached entries and leftover temp files.
    ///
    /// Only files this store writes are touched; the directory itself and
    /// anything else in it are left alone.
    pub fn clear(&self) -> Result<CacheStats, io::Error> {
        let stats = self.stats()?;
        let Some(ref dir) = self.cache_dir else {
            return Ok(stats);
        };
        if !dir.exists() {
            return Ok(stats);
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if is_entry_file(&path) || is_temp_file(&path) {
                std::fs::remove_file(&path)?;
            }
        }

        Ok(stats)
    }

    /// Compute statistics about the cache.
    pub fn stats(&self) -> Result<CacheStats, io::Error> {
        let mut stats = CacheStats {
            entries: 0,
            total_bytes: 0,
        };
        let Some(ref dir) = self.cache_dir else {
            return Ok(stats);
        };
        if !dir.exists() {
            return Ok(stats);
        }

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if is_entry_file(&entry.path()) {
                stats.entries += 1;
                stats.total_bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
            }
        }

        Ok(stats)
    }

    /// Return the cache directory path.
    pub fn path(&self) -> Option<&PathBuf> {
        self.cache_dir.as_ref()
    }

    /// Get the file path for a cache key.
    fn key_path(&self, key: &str) -> Option<PathBuf> {
        self.cache_dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }
}

fn is_entry_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == "json")
}

/// `{key}.json.{uuid}.tmp` left by an interrupted write.
fn is_temp_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(".tmp") && n.contains(".json."))
}

/// Statistics about the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached entries.
    pub entries: usize,
    /// Total size in bytes.
    pub total_bytes: u64,
}

impl CacheStats {
    /// Format total_bytes as a human-readable string.
    pub fn human_size(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = 1024 * KB;

        if self.total_bytes >= MB {
            format!("{:.1} MiB", self.total_bytes as f64 / MB as f64)
        } else if self.total_bytes >= KB {
            format!("{:.1} KiB", self.total_bytes as f64 / KB as f64)
        } else {
            format!("{} B", self.total_bytes)
        }
    }
}
