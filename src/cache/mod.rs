//! Content-fingerprint based response cache.
//!
//! Stores the raw model response for each assembled content blob so an
//! identical request never triggers a second completion call. Entries are
//! never invalidated.

pub mod store;

use std::path::PathBuf;

use sha2::{Digest, Sha256};

pub use store::{CacheStats, FileStore};

/// Hex-encoded SHA-256 of the exact content bytes.
pub fn fingerprint(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// The cache engine for model responses.
pub struct CacheEngine {
    enabled: bool,
    store: FileStore,
}

impl CacheEngine {
    /// Create a cache engine over the given directory.
    ///
    /// With no directory, the engine behaves as disabled.
    pub fn new(enabled: bool, dir: Option<PathBuf>) -> Self {
        Self {
            enabled,
            store: FileStore::new(dir),
        }
    }

    /// Look up the raw response cached under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        self.store.get(key)
    }

    /// Store a raw response under `key`.
    pub fn put(&self, key: &str, response: &str, model: &str) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.store.put(key, response, model) {
            tracing::warn!(key, error = %e, "failed to write cache entry");
        }
    }

    /// Remove all cached entries.
    pub fn clear(&self) -> Result<CacheStats, std::io::Error> {
        self.store.clear()
    }

    /// Compute statistics about the cache.
    pub fn stats(&self) -> Result<CacheStats, std::io::Error> {
        self.store.stats()
    }

    /// Return the cache directory path.
    pub fn path(&self) -> Option<&PathBuf> {
        self.store.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic() {
        assert_eq!(fingerprint("hello"), fingerprint("hello"));
    }

    #[test]
    fn fingerprint_varies_with_content() {
        assert_ne!(fingerprint("hello"), fingerprint("world"));
        assert_ne!(fingerprint("hello"), fingerprint("hello "));
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn enabled_engine_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CacheEngine::new(true, Some(dir.path().to_path_buf()));
        engine.put("k", "{\"summary\":\"s\"}", "m");
        assert_eq!(engine.get("k").as_deref(), Some("{\"summary\":\"s\"}"));
    }

    #[test]
    fn disabled_engine_never_stores() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CacheEngine::new(false, Some(dir.path().to_path_buf()));
        engine.put("k", "raw", "m");
        assert!(engine.get("k").is_none());
        assert_eq!(engine.stats().unwrap().entries, 0);
    }
}
