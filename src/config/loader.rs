//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the caller)
//! 2. Environment variables
//! 3. An explicit `--config` file, or `reposum.toml` in the working directory
//! 4. `~/.config/reposum/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub github: GithubConfig,
    pub content: ContentLimits,
    pub cache: CacheConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: constants::DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

/// Completion service configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: constants::DEFAULT_MODEL.to_string(),
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: 120,
            max_tokens: 4096,
        }
    }
}

/// GitHub tree and raw-content provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub raw_url: String,
    pub tree_timeout_secs: u64,
    pub file_timeout_secs: u64,
    pub max_file_bytes: usize,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: constants::GITHUB_API_URL.to_string(),
            raw_url: constants::GITHUB_RAW_URL.to_string(),
            tree_timeout_secs: 30,
            file_timeout_secs: 15,
            max_file_bytes: constants::MAX_FILE_BYTES,
        }
    }
}

/// Limits applied while assembling repository content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLimits {
    /// Character budget for the whole assembled text.
    pub max_chars: usize,
    /// Paths rendered in the directory tree before the "more files" marker.
    pub max_tree_entries: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_chars: constants::MAX_CONTENT_CHARS,
            max_tree_entries: constants::MAX_TREE_ENTRIES,
        }
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Defaults to `~/.config/reposum/cache` when unset.
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheConfig {
    /// Resolved cache directory, if one can be determined.
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        self.dir.clone().or_else(|| {
            dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("cache"))
        })
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `explicit` is a config file named on the command line; when absent,
    /// `reposum.toml` in the working directory is used if it exists.
    pub fn load(explicit: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: explicit or working-directory config
        match explicit {
            Some(path) => config.merge(Self::load_file(path)?),
            None => {
                let local_path = Path::new(constants::CONFIG_FILENAME);
                if local_path.exists() {
                    config.merge(Self::load_file(local_path)?);
                }
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);
        config.validate()?;

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        if other.server.listen_addr != ServerConfig::default().listen_addr {
            self.server.listen_addr = other.server.listen_addr;
        }

        let default_provider = ProviderConfig::default();
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url != default_provider.base_url {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
        if other.provider.timeout_secs != default_provider.timeout_secs {
            self.provider.timeout_secs = other.provider.timeout_secs;
        }
        if other.provider.max_tokens != default_provider.max_tokens {
            self.provider.max_tokens = other.provider.max_tokens;
        }

        let default_github = GithubConfig::default();
        if other.github.api_url != default_github.api_url {
            self.github.api_url = other.github.api_url;
        }
        if other.github.raw_url != default_github.raw_url {
            self.github.raw_url = other.github.raw_url;
        }
        if other.github.tree_timeout_secs != default_github.tree_timeout_secs {
            self.github.tree_timeout_secs = other.github.tree_timeout_secs;
        }
        if other.github.file_timeout_secs != default_github.file_timeout_secs {
            self.github.file_timeout_secs = other.github.file_timeout_secs;
        }
        if other.github.max_file_bytes != default_github.max_file_bytes {
            self.github.max_file_bytes = other.github.max_file_bytes;
        }

        let default_content = ContentLimits::default();
        if other.content.max_chars != default_content.max_chars {
            self.content.max_chars = other.content.max_chars;
        }
        if other.content.max_tree_entries != default_content.max_tree_entries {
            self.content.max_tree_entries = other.content.max_tree_entries;
        }

        // Disabled overrides enabled
        if !other.cache.enabled {
            self.cache.enabled = false;
        }
        if other.cache.dir.is_some() {
            self.cache.dir = other.cache.dir;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        let api_key = env
            .non_empty(constants::ENV_API_KEY)
            .or_else(|| env.non_empty(constants::ENV_NEBIUS_API_KEY));
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }

        if let Some(model) = env
            .non_empty(constants::ENV_MODEL)
            .or_else(|| env.non_empty(constants::ENV_NEBIUS_MODEL))
        {
            self.provider.model = model;
        }
        if let Some(base_url) = env.non_empty(constants::ENV_BASE_URL) {
            self.provider.base_url = base_url;
        }
        if let Some(addr) = env.non_empty(constants::ENV_LISTEN_ADDR) {
            self.server.listen_addr = addr;
        }
        if let Some(dir) = env.non_empty(constants::ENV_CACHE_DIR) {
            self.cache.dir = Some(PathBuf::from(dir));
        }

        // A placeholder key from a config file counts as missing too.
        if self
            .provider
            .api_key
            .as_deref()
            .is_some_and(|k| k.trim().is_empty() || k == constants::PLACEHOLDER_API_KEY)
        {
            self.provider.api_key = None;
        }
    }

    /// Reject values that would make the pipeline misbehave.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.content.max_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "content.max_chars".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.github.max_file_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "github.max_file_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        for (key, secs) in [
            ("provider.timeout_secs", self.provider.timeout_secs),
            ("github.tree_timeout_secs", self.github.tree_timeout_secs),
            ("github.file_timeout_secs", self.github.file_timeout_secs),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "timeout must be at least one second".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8000");
        assert_eq!(config.provider.model, "meta-llama/Llama-3.3-70B-Instruct");
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.content.max_chars, 60_000);
        assert_eq!(config.content.max_tree_entries, 500);
        assert_eq!(config.github.max_file_bytes, 50_000);
        assert!(config.cache.enabled);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
listen_addr = "127.0.0.1:9000"

[provider]
model = "gpt-4o-mini"
base_url = "https://api.openai.com/v1"

[content]
max_chars = 20000

[cache]
enabled = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.content.max_chars, 20_000);
        assert_eq!(config.content.max_tree_entries, 500);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn merge_overrides_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.provider.model = "custom".to_string();
        other.provider.api_key = Some("sk-file".to_string());
        other.github.tree_timeout_secs = 5;
        other.content.max_tree_entries = 50;
        other.cache.enabled = false;
        other.cache.dir = Some(PathBuf::from("/tmp/reposum-cache"));

        base.merge(other);

        assert_eq!(base.provider.model, "custom");
        assert_eq!(base.provider.api_key.as_deref(), Some("sk-file"));
        assert_eq!(base.github.tree_timeout_secs, 5);
        assert_eq!(base.content.max_tree_entries, 50);
        assert!(!base.cache.enabled);
        assert_eq!(base.cache.dir, Some(PathBuf::from("/tmp/reposum-cache")));
    }

    #[test]
    fn merge_keeps_base_when_other_is_default() {
        let mut base = Config::default();
        base.provider.model = "custom".to_string();
        base.content.max_chars = 1000;

        base.merge(Config::default());

        assert_eq!(base.provider.model, "custom");
        assert_eq!(base.content.max_chars, 1000);
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[provider]\nmodel = \"from-file\"\n").unwrap();

        let config = Config::load(Some(&path), &no_env()).unwrap();
        assert_eq!(config.provider.model, "from-file");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let result = Config::load(Some(Path::new("/tmp/reposum_missing_config.toml")), &no_env());
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn env_overrides_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "[provider]\nmodel = \"from-file\"\n").unwrap();

        let env = Env::mock([
            ("REPOSUM_MODEL", "from-env"),
            ("REPOSUM_API_KEY", "sk-env"),
            ("REPOSUM_LISTEN_ADDR", "127.0.0.1:1234"),
            ("REPOSUM_CACHE_DIR", "/var/cache/reposum"),
        ]);
        let config = Config::load(Some(&path), &env).unwrap();
        assert_eq!(config.provider.model, "from-env");
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.server.listen_addr, "127.0.0.1:1234");
        assert_eq!(config.cache.dir, Some(PathBuf::from("/var/cache/reposum")));
    }

    #[test]
    fn nebius_variables_are_fallbacks() {
        let env = Env::mock([("NEBIUS_API_KEY", "nb-key"), ("NEBIUS_MODEL", "nb-model")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key.as_deref(), Some("nb-key"));
        assert_eq!(config.provider.model, "nb-model");

        let env = Env::mock([("NEBIUS_API_KEY", "nb-key"), ("REPOSUM_API_KEY", "rs-key")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key.as_deref(), Some("rs-key"));
    }

    #[test]
    fn placeholder_api_key_is_ignored() {
        let env = Env::mock([("NEBIUS_API_KEY", "your_key_here")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert!(config.provider.api_key.is_none());

        let mut config = Config::default();
        config.provider.api_key = Some("your_key_here".to_string());
        config.apply_env_vars(&no_env());
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let mut config = Config::default();
        config.content.max_chars = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content.max_chars"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut config = ProviderConfig::default();
        config.api_key = Some("sk-secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
