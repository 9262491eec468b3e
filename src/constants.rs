//! App-wide constants.
//!
//! Centralises the user agent, config paths, environment variable names,
//! upstream URLs and content limits so a rename only requires changing
//! this file.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `User-Agent` header sent to GitHub (required by the REST API).
pub const USER_AGENT: &str = concat!("reposum/", env!("CARGO_PKG_VERSION"));

/// Local config filename (e.g. `reposum.toml` in the working directory).
pub const CONFIG_FILENAME: &str = "reposum.toml";

/// Directory name under `~/.config/` for global config and cache.
pub const CONFIG_DIR: &str = "reposum";

/// Default HTTP listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

// ── Upstream endpoints ──────────────────────────────────────────────

pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_RAW_URL: &str = "https://raw.githubusercontent.com";

/// OpenAI-compatible completion endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.tokenfactory.nebius.com/v1/";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct";

// ── Content limits ──────────────────────────────────────────────────

/// Character budget for the assembled repository content.
pub const MAX_CONTENT_CHARS: usize = 60_000;

/// Maximum number of paths rendered in the directory tree.
pub const MAX_TREE_ENTRIES: usize = 500;

/// Raw file bodies larger than this (in bytes) are truncated.
pub const MAX_FILE_BYTES: usize = 50_000;

/// A final file section is only truncated (rather than dropped) when more
/// than this many characters of budget remain.
pub const MIN_TRUNCATION_ROOM: usize = 200;

/// Characters held back from the remaining budget when truncating.
pub const TRUNCATION_RESERVE: usize = 100;

/// Marker appended to any truncated body.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_KEY: &str = "REPOSUM_API_KEY";
pub const ENV_MODEL: &str = "REPOSUM_MODEL";
pub const ENV_BASE_URL: &str = "REPOSUM_BASE_URL";
pub const ENV_LISTEN_ADDR: &str = "REPOSUM_LISTEN_ADDR";
pub const ENV_CACHE_DIR: &str = "REPOSUM_CACHE_DIR";

/// Provider-specific fallbacks for the default Nebius endpoint.
pub const ENV_NEBIUS_API_KEY: &str = "NEBIUS_API_KEY";
pub const ENV_NEBIUS_MODEL: &str = "NEBIUS_MODEL";

/// Value shipped in sample `.env` files; treated as "not set".
pub const PLACEHOLDER_API_KEY: &str = "your_key_here";
