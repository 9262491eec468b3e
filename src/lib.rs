//! reposum — GitHub repository summarization service (library crate).
//!
//! Re-exports public modules for integration tests and the binary.

pub mod cache;
pub mod config;
pub mod constants;
pub mod context;
pub mod env;
pub mod github;
pub mod models;
pub mod providers;
pub mod server;
pub mod summarize;
