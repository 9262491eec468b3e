//! reposum — GitHub repository summarization service.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use reposum::cache;
use reposum::config;
use reposum::env;
use reposum::github;
use reposum::providers;
use reposum::server;
use reposum::summarize;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use cli::args::{CacheAction, Cli, Command, ServeArgs};
use config::Config;
use env::Env;
use providers::rig::RigProvider;
use providers::{CompletionProvider, ProviderError};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref(), &Env::real())
        .context("failed to load configuration")?;

    match cli.command {
        Command::Serve(args) => run_serve(args, config).await,
        Command::Cache { action } => run_cache(action, &config),
    }
}

/// Wire up the collaborators and serve until the process is stopped.
async fn run_serve(args: ServeArgs, config: Config) -> Result<()> {
    cli::init_tracing();

    let provider: Option<Arc<dyn CompletionProvider>> =
        match RigProvider::new(config.provider.clone()) {
            Ok(p) => Some(Arc::new(p)),
            Err(ProviderError::NotConfigured(msg)) => {
                tracing::warn!("LLM provider not configured: {msg}");
                None
            }
            Err(e) => return Err(anyhow::anyhow!("{e}")),
        };

    let source = github::GithubClient::new(&config.github)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to build GitHub client")?;

    let cache_enabled = config.cache.enabled && !args.no_cache;
    let cache = Arc::new(cache::CacheEngine::new(
        cache_enabled,
        config.cache.resolved_dir(),
    ));
    match cache.path() {
        Some(dir) if cache_enabled => {
            tracing::info!(dir = %dir.display(), "response cache enabled");
        }
        _ => tracing::info!("response cache disabled"),
    }

    let summarizer = summarize::Summarizer::new(
        provider,
        cache,
        Duration::from_secs(config.provider.timeout_secs),
    );

    let state = server::AppState {
        source: Arc::new(source),
        summarizer: Arc::new(summarizer),
        limits: config.content,
    };

    let addr = args.listen.unwrap_or(config.server.listen_addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        addr = %addr,
        model = %config.provider.model,
        "reposum listening"
    );

    axum::serve(listener, server::router(state))
        .await
        .context("server error")?;
    Ok(())
}

/// Manage the response cache.
fn run_cache(action: CacheAction, config: &Config) -> Result<()> {
    use colored::Colorize;

    let engine = cache::CacheEngine::new(true, config.cache.resolved_dir());

    match action {
        CacheAction::Clear => {
            let stats = engine.clear().context("failed to clear cache")?;
            println!(
                "  {} Cleared {} cached response(s) ({}).",
                "✔".green().bold(),
                stats.entries,
                stats.human_size(),
            );
        }
        CacheAction::Stats => {
            let stats = engine.stats().context("failed to read cache stats")?;
            println!("  {} {}", "Entries:".cyan(), stats.entries);
            println!("  {}    {}", "Size:".cyan(), stats.human_size());
        }
        CacheAction::Path => match engine.path() {
            Some(p) => println!("{}", p.display()),
            None => bail!("cache directory could not be determined"),
        },
    }

    Ok(())
}
