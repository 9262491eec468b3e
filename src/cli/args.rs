//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

/// Summarize public GitHub repositories with an LLM.
#[derive(Parser, Debug)]
#[command(
    name = "reposum",
    version = reposum::constants::VERSION,
    about = "HTTP service that summarizes public GitHub repositories"
)]
pub struct Cli {
    /// Config file to load instead of ./reposum.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),

    /// Manage the response cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config and REPOSUM_LISTEN_ADDR).
    #[arg(long)]
    pub listen: Option<String>,

    /// Skip the persistent response cache for this run.
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,
}

/// Cache management subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum CacheAction {
    /// Remove all cached model responses.
    Clear,
    /// Show cache statistics (entry count and size).
    Stats,
    /// Print the cache directory path.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::parse_from([
            "reposum",
            "serve",
            "--listen",
            "127.0.0.1:9000",
            "--no-cache",
        ]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.listen.as_deref(), Some("127.0.0.1:9000"));
                assert!(args.no_cache);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["reposum", "cache", "stats", "--config", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Command::Cache {
                action: CacheAction::Stats
            }
        ));
    }

    #[test]
    fn serve_defaults() {
        let cli = Cli::parse_from(["reposum", "serve"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert!(args.listen.is_none());
        assert!(!args.no_cache);
    }
}
