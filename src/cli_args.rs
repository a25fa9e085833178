//! Command-line argument structures.
//!
//! Isolates clap and `ortho_config` derivations so `main.rs` stays focused on
//! runtime logic.

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "orgissues",
    about = "Browse the open issues of a GitHub repository, five at a time",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show issues interactively, loading more on request
    Browse(BrowseArgs),
    /// Print a fixed number of pages and exit
    List(ListArgs),
}

/// Options that apply to every sub-command.
#[derive(Parser, Deserialize, Serialize, Default, Debug, OrthoConfig, Clone)]
#[ortho_config(prefix = "ORGISSUES")]
pub struct GlobalArgs {
    /// GitHub token for authenticated API requests
    #[arg(long, value_name = "TOKEN")]
    pub github_token: Option<String>,
    /// GraphQL endpoint, overriding `GITHUB_GRAPHQL_URL`
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Write an HTTP transcript to this file for debugging
    #[arg(long)]
    pub transcript: Option<std::path::PathBuf>,
    /// HTTP request timeout in seconds (none by default)
    #[arg(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,
}

impl GlobalArgs {
    /// Merge another instance into `self`; values present in `other` win.
    ///
    /// CLI flags have higher priority than configuration sources.
    pub fn merge(&mut self, other: Self) {
        self.github_token = other.github_token.or_else(|| self.github_token.take());
        self.endpoint = other.endpoint.or_else(|| self.endpoint.take());
        self.transcript = other.transcript.or_else(|| self.transcript.take());
        self.http_timeout = other.http_timeout.or_else(|| self.http_timeout.take());
    }
}

/// Parameters accepted by the `browse` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "browse")]
#[ortho_config(prefix = "ORGISSUES")]
pub struct BrowseArgs {
    /// Repository as `<org>/<repo>` or a github.com URL
    /// [default: facebook/create-react-app]
    pub path: Option<String>,
}

/// Parameters accepted by the `list` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "list")]
#[ortho_config(prefix = "ORGISSUES")]
pub struct ListArgs {
    /// Repository as `<org>/<repo>` or a github.com URL
    /// [default: facebook/create-react-app]
    pub path: Option<String>,
    /// Number of pages of five issues to fetch [default: 1]
    #[arg(short = 'p', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,
}
