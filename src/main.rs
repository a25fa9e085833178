//! `orgissues` binary entry point.

use anyhow::anyhow;
use clap::Parser;
use env_logger::Env;
use ortho_config::OrthoConfig;

use orgissues::cli_args::{Cli, Commands, GlobalArgs};
use orgissues::commands::{run_browse, run_list};
use orgissues::config::load_with_path_fallback;

/// Load global options from configuration files and the environment, then
/// let flags given on the command line override them.
fn load_global(cli: GlobalArgs) -> anyhow::Result<GlobalArgs> {
    let mut global = GlobalArgs::load_from_iter([env!("CARGO_PKG_NAME")])
        .map_err(|e| anyhow!("configuration error: {e}"))?;
    global.merge(cli);
    Ok(global)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let global = load_global(cli.global)?;
    match cli.command {
        Commands::Browse(args) => {
            let args = load_with_path_fallback(args).map_err(orgissues::OrgIssuesError::from)?;
            run_browse(args, &global).await?;
        }
        Commands::List(args) => {
            let args = load_with_path_fallback(args).map_err(orgissues::OrgIssuesError::from)?;
            run_list(args, &global).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
