//! Command execution helpers for `orgissues`.
//!
//! This module owns the runtime flow for each subcommand, including token
//! resolution, API client setup, and rendering output to the terminal.

use std::io::ErrorKind;
use std::sync::LazyLock;
use std::time::Duration;

use log::{error, warn};
use regex::Regex;

use crate::auth::resolve_github_token;
use crate::cli_args::{BrowseArgs, GlobalArgs, ListArgs};
use crate::environment;
use crate::printer::Printer;
use crate::session::{Session, load_pages};
use crate::store::IssueStore;
use crate::{GraphQLClient, OrgIssuesError, SearchPath};

/// Create a [`GraphQLClient`], falling back to no transcript on failure.
///
/// The endpoint comes from `--endpoint` when given, otherwise from
/// `GITHUB_GRAPHQL_URL` or GitHub's public API.
fn build_graphql_client(token: &str, global: &GlobalArgs) -> Result<GraphQLClient, OrgIssuesError> {
    let create = |transcript: Option<std::path::PathBuf>| match global.endpoint.as_deref() {
        Some(endpoint) => GraphQLClient::with_endpoint(token, endpoint, transcript),
        None => GraphQLClient::new(token, transcript),
    };
    let client = match create(global.transcript.clone()) {
        Ok(c) => c,
        Err(e) => {
            warn!("failed to create transcript: {e}");
            create(None)?
        }
    };
    Ok(match global.http_timeout {
        Some(secs) => client.with_timeout(Duration::from_secs(secs)),
        None => client,
    })
}

fn warn_on_missing_token_and_locale(token: &str) {
    if token.is_empty() {
        warn!("GitHub token not set, using anonymous API access");
    }
    if !locale_is_utf8() {
        warn!("terminal locale is not UTF-8; reaction emojis may not render correctly");
    }
}

fn caused_by_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|c| {
        c.downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == ErrorKind::BrokenPipe)
    })
}

/// Swallow output errors caused by a closed stdout; log the rest.
fn report_output_error(result: anyhow::Result<()>) {
    if let Err(e) = result {
        if !caused_by_broken_pipe(&e) {
            error!("error writing output: {e}");
        }
    }
}

fn search_path(raw: Option<&str>) -> SearchPath {
    raw.map(SearchPath::parse).unwrap_or_default()
}

fn prepare_client(global: &GlobalArgs) -> Result<GraphQLClient, OrgIssuesError> {
    let token = resolve_github_token(global);
    warn_on_missing_token_and_locale(&token);
    build_graphql_client(&token, global)
}

/// Browse issues interactively on stdin and stdout.
///
/// # Errors
///
/// Returns an error if the client cannot be built. Fetch failures during
/// the session are reported inline and do not end it.
pub async fn run_browse(args: BrowseArgs, global: &GlobalArgs) -> Result<(), OrgIssuesError> {
    let client = prepare_client(global)?;
    let printer = Printer::detect();
    let mut session = Session::new(&client, &printer);
    let input = std::io::stdin().lock();
    let output = std::io::stdout().lock();
    report_output_error(
        session
            .run(search_path(args.path.as_deref()), input, output)
            .await,
    );
    Ok(())
}

/// Fetch `--pages` pages and print the accumulated result once.
///
/// # Errors
///
/// Returns an error if the client cannot be built or a request fails.
/// GraphQL errors are printed as part of the result instead.
pub async fn run_list(args: ListArgs, global: &GlobalArgs) -> Result<(), OrgIssuesError> {
    let client = prepare_client(global)?;
    let mut store = IssueStore::default();
    let path = search_path(args.path.as_deref());
    load_pages(&client, &mut store, path, args.pages.unwrap_or(1)).await?;

    let printer = Printer::detect();
    let mut out = std::io::stdout().lock();
    report_output_error(
        printer
            .write_header(&mut out, store.path())
            .map_err(anyhow::Error::from)
            .and_then(|()| printer.write_state(&mut out, store.state())),
    );
    Ok(())
}

static UTF8_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUTF-?8\b").expect("valid regex"));

fn locale_is_utf8() -> bool {
    environment::var("LC_ALL")
        .or_else(|_| environment::var("LC_CTYPE"))
        .or_else(|_| environment::var("LANG"))
        .is_ok_and(|v| UTF8_RE.is_match(&v))
}

#[cfg(test)]
mod tests;
