//! GitHub token resolution.
//!
//! An explicit token (CLI flag or config file) wins, then
//! `ORGISSUES_GITHUB_TOKEN`, `GITHUB_TOKEN` and finally
//! `REACT_APP_GITHUB_PERSONAL_ACCESS_TOKEN`. Empty values are ignored and an
//! empty result means anonymous access.

use crate::cli_args::GlobalArgs;
use crate::environment;

/// Environment variables consulted, in order, when no token is configured.
pub const TOKEN_ENV_VARS: &[&str] = &[
    "ORGISSUES_GITHUB_TOKEN",
    "GITHUB_TOKEN",
    "REACT_APP_GITHUB_PERSONAL_ACCESS_TOKEN",
];

#[must_use]
pub fn resolve_github_token(global: &GlobalArgs) -> String {
    global
        .github_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .or_else(|| environment::first_non_empty(TOKEN_ENV_VARS))
        .unwrap_or_default()
}
