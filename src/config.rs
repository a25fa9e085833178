//! Configuration loading helpers.
//!
//! Wraps `ortho_config` so a sub-command whose `path` is absent from every
//! source still loads, leaving the CLI value (possibly `None`) in place.

use figment::error::{Error as FigmentError, Kind as FigmentKind};
use ortho_config::{OrthoConfig, OrthoError, load_and_merge_subcommand_for};

fn missing_path(err: &FigmentError) -> bool {
    // FigmentError yields its causes only by value; clone to inspect without ownership.
    err.clone()
        .into_iter()
        .any(|e| matches!(e.kind, FigmentKind::MissingField(ref f) if f == "path"))
}

/// Merge `cli_args` with configuration files and environment variables.
///
/// # Errors
///
/// Returns an [`OrthoError`] if configuration gathering fails for reasons
/// other than a missing `path` field.
#[expect(
    clippy::result_large_err,
    reason = "configuration loading errors can be verbose"
)]
pub fn load_with_path_fallback<T>(cli_args: T) -> Result<T, OrthoError>
where
    T: OrthoConfig + serde::Serialize + Default + clap::CommandFactory + Clone,
{
    match load_and_merge_subcommand_for::<T>(&cli_args) {
        Err(OrthoError::Gathering(e)) if missing_path(&e) => Ok(cli_args),
        other => other,
    }
}
