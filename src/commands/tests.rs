//! Tests for command helper utilities.

use super::{build_graphql_client, caused_by_broken_pipe, locale_is_utf8};
use crate::cli_args::GlobalArgs;
use crate::environment::with_vars;
use rstest::rstest;
use serial_test::serial;

#[rstest]
#[case(Some("en_GB.UTF-8"), None, None, true)]
#[case(Some("en_GB.UTF8"), None, None, true)]
#[case(Some("en_GB.utf8"), None, None, true)]
#[case(Some("de_DE.UTF-8@euro"), None, None, true)]
#[case(Some("en_GB.UTF80"), None, None, false)]
#[case(Some("UTF-8"), None, None, true)]
#[case(Some("C.UTF-8"), Some("C"), None, true)]
#[case(None, Some("en_GB.UTF-8"), None, true)]
#[case(None, Some("C"), None, false)]
#[case(None, None, Some("en_GB.UTF-8"), true)]
#[case(None, None, Some("C"), false)]
#[case(None, None, None, false)]
#[serial]
fn detect_utf8_locale_cases(
    #[case] lc_all: Option<&str>,
    #[case] lc_ctype: Option<&str>,
    #[case] lang: Option<&str>,
    #[case] expected: bool,
) {
    let detected = with_vars(
        &[("LC_ALL", lc_all), ("LC_CTYPE", lc_ctype), ("LANG", lang)],
        locale_is_utf8,
    );
    assert_eq!(detected, expected);
}

#[test]
fn broken_pipe_is_detected_through_context() {
    let err = anyhow::Error::from(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        .context("writing issues");
    assert!(caused_by_broken_pipe(&err));
}

#[test]
fn other_io_errors_are_not_broken_pipes() {
    let err = anyhow::Error::from(std::io::Error::other("boom"));
    assert!(!caused_by_broken_pipe(&err));
}

#[test]
#[serial]
fn explicit_endpoint_wins_over_environment() {
    let global = GlobalArgs {
        endpoint: Some("http://127.0.0.1:9/graphql".to_string()),
        ..GlobalArgs::default()
    };
    let client = with_vars(
        &[("GITHUB_GRAPHQL_URL", Some("http://127.0.0.1:8/graphql"))],
        || build_graphql_client("", &global),
    )
    .expect("client");
    assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9/graphql");
}

#[test]
#[serial]
fn environment_endpoint_is_used_without_flag() {
    let client = with_vars(
        &[("GITHUB_GRAPHQL_URL", Some("http://127.0.0.1:8/graphql"))],
        || build_graphql_client("", &GlobalArgs::default()),
    )
    .expect("client");
    assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:8/graphql");
}

#[test]
fn unwritable_transcript_falls_back_to_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let global = GlobalArgs {
        endpoint: Some("http://127.0.0.1:9/graphql".to_string()),
        transcript: Some(dir.path().join("missing").join("transcript.log")),
        ..GlobalArgs::default()
    };
    assert!(build_graphql_client("", &global).is_ok());
}
