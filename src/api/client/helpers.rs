//! Helper utilities for GraphQL request handling.

use log::warn;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::types::Token;
use crate::OrgIssuesError;

/// Maximum number of characters kept from a response body in errors and
/// transcripts.
pub(super) const BODY_SNIPPET_LEN: usize = 500;
/// Maximum number of characters kept from a redacted request payload.
pub(super) const REQUEST_SNIPPET_LEN: usize = 1024;
/// Maximum number of characters kept from a single JSON value.
pub(super) const VALUE_SNIPPET_LEN: usize = 200;

const SENSITIVE_KEYS: &[&str] = &[
    "token",
    "authorization",
    "password",
    "secret",
    "access_token",
    "refresh_token",
    "api_key",
    "apikey",
    "bearer",
    "auth",
    "credentials",
    "credential",
    "private_key",
];

/// Trim `text` to `max` characters, appending `...` when truncated.
pub(super) fn snippet(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out = text.chars().take(max).collect::<String>();
        out.push_str("...");
        out
    }
}

fn redact_sensitive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                if SENSITIVE_KEYS.contains(&k.to_ascii_lowercase().as_str()) {
                    *v = Value::String("<redacted>".into());
                } else {
                    redact_sensitive(v);
                }
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(redact_sensitive),
        _ => {}
    }
}

/// Redacted copy of a request payload, suitable for logs and transcripts.
pub(super) fn redacted(payload: &Value) -> Value {
    let mut out = payload.clone();
    redact_sensitive(&mut out);
    out
}

/// Short, redacted rendering of a request payload for error context.
pub(super) fn payload_snippet(payload: &Value) -> String {
    match serde_json::to_string(&redacted(payload)) {
        Ok(json) => snippet(&json, REQUEST_SNIPPET_LEN),
        Err(e) => {
            warn!("failed to serialise redacted payload: {e}");
            "<failed to serialise payload>".into()
        }
    }
}

/// Extract the operation name from a GraphQL document.
pub(super) fn operation_name(query: &str) -> Option<&str> {
    let trimmed = query.trim_start();
    for prefix in ["query", "mutation", "subscription"] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            // "queryX" is not an operation keyword.
            let is_delim = matches!(rest.chars().next(), Some('{' | '(' | ' ' | '\n' | '\t' | '\r'));
            if !is_delim {
                continue;
            }
            let name = rest
                .trim_start()
                .split(|c: char| c.is_whitespace() || c == '(' || c == '{')
                .next()
                .filter(|s| !s.is_empty());
            if name.is_some() {
                return name;
            }
        }
    }
    None
}

/// Build the request headers, adding `Authorization` only for a non-empty
/// token.
pub(super) fn build_headers(token: &Token) -> Result<HeaderMap, OrgIssuesError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("orgissues"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    if !token.is_empty() {
        let mut value: HeaderValue = format!("bearer {}", token.as_str()).parse().map_err(
            |e: reqwest::header::InvalidHeaderValue| OrgIssuesError::RequestContext {
                context: "parse Authorization header".into(),
                source: Box::new(e),
            },
        )?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}
