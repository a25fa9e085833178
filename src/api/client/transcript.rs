//! Transcript logging for GraphQL requests.
//!
//! Each exchange is written as one JSON line holding the operation name, the
//! HTTP status, the redacted request and a snippet of the response body.

use log::warn;
use serde_json::json;
use std::io::Write as _;

use super::GraphQLClient;
use super::helpers::{BODY_SNIPPET_LEN, redacted, snippet};
use super::http::HttpResponse;

impl GraphQLClient {
    pub(super) fn log_transcript(
        &self,
        payload: &serde_json::Value,
        operation: &str,
        resp: &HttpResponse,
    ) {
        let Some(t) = &self.transcript else {
            return;
        };
        let line = json!({
            "operation": operation,
            "status": resp.status,
            "request": redacted(payload),
            "response": snippet(&resp.body, BODY_SNIPPET_LEN),
        });
        let Ok(mut f) = t.lock() else {
            warn!("failed to lock transcript for op={operation}");
            return;
        };
        if let Err(e) = writeln!(f, "{line}") {
            warn!("failed to write transcript for op={operation}: {e}");
            return;
        }
        if let Err(e) = f.flush() {
            warn!("failed to flush transcript for op={operation}: {e}");
        }
    }
}
