//! Raw HTTP exchange used by the GraphQL client.

use super::GraphQLClient;
use super::helpers::{BODY_SNIPPET_LEN, payload_snippet, snippet};
use crate::OrgIssuesError;

#[derive(Debug)]
pub(super) struct HttpResponse {
    pub(super) status: u16,
    pub(super) body: String,
}

impl GraphQLClient {
    /// Post `payload` once and return the status and body.
    ///
    /// Non-2xx statuses become [`OrgIssuesError::RequestContext`] carrying a
    /// body snippet; the exchange is still written to the transcript.
    pub(super) async fn execute_single_request(
        &self,
        payload: &serde_json::Value,
        operation: &str,
    ) -> Result<HttpResponse, OrgIssuesError> {
        let snip = payload_snippet(payload);
        let make_ctx = |status: Option<u16>| -> Box<str> {
            let base = format!("operation {operation}; {snip}");
            match status {
                Some(s) => format!("{base}; status {s}"),
                None => base,
            }
            .into()
        };

        let mut request = self
            .client
            .post(self.endpoint.as_str())
            .headers(self.headers.clone())
            .json(payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| OrgIssuesError::RequestContext {
                context: make_ctx(None),
                source: Box::new(e),
            })?;
        let status = response.status().as_u16();
        let status_err = response.error_for_status_ref().err();
        let body = response
            .text()
            .await
            .map_err(|e| OrgIssuesError::RequestContext {
                context: make_ctx(Some(status)),
                source: Box::new(e),
            })?;
        let resp = HttpResponse { status, body };
        self.log_transcript(payload, operation, &resp);
        if !(200..300).contains(&status) {
            let source: Box<dyn std::error::Error + Send + Sync> = match status_err {
                Some(e) => Box::new(e),
                None => Box::new(std::io::Error::other(format!(
                    "unexpected status {status} without reqwest error"
                ))),
            };
            return Err(OrgIssuesError::RequestContext {
                context: format!(
                    "HTTP status {status} | body snippet: {}",
                    snippet(&resp.body, BODY_SNIPPET_LEN)
                )
                .into(),
                source,
            });
        }
        Ok(resp)
    }
}
