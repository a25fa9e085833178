//! GraphQL client implementation.

mod helpers;
mod http;
mod transcript;
mod types;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

use crate::OrgIssuesError;
use crate::environment;

use self::helpers::{BODY_SNIPPET_LEN, VALUE_SNIPPET_LEN, build_headers, operation_name, snippet};
use self::http::HttpResponse;

pub use self::types::{Endpoint, GraphQLResponse, Query, Token};

/// Client for the GitHub GraphQL API.
///
/// Requests are sent once: there is no retry, and no timeout unless one is
/// set with [`GraphQLClient::with_timeout`].
pub struct GraphQLClient {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoint: Endpoint,
    timeout: Option<Duration>,
    transcript: Option<std::sync::Mutex<std::io::BufWriter<std::fs::File>>>,
}

impl GraphQLClient {
    /// Create a client for the endpoint named by `GITHUB_GRAPHQL_URL`, or
    /// GitHub's public endpoint when unset.
    ///
    /// # Errors
    ///
    /// Returns an [`OrgIssuesError`] if the transcript file cannot be created
    /// or the token is not a valid header value.
    pub fn new(
        token: impl Into<Token>,
        transcript: Option<std::path::PathBuf>,
    ) -> Result<Self, OrgIssuesError> {
        let endpoint = environment::var("GITHUB_GRAPHQL_URL")
            .map(Endpoint::new)
            .unwrap_or_default();
        Self::with_endpoint(token, endpoint, transcript)
    }

    /// Create a client targeting a specific endpoint.
    ///
    /// # Errors
    ///
    /// Returns an [`OrgIssuesError`] if the transcript file cannot be created
    /// or the token is not a valid header value.
    pub fn with_endpoint(
        token: impl Into<Token>,
        endpoint: impl Into<Endpoint>,
        transcript: Option<std::path::PathBuf>,
    ) -> Result<Self, OrgIssuesError> {
        let token = token.into();
        let transcript = transcript
            .map(|p| {
                std::fs::File::create(p)
                    .map(|file| std::sync::Mutex::new(std::io::BufWriter::new(file)))
            })
            .transpose()?;
        let headers = build_headers(&token)?;
        Ok(Self {
            client: reqwest::Client::new(),
            headers,
            endpoint: endpoint.into(),
            timeout: None,
            transcript,
        })
    }

    /// Apply a per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Split a response body into its `data` and `errors` parts.
    ///
    /// # Errors
    ///
    /// Returns [`OrgIssuesError::BadResponseSerde`] when the body is not JSON
    /// or `data` does not match `T`, and [`OrgIssuesError::EmptyResponse`] when
    /// the body carries neither `data` nor `errors`.
    fn process_graphql_response<T>(
        resp: &HttpResponse,
        operation: &str,
    ) -> Result<GraphQLResponse<T>, OrgIssuesError>
    where
        T: DeserializeOwned,
    {
        let body = &resp.body;
        let status = resp.status;
        let raw: GraphQLResponse<Value> =
            serde_json::from_str(body).map_err(|e| OrgIssuesError::BadResponseSerde {
                status,
                message: e.to_string().into(),
                snippet: snippet(body, BODY_SNIPPET_LEN).into(),
            })?;
        let GraphQLResponse { data, errors } = raw;
        let data = match data {
            Some(value) => Some(deserialize_data::<T>(value, status)?),
            None if errors.is_none() => {
                return Err(OrgIssuesError::EmptyResponse {
                    status,
                    operation: operation.into(),
                    snippet: snippet(body, BODY_SNIPPET_LEN).into(),
                });
            }
            None => None,
        };
        Ok(GraphQLResponse { data, errors })
    }

    /// Execute `query` once and return the full GraphQL envelope.
    ///
    /// GraphQL errors are returned in [`GraphQLResponse::errors`], not as
    /// `Err`, so partial data reaches the caller.
    ///
    /// # Errors
    ///
    /// Returns an [`OrgIssuesError`] if the request fails, the status is not
    /// 2xx or the body cannot be deserialized.
    pub async fn fetch_envelope<V, T>(
        &self,
        query: impl Into<Query>,
        variables: V,
    ) -> Result<GraphQLResponse<T>, OrgIssuesError>
    where
        V: serde::Serialize,
        T: DeserializeOwned,
    {
        let query = query.into();
        let op_name = operation_name(query.as_ref());
        let operation = op_name.map_or_else(|| snippet(query.as_ref(), 64), str::to_string);
        let mut payload = json!({ "query": query.as_ref(), "variables": &variables });
        if let (Some(name), Some(obj)) = (op_name, payload.as_object_mut()) {
            obj.insert("operationName".into(), json!(name));
        }
        debug!("POST {} operation={operation}", self.endpoint.as_str());
        let resp = self.execute_single_request(&payload, &operation).await?;
        let envelope = Self::process_graphql_response::<T>(&resp, &operation)?;
        if let Some(errors) = &envelope.errors {
            debug!("operation {operation} returned {} GraphQL error(s)", errors.len());
        }
        Ok(envelope)
    }
}

fn deserialize_data<T: DeserializeOwned>(value: Value, status: u16) -> Result<T, OrgIssuesError> {
    serde_path_to_error::deserialize::<_, T>(&value).map_err(|e| {
        let snip = match serde_json::to_string_pretty(&value) {
            Ok(json) => snippet(&json, VALUE_SNIPPET_LEN),
            Err(err) => {
                warn!("failed to serialise error snippet: {err}");
                "<failed to serialise error snippet>".to_string()
            }
        };
        let path = e.path().to_string();
        let inner = e.into_inner();
        OrgIssuesError::BadResponseSerde {
            status,
            message: format!("{inner} at {path}").into(),
            snippet: snip.into(),
        }
    })
}
