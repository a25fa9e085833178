//! Error type shared across the crate.

use thiserror::Error;

/// Errors returned by library functions.
///
/// GraphQL-level errors are not represented here: the API reports them next
/// to (possibly partial) data, and they are carried into the accumulated
/// state for rendering instead.
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions, reason = "exported for tests")]
pub enum OrgIssuesError {
    #[error("request failed when running {context}: {source}")]
    RequestContext {
        context: Box<str>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("bad response: {0}")]
    BadResponse(Box<str>),
    #[error("malformed response (status {status}): {message} | snippet: {snippet}")]
    BadResponseSerde {
        status: u16,
        message: Box<str>,
        snippet: Box<str>,
    },
    #[error("empty response for {operation} (status {status}) | snippet: {snippet}")]
    EmptyResponse {
        status: u16,
        operation: Box<str>,
        snippet: Box<str>,
    },
    #[error("no more issues to load")]
    NoMorePages,
    #[error("io error: {0}")]
    Io(#[from] Box<std::io::Error>),
    #[error("configuration error: {0}")]
    Config(#[from] Box<ortho_config::OrthoError>),
}

impl From<std::io::Error> for OrgIssuesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Box::new(err))
    }
}

impl From<ortho_config::OrthoError> for OrgIssuesError {
    fn from(err: ortho_config::OrthoError) -> Self {
        Self::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::OrgIssuesError;

    #[test]
    fn io_errors_convert_through_question_mark() {
        fn fail() -> Result<(), OrgIssuesError> {
            Err(std::io::Error::other("disk gone"))?;
            Ok(())
        }
        let err = fail().expect_err("io error");
        assert_eq!(err.to_string(), "io error: disk gone");
    }

    #[test]
    fn serde_errors_report_status_and_snippet() {
        let err = OrgIssuesError::BadResponseSerde {
            status: 200,
            message: "missing field `edges`".into(),
            snippet: "{}".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("status 200"), "{msg}");
        assert!(msg.contains("snippet: {}"), "{msg}");
    }
}
