//! Fetching a single page of a repository's open issues.

use log::debug;

use crate::graphql_queries::{ISSUES_QUERY, IssuesVariables};
use crate::merge::FetchKind;
use crate::models::{GraphQLError, Organization, OrganizationData};
use crate::{GraphQLClient, OrgIssuesError, SearchPath};

/// One response of the issues query, as returned by GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssuePage {
    pub organization: Option<Organization>,
    pub errors: Option<Vec<GraphQLError>>,
}

/// Something that can produce issue pages.
///
/// [`GraphQLClient`] is the production source; the interactive session is
/// written against this trait so it can be driven without a network.
#[allow(async_fn_in_trait, reason = "only used with concrete, local types")]
pub trait IssueSource {
    /// Fetch the page selected by `kind` for `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrgIssuesError`] for transport-level failures. GraphQL
    /// errors are reported inside the page.
    async fn fetch_page(
        &self,
        path: &SearchPath,
        kind: &FetchKind,
    ) -> Result<IssuePage, OrgIssuesError>;
}

impl IssueSource for GraphQLClient {
    async fn fetch_page(
        &self,
        path: &SearchPath,
        kind: &FetchKind,
    ) -> Result<IssuePage, OrgIssuesError> {
        fetch_issue_page(self, path, kind).await
    }
}

/// Fetch one page of open issues for `path`.
///
/// # Errors
///
/// Returns an error if the request fails or the response is malformed.
pub async fn fetch_issue_page(
    client: &GraphQLClient,
    path: &SearchPath,
    kind: &FetchKind,
) -> Result<IssuePage, OrgIssuesError> {
    let variables = IssuesVariables::new(path, kind.cursor());
    debug!("fetching {kind} page of {path}");
    let envelope = client
        .fetch_envelope::<_, OrganizationData>(ISSUES_QUERY, variables)
        .await?;
    Ok(IssuePage {
        organization: envelope.data.and_then(|d| d.organization),
        errors: envelope.errors,
    })
}
