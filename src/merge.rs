//! Merging fetched issue pages into the accumulated state.
//!
//! An [`FetchKind::Initial`] page replaces whatever was accumulated. A
//! [`FetchKind::Continuation`] page is appended: the issue edges seen so far
//! stay in front, the new edges follow in fetch order, and every other field
//! (names, URLs, `totalCount`, `pageInfo`, `errors`) comes from the latest
//! page. Appending is not idempotent; applying the same page twice repeats
//! its edges.

use std::fmt;

use crate::OrgIssuesError;
use crate::issues::IssuePage;
use crate::models::{GraphQLError, IssueConnection, IssueEdge, Organization, Repository};

/// Whether a fetch starts a new accumulation or continues the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    /// Continue after the given `endCursor`.
    Continuation(String),
}

impl FetchKind {
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        match self {
            Self::Initial => None,
            Self::Continuation(cursor) => Some(cursor),
        }
    }
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::Continuation(cursor) => write!(f, "continuation after {cursor}"),
        }
    }
}

/// Everything fetched so far for the current search path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccumulatedState {
    pub organization: Option<Organization>,
    pub errors: Option<Vec<GraphQLError>>,
}

impl AccumulatedState {
    #[must_use]
    pub fn repository(&self) -> Option<&Repository> {
        self.organization.as_ref()?.repository.as_ref()
    }

    #[must_use]
    pub fn issues(&self) -> Option<&IssueConnection> {
        self.repository().map(|r| &r.issues)
    }

    /// Accumulated issue edges, oldest first.
    #[must_use]
    pub fn edges(&self) -> &[IssueEdge] {
        match self.issues() {
            Some(issues) => &issues.edges,
            None => &[],
        }
    }

    /// Cursor to pass for "load more", or `None` when on the last page.
    ///
    /// # Errors
    ///
    /// Returns [`OrgIssuesError::BadResponse`] when the latest page claims a
    /// next page without an `endCursor`.
    pub fn next_cursor(&self) -> Result<Option<&str>, OrgIssuesError> {
        match self.issues() {
            Some(issues) => issues.page_info.next_cursor(),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.issues().is_some_and(|i| i.page_info.has_next_page)
    }

    /// GraphQL error messages joined by a single space.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.errors.as_ref().map(|errors| {
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

impl From<IssuePage> for AccumulatedState {
    fn from(page: IssuePage) -> Self {
        Self {
            organization: page.organization,
            errors: page.errors,
        }
    }
}

/// Start a fresh accumulation from `latest`, discarding anything earlier.
#[must_use]
pub fn replace(latest: IssuePage) -> AccumulatedState {
    latest.into()
}

/// Append the edges of `latest` after those already in `previous`.
///
/// When `latest` has no repository (for example GitHub returned only
/// errors), the previous organization is kept and only `errors` changes.
#[must_use]
pub fn append(previous: AccumulatedState, latest: IssuePage) -> AccumulatedState {
    let IssuePage {
        organization,
        errors,
    } = latest;
    let Some(mut organization) = organization.filter(|o| o.repository.is_some()) else {
        return AccumulatedState {
            organization: previous.organization,
            errors,
        };
    };
    if let Some(repository) = organization.repository.as_mut() {
        let mut edges = previous
            .organization
            .and_then(|o| o.repository)
            .map(|r| r.issues.edges)
            .unwrap_or_default();
        edges.append(&mut repository.issues.edges);
        repository.issues.edges = edges;
    }
    AccumulatedState {
        organization: Some(organization),
        errors,
    }
}

/// Combine `latest` with `previous` according to `kind`.
#[must_use]
pub fn merge(latest: IssuePage, kind: &FetchKind, previous: AccumulatedState) -> AccumulatedState {
    match kind {
        FetchKind::Initial => replace(latest),
        FetchKind::Continuation(_) => append(previous, latest),
    }
}
