//! State container for the accumulated issues of one search path.
//!
//! Fetches are requested through [`IssueStore::search`] and
//! [`IssueStore::request_more`], and their results land through
//! [`IssueStore::complete`]. Every fetch is stamped with a [`Ticket`]; when
//! the response arrives, a ticket older than the most recently issued one is
//! stale and its page is dropped, so an early request that resolves late
//! cannot overwrite a newer result.
//!
//! The current path changes only when the first page of a new search
//! arrives, so the stored path always names the repository whose issues
//! are held.

use log::{debug, warn};

use crate::issues::IssuePage;
use crate::merge::{AccumulatedState, FetchKind, merge};
use crate::{OrgIssuesError, SearchPath};

/// Identifies one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    path: SearchPath,
    kind: FetchKind,
}

impl Ticket {
    #[must_use]
    pub fn path(&self) -> &SearchPath {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> &FetchKind {
        &self.kind
    }
}

/// What [`IssueStore::complete`] did with a response.
#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    /// The page was merged into the state.
    Merged,
    /// A newer request was issued after this one; the page was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct IssueStore {
    path: SearchPath,
    state: AccumulatedState,
    issued: u64,
}

impl IssueStore {
    #[must_use]
    pub fn new(path: SearchPath) -> Self {
        Self {
            path,
            state: AccumulatedState::default(),
            issued: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &AccumulatedState {
        &self.state
    }

    #[must_use]
    pub fn path(&self) -> &SearchPath {
        &self.path
    }

    /// Ticket for the first page of `path`.
    ///
    /// The path and the accumulated state are replaced only when that page
    /// arrives; a failed search leaves both as they were.
    pub fn search(&mut self, path: SearchPath) -> Ticket {
        self.begin(path, FetchKind::Initial)
    }

    /// Ticket for the page after the last one received.
    ///
    /// # Errors
    ///
    /// Returns [`OrgIssuesError::NoMorePages`] when the latest page reports
    /// no next page, or [`OrgIssuesError::BadResponse`] when it reports one
    /// without a cursor.
    pub fn request_more(&mut self) -> Result<Ticket, OrgIssuesError> {
        let cursor = self
            .state
            .next_cursor()?
            .ok_or(OrgIssuesError::NoMorePages)?
            .to_string();
        let path = self.path.clone();
        Ok(self.begin(path, FetchKind::Continuation(cursor)))
    }

    pub(crate) fn begin(&mut self, path: SearchPath, kind: FetchKind) -> Ticket {
        self.issued += 1;
        Ticket {
            seq: self.issued,
            path,
            kind,
        }
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Hands back the fetch error unchanged after leaving the state as it
    /// was; accumulated edges survive a failed continuation.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        outcome: Result<IssuePage, OrgIssuesError>,
    ) -> Result<Applied, OrgIssuesError> {
        if ticket.seq != self.issued {
            debug!(
                "dropping stale response #{} ({}); latest is #{}",
                ticket.seq, ticket.kind, self.issued
            );
            return Ok(Applied::Stale);
        }
        match outcome {
            Ok(page) => {
                if ticket.kind == FetchKind::Initial {
                    self.path = ticket.path.clone();
                }
                let previous = std::mem::take(&mut self.state);
                self.state = merge(page, &ticket.kind, previous);
                debug!(
                    "merged {} page of {}: {} issue(s) accumulated",
                    ticket.kind,
                    ticket.path,
                    self.state.edges().len()
                );
                Ok(Applied::Merged)
            }
            Err(e) => {
                warn!("{} fetch of {} failed: {e}", ticket.kind, ticket.path);
                Err(e)
            }
        }
    }
}
