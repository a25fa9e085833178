//! Drivers that connect user intents to fetches and rendering.
//!
//! [`Session`] runs the interactive loop used by `browse`; [`load_pages`] is
//! the non-interactive equivalent behind `list`. Both await each fetch before
//! acting on the next intent, so at most one request is in flight.

use std::io::{BufRead, Write};

use log::error;

use crate::banners::BROWSE_PROMPT;
use crate::issues::IssueSource;
use crate::printer::Printer;
use crate::store::{IssueStore, Ticket};
use crate::{OrgIssuesError, SearchPath};

/// A line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Load the next page for the current path.
    More,
    /// Replace the current path and start over.
    Search(SearchPath),
    Quit,
}

impl Intent {
    /// Interpret one input line.
    ///
    /// ```
    /// use orgissues::session::Intent;
    ///
    /// assert_eq!(Intent::parse(""), Intent::More);
    /// assert_eq!(Intent::parse("q"), Intent::Quit);
    /// assert!(matches!(Intent::parse("facebook/react"), Intent::Search(_)));
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" | "m" | "more" => Self::More,
            "q" | "quit" | "exit" => Self::Quit,
            path => Self::Search(SearchPath::parse(path)),
        }
    }
}

async fn fetch<S: IssueSource>(
    source: &S,
    store: &mut IssueStore,
    ticket: Ticket,
) -> Result<(), OrgIssuesError> {
    let outcome = source.fetch_page(ticket.path(), ticket.kind()).await;
    store.complete(&ticket, outcome).map(|_| ())
}

/// Fetch the first page of `path` and up to `pages - 1` further pages.
///
/// Stops early when the repository has no more pages. A GraphQL error on
/// any page is kept in the state and ends the run, since its cursor is gone.
///
/// # Errors
///
/// Returns the first transport error; the store keeps what was merged
/// before it.
pub async fn load_pages<S: IssueSource>(
    source: &S,
    store: &mut IssueStore,
    path: SearchPath,
    pages: u32,
) -> Result<(), OrgIssuesError> {
    let ticket = store.search(path);
    fetch(source, store, ticket).await?;
    for _ in 1..pages {
        if store.state().errors.is_some() {
            break;
        }
        let ticket = match store.request_more() {
            Ok(ticket) => ticket,
            Err(OrgIssuesError::NoMorePages) => break,
            Err(e) => return Err(e),
        };
        fetch(source, store, ticket).await?;
    }
    Ok(())
}

/// Interactive browsing over an [`IssueSource`].
pub struct Session<'a, S> {
    source: &'a S,
    printer: &'a Printer,
    store: IssueStore,
}

impl<'a, S: IssueSource> Session<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, printer: &'a Printer) -> Self {
        Self {
            source,
            printer,
            store: IssueStore::default(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &IssueStore {
        &self.store
    }

    fn render<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        self.printer.write_header(&mut *out, self.store.path())?;
        self.printer.write_state(&mut *out, self.store.state())?;
        Ok(())
    }

    fn report<W: Write>(out: &mut W, err: &OrgIssuesError) -> std::io::Result<()> {
        match err {
            OrgIssuesError::NoMorePages => writeln!(out, "No more issues to load."),
            other => {
                error!("fetch failed: {other}");
                writeln!(out, "Request failed: {other}")
            }
        }
    }

    /// Act on one intent and render the result.
    ///
    /// Returns `false` when the session should end. Fetch failures are
    /// reported to `out` and leave the accumulated issues in place.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` fails.
    pub async fn handle<W: Write>(&mut self, intent: Intent, out: &mut W) -> anyhow::Result<bool> {
        let ticket = match intent {
            Intent::Quit => return Ok(false),
            Intent::Search(path) => Ok(self.store.search(path)),
            Intent::More => self.store.request_more(),
        };
        let result = match ticket {
            Ok(ticket) => fetch(self.source, &mut self.store, ticket).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => self.render(out)?,
            Err(e) => Self::report(out, &e)?,
        }
        Ok(true)
    }

    /// Show `path`, then read intents from `input` until quit or EOF.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        path: SearchPath,
        input: R,
        mut out: W,
    ) -> anyhow::Result<()> {
        self.handle(Intent::Search(path), &mut out).await?;
        let mut lines = input.lines();
        loop {
            write!(out, "{BROWSE_PROMPT}")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };
            if !self.handle(Intent::parse(&line), &mut out).await? {
                break;
            }
        }
        Ok(())
    }
}
