//! Rendering of the accumulated state to a terminal.
//!
//! Rendering is a pure projection of [`AccumulatedState`]: nothing here
//! mutates state, and issues and reactions are emitted in accumulated order.
//! Issue titles go through `termimad` so inline markdown (code spans,
//! emphasis) renders as it does on GitHub.

use std::io::{IsTerminal, Write};

use termimad::MadSkin;

use crate::banners::{MORE_MARKER, NO_DATA_MESSAGE, RULE, SEARCH_PREFIX, TITLE_BANNER};
use crate::environment;
use crate::merge::AccumulatedState;
use crate::models::{Issue, Organization, Repository};
use crate::SearchPath;

/// Emoji for a GitHub `ReactionContent` value, or the raw value when unknown.
#[must_use]
pub fn reaction_symbol(content: &str) -> &str {
    match content {
        "THUMBS_UP" => "👍",
        "THUMBS_DOWN" => "👎",
        "LAUGH" => "😄",
        "HOORAY" => "🎉",
        "CONFUSED" => "😕",
        "HEART" => "❤️",
        "ROCKET" => "🚀",
        "EYES" => "👀",
        other => other,
    }
}

/// Writes issue listings with or without terminal styling.
pub struct Printer {
    skin: MadSkin,
    color: bool,
}

impl Printer {
    #[must_use]
    pub fn new(color: bool) -> Self {
        let skin = if color {
            MadSkin::default()
        } else {
            MadSkin::no_style()
        };
        Self { skin, color }
    }

    /// Style output only when stdout is a terminal and `NO_COLOR` is unset.
    #[must_use]
    pub fn detect() -> Self {
        let no_color = environment::var("NO_COLOR").is_ok_and(|v| !v.is_empty());
        Self::new(std::io::stdout().is_terminal() && !no_color)
    }

    fn label<W: Write>(&self, out: &mut W, label: &str) -> std::io::Result<()> {
        if self.color {
            write!(out, "\x1b[1m{label}\x1b[0m ")
        } else {
            write!(out, "{label} ")
        }
    }

    /// Write the title and the line naming the search path.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_header<W: Write>(&self, mut out: W, path: &SearchPath) -> std::io::Result<()> {
        writeln!(out, "{TITLE_BANNER}")?;
        writeln!(out, "{SEARCH_PREFIX}{path}")?;
        writeln!(out, "{RULE}")
    }

    /// Write the body for `state`: the issue list, the GraphQL error line, or
    /// the placeholder shown before any data has arrived.
    ///
    /// A GraphQL error line comes first. Issues already accumulated for a
    /// repository are still listed beneath it; without a repository the
    /// error line is the whole body.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_state<W: Write>(&self, mut out: W, state: &AccumulatedState) -> anyhow::Result<()> {
        if let Some(message) = state.error_message() {
            self.label(&mut out, "Something went wrong:")?;
            writeln!(out, "{message}")?;
            if state.repository().is_none() {
                return Ok(());
            }
        }
        let Some(organization) = &state.organization else {
            writeln!(out, "{NO_DATA_MESSAGE}")?;
            return Ok(());
        };
        self.write_organization(&mut out, organization)?;
        match &organization.repository {
            Some(repository) => self.write_repository(&mut out, repository)?,
            None => writeln!(out, "{NO_DATA_MESSAGE}")?,
        }
        Ok(())
    }

    fn write_organization<W: Write>(
        &self,
        out: &mut W,
        organization: &Organization,
    ) -> std::io::Result<()> {
        self.label(out, "Issues from Organization:")?;
        let name = organization.name.as_deref().unwrap_or(&organization.url);
        writeln!(out, "{name} ({})", organization.url)
    }

    fn write_repository<W: Write>(&self, out: &mut W, repository: &Repository) -> anyhow::Result<()> {
        self.label(out, "In Repository:")?;
        writeln!(out, "{} ({})", repository.name, repository.url)?;
        for edge in &repository.issues.edges {
            self.write_issue(out, &edge.node)?;
        }
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "Showing {} of {} open issues",
            repository.issues.edges.len(),
            repository.issues.total_count
        )?;
        if repository.issues.page_info.has_next_page {
            writeln!(out, "{MORE_MARKER}")?;
        }
        Ok(())
    }

    fn write_issue<W: Write>(&self, out: &mut W, issue: &Issue) -> std::io::Result<()> {
        writeln!(out, " - {} ({})", self.skin.inline(&issue.title), issue.url)?;
        let reactions: Vec<&str> = issue
            .reactions
            .edges
            .iter()
            .map(|r| reaction_symbol(&r.node.content))
            .collect();
        if !reactions.is_empty() {
            writeln!(out, "     {}", reactions.join(" "))?;
        }
        Ok(())
    }
}
