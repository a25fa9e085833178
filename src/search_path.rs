//! Parsing of `<org>/<repo>` search paths.
//!
//! The path is split without validation: a malformed path still produces
//! variables, and GitHub reports the problem as a GraphQL error which is then
//! rendered like any other.

use std::fmt;

use url::Url;

/// Path used when none is supplied on the command line or in configuration.
pub const DEFAULT_SEARCH_PATH: &str = "facebook/create-react-app";

/// An organization and repository pair as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    raw: String,
    organization: String,
    repository: String,
}

impl SearchPath {
    /// Split `input` into organization and repository.
    ///
    /// Full GitHub URLs such as `https://github.com/facebook/react/issues`
    /// are reduced to their first two path segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use orgissues::SearchPath;
    ///
    /// let path = SearchPath::parse("facebook/react");
    /// assert_eq!(path.organization(), "facebook");
    /// assert_eq!(path.repository(), "react");
    ///
    /// let bare = SearchPath::parse("facebook");
    /// assert_eq!(bare.repository(), "");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let raw = github_url_path(trimmed).unwrap_or_else(|| trimmed.to_string());
        let mut parts = raw.split('/');
        let organization = parts.next().unwrap_or_default().to_string();
        let repository = parts.next().unwrap_or_default().to_string();
        Self {
            raw,
            organization,
            repository,
        }
    }

    #[must_use]
    pub fn organization(&self) -> &str {
        &self.organization
    }

    #[must_use]
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The path as entered, after URL reduction.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::parse(DEFAULT_SEARCH_PATH)
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for SearchPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

fn github_url_path(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    if url.host_str() != Some("github.com") {
        return None;
    }
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let org = segments.first()?;
    let repo = segments.get(1).map_or("", |r| r.strip_suffix(".git").unwrap_or(r));
    Some(format!("{org}/{repo}"))
}
