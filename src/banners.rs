//! Fixed strings framing the issue listing.

/// Title printed above every listing.
pub const TITLE_BANNER: &str = "Graphql Github Client App";

/// Prefix of the line naming the current search path.
pub const SEARCH_PREFIX: &str = "Show open issues for https://github.com/";

/// Horizontal rule separating the header, the issue list and the footer.
pub const RULE: &str = "----------------------------------------";

/// Body shown before the first page has arrived.
pub const NO_DATA_MESSAGE: &str = "No information yet ...";

/// Marker printed when another page can be loaded.
pub const MORE_MARKER: &str = "[More]";

/// Prompt shown by the interactive session.
pub const BROWSE_PROMPT: &str = "Enter: more | <org>/<repo>: search | q: quit > ";
