//! Browse the open issues of a GitHub repository through the GraphQL API.
//!
//! Issues are fetched five per page with their three most recent reactions.
//! Pages accumulate in an [`IssueStore`]: the first page for a path replaces
//! whatever was shown before, later pages append their issues while taking
//! every other field from the newest response.

pub mod api;
pub mod auth;
pub mod banners;
pub mod cli_args;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod graphql_queries;
pub mod issues;
pub mod merge;
pub mod models;
pub mod printer;
pub mod search_path;
pub mod session;
pub mod store;
pub mod test_utils;

pub use api::{Endpoint, GraphQLClient, GraphQLResponse, Query, Token};
pub use cli_args::{BrowseArgs, GlobalArgs, ListArgs};
pub use error::OrgIssuesError;
pub use issues::{IssuePage, IssueSource, fetch_issue_page};
pub use merge::{AccumulatedState, FetchKind, merge};
pub use models::{GraphQLError, Issue, IssueEdge, Organization, PageInfo, Repository};
pub use search_path::{DEFAULT_SEARCH_PATH, SearchPath};
pub use store::{IssueStore, Ticket};
