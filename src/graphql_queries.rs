//! GraphQL documents and their variables.

use serde::Serialize;

use crate::SearchPath;

/// Number of issues requested per page.
pub const ISSUES_PAGE_SIZE: usize = 5;

/// Number of trailing reactions fetched for each issue.
pub const REACTIONS_PER_ISSUE: usize = 3;

/// Open issues of a repository, five per page, with their last reactions.
pub const ISSUES_QUERY: &str = r"
    query IssuesOfRepository(
      $organization: String!,
      $repository: String!,
      $cursor: String
    ) {
      organization(login: $organization) {
        name
        url
        repository(name: $repository) {
          name
          url
          issues(first: 5, after: $cursor, states: [OPEN]) {
            edges {
              node {
                id
                title
                url
                reactions(last: 3) {
                  edges {
                    node {
                      id
                      content
                    }
                  }
                }
              }
            }
            totalCount
            pageInfo {
              endCursor
              hasNextPage
            }
          }
        }
      }
    }
";

/// Variables for [`ISSUES_QUERY`].
///
/// `cursor` is left out of the payload on the first page so the server
/// starts from the beginning of the connection.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IssuesVariables<'a> {
    pub organization: &'a str,
    pub repository: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

impl<'a> IssuesVariables<'a> {
    #[must_use]
    pub fn new(path: &'a SearchPath, cursor: Option<&'a str>) -> Self {
        Self {
            organization: path.organization(),
            repository: path.repository(),
            cursor,
        }
    }
}
