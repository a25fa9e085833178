//! Data structures for GraphQL responses.

use serde::{Deserialize, Serialize};

use crate::OrgIssuesError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct OrganizationData {
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Organization {
    // Organizations without a display name return null.
    pub name: Option<String>,
    pub url: String,
    pub repository: Option<Repository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Repository {
    pub name: String,
    pub url: String,
    pub issues: IssueConnection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct IssueConnection {
    pub edges: Vec<IssueEdge>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct IssueEdge {
    pub node: Issue,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub url: String,
    pub reactions: ReactionConnection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ReactionConnection {
    pub edges: Vec<ReactionEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ReactionEdge {
    pub node: Reaction,
}

/// A single reaction; `content` holds the `ReactionContent` enum name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Reaction {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct PageInfo {
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

impl PageInfo {
    /// Cursor for the following page, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`OrgIssuesError::BadResponse`] when the server reports another
    /// page but omits the cursor needed to request it.
    pub fn next_cursor(&self) -> Result<Option<&str>, OrgIssuesError> {
        match (self.has_next_page, self.end_cursor.as_deref()) {
            (false, _) => Ok(None),
            (true, Some(cursor)) => Ok(Some(cursor)),
            (true, None) => Err(OrgIssuesError::BadResponse(
                "hasNextPage=true but endCursor missing".into(),
            )),
        }
    }
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphQLError {
    pub message: String,
}

impl From<&str> for GraphQLError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(false, None, None)]
    #[case(false, Some("c".to_string()), None)]
    #[case(true, Some("c".to_string()), Some("c"))]
    fn next_cursor_ok_cases(
        #[case] has_next_page: bool,
        #[case] end_cursor: Option<String>,
        #[case] expected: Option<&str>,
    ) {
        let info = PageInfo {
            end_cursor,
            has_next_page,
        };
        assert_eq!(info.next_cursor().expect("cursor"), expected);
    }

    #[test]
    fn next_cursor_errors_without_cursor() {
        let info = PageInfo {
            end_cursor: None,
            has_next_page: true,
        };
        let err = info.next_cursor().expect_err("missing cursor");
        assert!(matches!(err, OrgIssuesError::BadResponse(_)));
    }

    #[test]
    fn organization_deserialises_from_github_shape() {
        let value = json!({
            "organization": {
                "name": null,
                "url": "https://github.com/facebook",
                "repository": {
                    "name": "react",
                    "url": "https://github.com/facebook/react",
                    "issues": {
                        "edges": [{
                            "node": {
                                "id": "I_1",
                                "title": "Bug",
                                "url": "https://github.com/facebook/react/issues/1",
                                "reactions": { "edges": [
                                    { "node": { "id": "R_1", "content": "HEART" } }
                                ] }
                            }
                        }],
                        "totalCount": 42,
                        "pageInfo": { "endCursor": "abc", "hasNextPage": true }
                    }
                }
            }
        });
        let data: OrganizationData = serde_json::from_value(value).expect("deserialise");
        let org = data.organization.expect("organization");
        assert_eq!(org.name, None);
        let repo = org.repository.expect("repository");
        assert_eq!(repo.issues.total_count, 42);
        assert_eq!(repo.issues.edges.len(), 1);
        assert_eq!(
            repo.issues
                .edges
                .first()
                .and_then(|e| e.node.reactions.edges.first())
                .map(|r| r.node.content.as_str()),
            Some("HEART")
        );
    }
}
