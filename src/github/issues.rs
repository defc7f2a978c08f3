use crate::config::Repository;
use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Labels following this convention carry the changelog category of an issue.
pub const TYPE_LABEL_PREFIX: &str = "type: ";

#[derive(Debug, Clone, PartialEq)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    /// Login handles as fetched, display names once resolved.
    pub assignees: Vec<String>,
    pub link: String,
    pub issue_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GitHubIssue {
    /// Replaces assignee handles with their display names.
    ///
    /// Handles without a known name are kept as they are.
    pub fn with_display_names(self, names: &HashMap<String, Option<String>>) -> GitHubIssue {
        let assignees = self
            .assignees
            .into_iter()
            .map(|login| match names.get(&login) {
                Some(Some(name)) => name.clone(),
                _ => login,
            })
            .collect();

        GitHubIssue { assignees, ..self }
    }
}

/// One page of results from the issue search capability.
#[allow(async_fn_in_trait)]
pub trait IssueSource {
    /// Returns the issues of `repository` labelled `label` on the 1-based `page`.
    async fn fetch_issues_page(
        &self,
        repository: &Repository,
        label: &str,
        page: u32,
    ) -> Result<Vec<GitHubIssue>>;
}

/// Response from `GET /search/issues`
#[derive(Deserialize, Debug)]
#[allow(dead_code)]
pub struct SearchIssuesResponse {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<SearchIssueItem>,
}

#[derive(Deserialize, Debug)]
pub struct SearchIssueItem {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    #[serde(default)]
    pub assignees: Option<Vec<LoginRef>>,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<LabelRef>,
}

#[derive(Deserialize, Debug)]
pub struct LoginRef {
    pub login: String,
}

#[derive(Deserialize, Debug)]
pub struct LabelRef {
    pub name: String,
}

/// Returns the value of the first `type: <value>` label, in label order.
pub fn extract_issue_type(labels: &[LabelRef]) -> Option<String> {
    labels
        .iter()
        .find_map(|label| label.name.strip_prefix(TYPE_LABEL_PREFIX))
        .map(str::to_string)
}

impl From<SearchIssueItem> for GitHubIssue {
    fn from(item: SearchIssueItem) -> Self {
        let issue_type = extract_issue_type(&item.labels);
        GitHubIssue {
            number: item.number,
            title: item.title,
            state: item.state,
            assignees: item
                .assignees
                .unwrap_or_default()
                .into_iter()
                .map(|assignee| assignee.login)
                .collect(),
            link: item.html_url,
            issue_type,
        }
    }
}

impl SearchIssuesResponse {
    pub fn into_issues(self) -> Vec<GitHubIssue> {
        self.items.into_iter().map(GitHubIssue::from).collect()
    }
}
