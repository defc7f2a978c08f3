use crate::config::Repository;
use crate::github::issues::{GitHubIssue, IssueSource, SearchIssuesResponse};
use crate::github::users::{UserLookup, UserResponse};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// GitHub API endpoints, relative to the API base URL
mod endpoints {
    pub const SEARCH_ISSUES: &str = "/search/issues";
    pub const USERS: &str = "/users";
}

/// Fixed page size for issue search.
pub const PER_PAGE: u32 = 100;

const USER_AGENT: &str = "changelog-generator";

pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

/// Builds the search query selecting issues of `repository` carrying exactly `label`.
pub fn search_query(repository: &Repository, label: &str) -> String {
    format!("repo:{repository} label:\"{label}\"")
}

impl GitHubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(GitHubClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .http
            .get(format!("{}{path}", self.api_url))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(anyhow::anyhow!("Token invalid or expired: HTTP {status}"));
        }
        if !status.is_success() {
            return Err(anyhow::anyhow!("API request error: {status}"));
        }

        Ok(response.json::<T>().await?)
    }
}

impl IssueSource for GitHubClient {
    async fn fetch_issues_page(
        &self,
        repository: &Repository,
        label: &str,
        page: u32,
    ) -> Result<Vec<GitHubIssue>> {
        let response: SearchIssuesResponse = self
            .get_json(
                endpoints::SEARCH_ISSUES,
                &[
                    ("q", search_query(repository, label)),
                    ("page", page.to_string()),
                    ("per_page", PER_PAGE.to_string()),
                ],
            )
            .await
            .with_context(|| format!("Failed to fetch page {page} of issues labelled '{label}'"))?;

        Ok(response.into_issues())
    }
}

impl UserLookup for GitHubClient {
    async fn fetch_user(&self, login: &str) -> Result<UserResponse> {
        self.get_json(&format!("{}/{login}", endpoints::USERS), &[])
            .await
            .with_context(|| format!("Failed to look up user '{login}'"))
    }
}
