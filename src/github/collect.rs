use crate::config::Repository;
use crate::github::issues::{GitHubIssue, IssueSource};
use crate::github::users::{self, UserLookup};
use anyhow::Result;
use std::collections::HashMap;
use std::num::NonZeroUsize;

/// Fetches every page of issues labelled `label`, resolving assignee names page by page.
///
/// Pages are requested sequentially starting at 1 until an empty page comes back.
/// Names resolved on earlier pages are reused, so each handle is looked up once per run.
pub async fn collect_all_issues<S, L>(
    source: &S,
    lookup: &L,
    repository: &Repository,
    label: &str,
    concurrency: Option<NonZeroUsize>,
) -> Result<Vec<GitHubIssue>>
where
    S: IssueSource,
    L: UserLookup,
{
    let mut all_issues = Vec::new();
    let mut names: HashMap<String, Option<String>> = HashMap::new();
    let mut page = 1;

    loop {
        let issues = source.fetch_issues_page(repository, label, page).await?;

        if issues.is_empty() {
            break;
        }

        let unresolved: Vec<String> = issues
            .iter()
            .flat_map(|issue| issue.assignees.iter())
            .filter(|login| !names.contains_key(*login))
            .cloned()
            .collect();
        names.extend(users::resolve_names(lookup, &unresolved, concurrency).await?);

        tracing::info!(page, issues = issues.len(), "fetched issue page");
        all_issues.extend(
            issues
                .into_iter()
                .map(|issue| issue.with_display_names(&names)),
        );
        page += 1;
    }

    Ok(all_issues)
}
