use anyhow::Result;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

/// Struct representing the GitHub `/users/{username}` API response.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    /// The login username of the user.
    pub login: String,
    /// The display name. `null` when the user never set one.
    #[serde(default)]
    pub name: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait UserLookup {
    async fn fetch_user(&self, login: &str) -> Result<UserResponse>;
}

/// Returns the distinct handles in first-seen order.
pub fn unique_handles(handles: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    handles
        .iter()
        .filter(|handle| seen.insert(handle.as_str()))
        .cloned()
        .collect()
}

/// Resolves each distinct handle to its display name with one lookup per handle.
///
/// Lookups run concurrently, at most `concurrency` at a time, or all at once when
/// no limit is given. A single failed lookup fails the whole batch.
pub async fn resolve_names<L>(
    lookup: &L,
    handles: &[String],
    concurrency: Option<NonZeroUsize>,
) -> Result<HashMap<String, Option<String>>>
where
    L: UserLookup,
{
    let unique = unique_handles(handles);
    if unique.is_empty() {
        return Ok(HashMap::new());
    }

    let limit = concurrency.map_or(unique.len(), NonZeroUsize::get);
    tracing::debug!(handles = unique.len(), limit, "resolving assignee names");

    let results = stream::iter(unique)
        .map(|login| async move {
            let user = lookup.fetch_user(&login).await?;
            Ok::<_, anyhow::Error>((login, user.name))
        })
        .buffer_unordered(limit)
        .collect::<Vec<_>>()
        .await;

    results.into_iter().collect()
}
