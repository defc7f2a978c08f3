use crate::github::issues::GitHubIssue;

/// Shown in place of the type of an issue without a `type: ` label.
pub const MISSING_TYPE: &str = "none";

/// Formats issues that need attention before publishing.
///
/// Returns `None` for an empty list so no warning gets emitted at all.
pub fn format_warnings(issues: &[&GitHubIssue]) -> Option<String> {
    if issues.is_empty() {
        return None;
    }

    let mut text = String::from("\n");
    for issue in issues {
        text.push_str(&format!(
            "- #{} - {}\n  {}\n  Type: {}\n  State: {}\n\n",
            issue.number,
            issue.title,
            issue.link,
            issue.issue_type.as_deref().unwrap_or(MISSING_TYPE),
            issue.state
        ));
    }
    Some(text)
}
