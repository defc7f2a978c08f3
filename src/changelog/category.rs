use crate::github::issues::{GitHubIssue, IssueState};

/// Changelog sections, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    NewFeature,
    Improvement,
    Bug,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::NewFeature, Category::Improvement, Category::Bug];

    /// The value of the `type: ` label selecting this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::NewFeature => "new feature",
            Category::Improvement => "improvement",
            Category::Bug => "bug",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::NewFeature => "New features",
            Category::Improvement => "Improvements",
            Category::Bug => "Bugfixes",
        }
    }

    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|category| category.key() == key)
    }

    /// The category `issue` belongs to, if it is closed and has a recognized type.
    pub fn of(issue: &GitHubIssue) -> Option<Category> {
        if issue.state != IssueState::Closed {
            return None;
        }
        issue.issue_type.as_deref().and_then(Category::from_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub issues: Vec<&'a GitHubIssue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    /// Non-empty groups in `Category::ALL` order.
    pub groups: Vec<CategoryGroup<'a>>,
    /// Issues that are not closed or have no recognized type.
    pub warnings: Vec<&'a GitHubIssue>,
}

/// Splits `issues` into category groups and warnings, preserving input order.
pub fn classify(issues: &[GitHubIssue]) -> Classification<'_> {
    let groups = Category::ALL
        .into_iter()
        .map(|category| CategoryGroup {
            category,
            issues: issues
                .iter()
                .filter(|issue| Category::of(issue) == Some(category))
                .collect(),
        })
        .filter(|group| !group.issues.is_empty())
        .collect();

    let warnings = issues
        .iter()
        .filter(|issue| Category::of(issue).is_none())
        .collect();

    Classification { groups, warnings }
}
