use crate::changelog::category::classify;
use crate::changelog::render::Format;
use crate::changelog::warnings::format_warnings;
use crate::github::issues::GitHubIssue;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub format: Format,
    pub content: String,
}

impl RenderedDocument {
    pub fn title(&self) -> &'static str {
        self.format.title()
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }
}

/// Everything a run produces for the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct Changelog {
    /// One document per requested format, in request order.
    pub documents: Vec<RenderedDocument>,
    pub warnings: Option<String>,
}

pub fn build(issues: &[GitHubIssue], label: &str, formats: &[Format]) -> Changelog {
    let classification = classify(issues);
    tracing::info!(
        groups = classification.groups.len(),
        warnings = classification.warnings.len(),
        "classified issues"
    );

    let documents = formats
        .iter()
        .map(|format| RenderedDocument {
            format: *format,
            content: format.formatter().render(&classification.groups, label),
        })
        .collect();

    Changelog {
        documents,
        warnings: format_warnings(&classification.warnings),
    }
}
