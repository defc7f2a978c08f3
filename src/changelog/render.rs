use crate::changelog::category::CategoryGroup;
use crate::github::issues::GitHubIssue;
use anyhow::Result;

/// Output dialects for the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    AsciiDoc,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::AsciiDoc => "asciidoc",
        }
    }

    pub fn all() -> &'static [Format] {
        &[Format::Markdown, Format::AsciiDoc]
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Format::Markdown => "changelog.md",
            Format::AsciiDoc => "changelog.adoc",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Format::Markdown => "ChangeLog in Markdown",
            Format::AsciiDoc => "ChangeLog in AsciiDoc",
        }
    }

    pub fn formatter(&self) -> &'static dyn ChangelogFormatter {
        match self {
            Format::Markdown => &Markdown,
            Format::AsciiDoc => &AsciiDoc,
        }
    }

    /// Parses a comma-separated format list such as `markdown,adoc` or `all`.
    ///
    /// Duplicates are dropped, first occurrence order is kept.
    pub fn parse_list(value: &str) -> Result<Vec<Format>> {
        let mut formats = Vec::new();
        for name in value.split(',').map(str::trim) {
            let parsed: &[Format] = match name.to_ascii_lowercase().as_str() {
                "markdown" | "md" => &[Format::Markdown],
                "asciidoc" | "adoc" => &[Format::AsciiDoc],
                "all" => Format::all(),
                _ => {
                    return Err(anyhow::anyhow!(
                        "Unknown format '{name}'. Expected markdown, asciidoc or all."
                    ));
                }
            };
            for format in parsed {
                if !formats.contains(format) {
                    formats.push(*format);
                }
            }
        }
        Ok(formats)
    }
}

/// The version heading derived from a fix-version label.
///
/// Everything up to and including the first space is dropped: `fixVersion 2.3.0` gives `v2.3.0`.
pub fn release_title(label: &str) -> String {
    let version = label.split_once(' ').map_or(label, |(_, version)| version);
    format!("v{version}")
}

/// A markup dialect for changelog documents.
pub trait ChangelogFormatter {
    fn heading(&self, release: &str) -> String;
    fn section(&self, title: &str) -> String;
    fn entry(&self, issue: &GitHubIssue) -> String;

    fn render(&self, groups: &[CategoryGroup<'_>], label: &str) -> String {
        let mut text = self.heading(&release_title(label));
        for group in groups {
            text.push_str(&self.section(group.category.title()));
            for issue in &group.issues {
                text.push_str(&self.entry(issue));
            }
        }
        text
    }
}

pub struct Markdown;

impl ChangelogFormatter for Markdown {
    fn heading(&self, release: &str) -> String {
        format!("\n# {release}\n\n")
    }

    fn section(&self, title: &str) -> String {
        format!("## {title}\n\n")
    }

    fn entry(&self, issue: &GitHubIssue) -> String {
        format!(
            "* [#{}]({}): {}  \n  Contributor(s): {}\n\n",
            issue.number,
            issue.link,
            issue.title,
            issue.assignees.join(", ")
        )
    }
}

pub struct AsciiDoc;

impl ChangelogFormatter for AsciiDoc {
    fn heading(&self, release: &str) -> String {
        format!("\n== {release}\n\n")
    }

    fn section(&self, title: &str) -> String {
        format!("=== {title}\n\n")
    }

    fn entry(&self, issue: &GitHubIssue) -> String {
        format!(
            "_{}[#{}]_\n-- {}  \n\n_Implemented by {}_\n\n'''\n\n",
            issue.link,
            issue.number,
            issue.title,
            issue.assignees.join(", ")
        )
    }
}
