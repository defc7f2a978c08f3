use crate::changelog::render::Format;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Token,
    FixVersionLabel,
    Repository,
    ApiUrl,
    Formats,
    OutputDir,
    Annotations,
    IdentityConcurrency,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Token => "token",
            ConfigKey::FixVersionLabel => "fix-version-label",
            ConfigKey::Repository => "repository",
            ConfigKey::ApiUrl => "api-url",
            ConfigKey::Formats => "formats",
            ConfigKey::OutputDir => "output-dir",
            ConfigKey::Annotations => "annotations",
            ConfigKey::IdentityConcurrency => "identity-concurrency",
        }
    }

    /// Environment variables that supply this key, highest priority first.
    ///
    /// `INPUT_*` names are how GitHub Actions passes workflow inputs.
    pub fn env_names(&self) -> &'static [&'static str] {
        match self {
            ConfigKey::Token => &["INPUT_TOKEN", "GITHUB_TOKEN"],
            ConfigKey::FixVersionLabel => &["INPUT_FIX-VERSION-LABEL", "FIX_VERSION_LABEL"],
            ConfigKey::Repository => &["INPUT_REPOSITORY", "REPOSITORY", "GITHUB_REPOSITORY"],
            ConfigKey::ApiUrl => &["GITHUB_API_URL"],
            ConfigKey::Formats => &["INPUT_FORMATS", "CHANGELOG_FORMATS"],
            ConfigKey::OutputDir => &["INPUT_OUTPUT-DIR", "CHANGELOG_OUTPUT_DIR"],
            ConfigKey::Annotations => &["GITHUB_ACTIONS"],
            ConfigKey::IdentityConcurrency => &[
                "INPUT_IDENTITY-CONCURRENCY",
                "CHANGELOG_IDENTITY_CONCURRENCY",
            ],
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::Token,
            ConfigKey::FixVersionLabel,
            ConfigKey::Repository,
            ConfigKey::ApiUrl,
            ConfigKey::Formats,
            ConfigKey::OutputDir,
            ConfigKey::Annotations,
            ConfigKey::IdentityConcurrency,
        ]
    }
}

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// A repository identifier in `owner/repo` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl Repository {
    pub fn parse(value: &str) -> Result<Repository> {
        let parts: Vec<&str> = value.split('/').collect();
        match parts.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(Repository {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(anyhow::anyhow!(
                "Invalid repository format '{value}'. Please use <owner>/<repo>."
            )),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Settings for a single run. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub token: String,
    pub fix_version_label: String,
    pub repository: Repository,
    pub api_url: String,
    pub formats: Vec<Format>,
    pub output_dir: Option<PathBuf>,
    pub annotations: bool,
    /// Maximum concurrent user lookups. `None` means one per distinct handle.
    pub identity_concurrency: Option<NonZeroUsize>,
}

/// Collects configuration values from environment variables.
///
/// For each key the first of its `env_names` holding a non-blank value wins.
pub fn read_env(env: &HashMap<String, String>) -> HashMap<ConfigKey, String> {
    ConfigKey::all()
        .iter()
        .filter_map(|key| {
            key.env_names()
                .iter()
                .filter_map(|name| env.get(*name))
                .find(|value| !value.trim().is_empty())
                .map(|value| (*key, value.trim().to_string()))
        })
        .collect()
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// - Keys from `updates` are added to a clone of `base_config`.
/// - If a key exists in both, the value from `updates` overwrites the value in the cloned `base_config`.
pub fn update_config(
    base_config: &HashMap<ConfigKey, String>,
    updates: &HashMap<ConfigKey, String>,
) -> HashMap<ConfigKey, String> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

impl Config {
    /// Validates merged configuration values into a `Config`.
    pub fn from_values(values: &HashMap<ConfigKey, String>) -> Result<Config> {
        let token = required(values, ConfigKey::Token)?;
        let fix_version_label = required(values, ConfigKey::FixVersionLabel)?;
        let repository = Repository::parse(&required(values, ConfigKey::Repository)?)?;

        let api_url = values
            .get(&ConfigKey::ApiUrl)
            .map_or(DEFAULT_API_URL, String::as_str)
            .trim_end_matches('/')
            .to_string();

        let formats = match values.get(&ConfigKey::Formats) {
            Some(value) => Format::parse_list(value)?,
            None => Format::all().to_vec(),
        };

        let annotations = values
            .get(&ConfigKey::Annotations)
            .is_some_and(|value| matches!(value.as_str(), "true" | "1"));

        let identity_concurrency = values
            .get(&ConfigKey::IdentityConcurrency)
            .map(|value| {
                value.parse::<NonZeroUsize>().with_context(|| {
                    format!("Invalid identity concurrency '{value}': expected a positive integer")
                })
            })
            .transpose()?;

        Ok(Config {
            token,
            fix_version_label,
            repository,
            api_url,
            formats,
            output_dir: values.get(&ConfigKey::OutputDir).map(PathBuf::from),
            annotations,
            identity_concurrency,
        })
    }
}

fn required(values: &HashMap<ConfigKey, String>, key: ConfigKey) -> Result<String> {
    values.get(&key).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "Missing {}: set one of {}",
            key.as_str(),
            key.env_names().join(", ")
        )
    })
}
