use crate::config::ConfigKey;
use std::collections::HashMap;

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Generate the changelog; `overrides` take precedence over the environment
    Generate {
        overrides: HashMap<ConfigKey, String>,
    },
    Help,
    Unknown(String),
}

/// Flags taking a value, and the configuration key each one sets
const VALUE_FLAGS: &[(&str, ConfigKey)] = &[
    ("--label", ConfigKey::FixVersionLabel),
    ("--repository", ConfigKey::Repository),
    ("--format", ConfigKey::Formats),
    ("--output-dir", ConfigKey::OutputDir),
    ("--concurrency", ConfigKey::IdentityConcurrency),
    ("--api-url", ConfigKey::ApiUrl),
];

pub const USAGE: &str = "\
Usage: changelog-generator [OPTIONS]

Generates a changelog from the GitHub issues carrying a fix-version label.

Options:
  --label <LABEL>            Fix-version label, e.g. \"fixVersion 2.3.0\"
  --repository <OWNER/REPO>  Repository to search (defaults to GITHUB_REPOSITORY)
  --format <FORMATS>         markdown, asciidoc or all, comma separated (default: all)
  --output-dir <DIR>         Also write changelog.md / changelog.adoc into DIR
  --concurrency <N>          Maximum concurrent user lookups (default: unbounded)
  --api-url <URL>            GitHub API base URL (default: https://api.github.com)
  --annotations              Emit GitHub Actions notice/warning commands
  -h, --help                 Print this help

The token is read from INPUT_TOKEN or GITHUB_TOKEN.";

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    let mut overrides = HashMap::new();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "help" | "--help" | "-h" => return Command::Help,
            "--annotations" => {
                overrides.insert(ConfigKey::Annotations, "true".to_string());
            }
            flag => {
                let Some((name, key)) = VALUE_FLAGS.iter().find(|(name, _)| *name == flag) else {
                    return Command::Unknown(format!("Unknown argument {flag}"));
                };
                match rest.next() {
                    Some(value) if !value.starts_with("--") => {
                        overrides.insert(*key, value.clone());
                    }
                    _ => return Command::Unknown(format!("Missing value for {name}")),
                }
            }
        }
    }

    Command::Generate { overrides }
}
