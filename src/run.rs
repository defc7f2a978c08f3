use crate::changelog::report;
use crate::cli;
use crate::config::{self, Config};
use crate::github::client::GitHubClient;
use crate::github::collect;
use crate::output::{self, OutputOptions};
use std::collections::HashMap;

/// Runs the command described by `args` with configuration from `env`.
///
/// Everything printed to stdout is also written to `stdout_additional` when given.
pub async fn run(
    args: Vec<String>,
    env: HashMap<String, String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Generate { overrides } => {
            let values = config::update_config(&config::read_env(&env), &overrides);
            let config = Config::from_values(&values)?;
            generate(&config, &mut stdout_additional).await?;
        }
        cli::parser::Command::Help => {
            output::println(cli::parser::USAGE, &mut stdout_additional)?;
        }
        cli::parser::Command::Unknown(message) => {
            return Err(anyhow::anyhow!("{message}. Use --help for usage."));
        }
    }
    Ok(())
}

/// Fetches, classifies, renders and reports the changelog for `config`.
pub async fn generate(
    config: &Config,
    stdout_additional: &mut Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    tracing::info!(
        repository = %config.repository,
        label = %config.fix_version_label,
        "generating changelog"
    );

    let client = GitHubClient::new(&config.api_url, &config.token)?;
    let issues = collect::collect_all_issues(
        &client,
        &client,
        &config.repository,
        &config.fix_version_label,
        config.identity_concurrency,
    )
    .await?;
    tracing::info!(issues = issues.len(), "collected issues");

    let changelog = report::build(&issues, &config.fix_version_label, &config.formats);
    let options = OutputOptions {
        annotations: config.annotations,
        output_dir: config.output_dir.clone(),
    };
    output::report(&changelog, &options, stdout_additional)
}
