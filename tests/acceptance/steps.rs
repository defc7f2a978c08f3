use crate::ChangelogWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use std::collections::HashMap;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server(world: &mut ChangelogWorld) -> &MockServer {
    if world.server.is_none() {
        world.server = Some(MockServer::start().await);
    }
    world.server.as_ref().expect("mock server should be started")
}

fn issues_from_docstring(step: &Step) -> Vec<serde_json::Value> {
    let json = step
        .docstring
        .as_ref()
        .expect("Expected docstring with issues JSON");
    serde_json::from_str(json).expect("Issues docstring should be a JSON array")
}

fn output(world: &ChangelogWorld) -> String {
    String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8")
}

async fn mount_search_results(world: &mut ChangelogWorld) {
    let issues = world.issues.clone();
    let server = server(world).await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": issues.len(),
            "items": issues,
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": issues.len(),
            "items": [],
        })))
        .with_priority(10)
        .mount(server)
        .await;
}

async fn generate(world: &mut ChangelogWorld, extra_args: &[String]) {
    mount_search_results(world).await;
    let api_url = server(world).await.uri();

    let mut env = HashMap::new();
    env.insert("GITHUB_API_URL".to_string(), api_url);
    env.insert("GITHUB_TOKEN".to_string(), "test-token".to_string());
    env.insert("GITHUB_REPOSITORY".to_string(), world.repository.clone());

    let mut args = vec!["changelog-generator".to_string()];
    args.extend_from_slice(extra_args);

    let mut buffer: Vec<u8> = Vec::new();
    let writer_option: Option<&mut dyn std::io::Write> = Some(&mut buffer);
    let result = changelog_generator::run::run(args, env, writer_option).await;

    world.captured_output = buffer;
    world.run_result = Some(result);
}

fn label_args(label: &str) -> Vec<String> {
    vec!["--label".to_string(), label.to_string()]
}

#[given(regex = r#"^the repository "([^"]*)" has the issues:$"#)]
async fn given_repository_has_issues(world: &mut ChangelogWorld, repository: String, step: &Step) {
    world.repository = repository;
    world.issues = issues_from_docstring(step);
}

#[given(regex = r#"^the repository "([^"]*)" also has the issues:$"#)]
async fn given_repository_also_has_issues(
    world: &mut ChangelogWorld,
    _repository: String,
    step: &Step,
) {
    world.issues.extend(issues_from_docstring(step));
}

#[given(regex = r#"^the user "([^"]*)" is named "([^"]*)"$"#)]
async fn given_user_is_named(world: &mut ChangelogWorld, login: String, name: String) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"login": login, "id": 1, "name": name})),
        )
        .mount(server(world).await)
        .await;
}

#[given(regex = r#"^the user "([^"]*)" has no display name$"#)]
async fn given_user_has_no_name(world: &mut ChangelogWorld, login: String) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"login": login, "id": 2, "name": null})),
        )
        .mount(server(world).await)
        .await;
}

#[given(regex = r#"^the user "([^"]*)" cannot be found$"#)]
async fn given_user_cannot_be_found(world: &mut ChangelogWorld, login: String) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(1)
        .mount(server(world).await)
        .await;
}

#[when(regex = r#"^I generate the changelog for "([^"]*)"$"#)]
async fn when_generate(world: &mut ChangelogWorld, label: String) {
    generate(world, &label_args(&label)).await;
}

#[when(regex = r#"^I generate the "([^"]*)" changelog for "([^"]*)"$"#)]
async fn when_generate_format(world: &mut ChangelogWorld, format: String, label: String) {
    let mut args = label_args(&label);
    args.extend(["--format".to_string(), format]);
    generate(world, &args).await;
}

#[when(regex = r#"^I generate the "([^"]*)" changelog for "([^"]*)" with annotations$"#)]
async fn when_generate_format_with_annotations(
    world: &mut ChangelogWorld,
    format: String,
    label: String,
) {
    let mut args = label_args(&label);
    args.extend(["--format".to_string(), format, "--annotations".to_string()]);
    generate(world, &args).await;
}

#[when(regex = r#"^I generate the changelog for "([^"]*)" into an output directory$"#)]
async fn when_generate_into_directory(world: &mut ChangelogWorld, label: String) {
    let temp = tempfile::tempdir().expect("Failed to create temporary directory");
    let dir = temp.path().join("changelog-generator-files");
    world.output_dir = Some(temp);

    let mut args = label_args(&label);
    args.extend(["--output-dir".to_string(), dir.display().to_string()]);
    generate(world, &args).await;
}

#[when(regex = r#"^I generate the changelog for "([^"]*)" in repository "([^"]*)"$"#)]
async fn when_generate_in_repository(world: &mut ChangelogWorld, label: String, repository: String) {
    let mut args = label_args(&label);
    args.extend(["--repository".to_string(), repository]);
    generate(world, &args).await;
}

#[then("the run should succeed")]
async fn then_run_should_succeed(world: &mut ChangelogWorld) {
    match &world.run_result {
        Some(Ok(())) => {}
        other => panic!("Expected a successful run, got {other:?}"),
    }
}

#[then(regex = r#"^the run should fail with "(.*)"$"#)]
async fn then_run_should_fail_with(world: &mut ChangelogWorld, expected: String) {
    match &world.run_result {
        Some(Err(err)) => {
            let message = format!("{err:#}");
            assert!(
                message.contains(&expected),
                "Expected error containing '{}', got: {}",
                expected,
                message
            );
        }
        other => panic!("Expected a failed run, got {other:?}"),
    }
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_should_contain(world: &mut ChangelogWorld, expected: String) {
    let output = output(world);
    assert!(
        output.contains(&expected),
        "Expected '{}' in output:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the output should not contain "(.*)"$"#)]
async fn then_output_should_not_contain(world: &mut ChangelogWorld, unexpected: String) {
    let output = output(world);
    assert!(
        !output.contains(&unexpected),
        "Did not expect '{}' in output:\n---\n{}\n---",
        unexpected,
        output
    );
}

#[then(regex = r#"^"(.*)" should appear before "(.*)"$"#)]
async fn then_should_appear_before(world: &mut ChangelogWorld, first: String, second: String) {
    let output = output(world);
    let first_at = output
        .find(&first)
        .unwrap_or_else(|| panic!("'{first}' not found in output:\n{output}"));
    let second_at = output
        .find(&second)
        .unwrap_or_else(|| panic!("'{second}' not found in output:\n{output}"));
    assert!(first_at < second_at, "'{first}' should come before '{second}'");
}

#[then(regex = r#"^the user "([^"]*)" should have been looked up (\d+) times?$"#)]
async fn then_user_looked_up(world: &mut ChangelogWorld, login: String, expected: usize) {
    let requests = server(world)
        .await
        .received_requests()
        .await
        .expect("Request recording should be enabled");
    let lookups = requests
        .iter()
        .filter(|request| request.url.path() == format!("/users/{login}"))
        .count();
    assert_eq!(lookups, expected, "lookups of user {login}");
}

#[then(regex = r#"^the file "([^"]*)" should contain "(.*)"$"#)]
async fn then_file_should_contain(world: &mut ChangelogWorld, file_name: String, expected: String) {
    let temp = world.output_dir.as_ref().expect("No output directory used");
    let file_path = temp.path().join("changelog-generator-files").join(file_name);
    let content = std::fs::read_to_string(&file_path)
        .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", file_path, e));
    assert!(
        content.contains(&expected),
        "Expected '{}' in {:?}:\n---\n{}\n---",
        expected,
        file_path,
        content
    );
}

#[then("no changelog files should be written")]
async fn then_no_files_written(world: &mut ChangelogWorld) {
    let temp = world.output_dir.as_ref().expect("No output directory used");
    assert!(
        !temp.path().join("changelog-generator-files").exists(),
        "Output directory should not have been created"
    );
}
