use cucumber::World;
use std::fmt;
use wiremock::MockServer;

#[derive(Default, World)]
pub struct ChangelogWorld {
    pub server: Option<MockServer>,
    pub repository: String,
    pub issues: Vec<serde_json::Value>,
    pub output_dir: Option<tempfile::TempDir>,
    pub captured_output: Vec<u8>,
    pub run_result: Option<Result<(), anyhow::Error>>,
}

impl fmt::Debug for ChangelogWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangelogWorld")
            .field("repository", &self.repository)
            .field("issues", &self.issues.len())
            .field("output", &String::from_utf8_lossy(&self.captured_output))
            .field("run_result", &self.run_result)
            .finish()
    }
}

#[tokio::main]
async fn main() {
    ChangelogWorld::run("features").await;
}

mod steps;
