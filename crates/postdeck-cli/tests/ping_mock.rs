use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn postdeck(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("postdeck").unwrap();
    cmd.env("POSTDECK_HOME", home);
    cmd
}

#[tokio::test]
async fn test_ping_reports_server_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "healthy" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    postdeck(home.path())
        .args(["--base-url", &server.uri(), "ping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("healthy"));
}

#[tokio::test]
async fn test_ping_unreachable_server_fails() {
    let home = tempfile::tempdir().unwrap();
    postdeck(home.path())
        .args(["--base-url", "http://127.0.0.1:9", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn test_base_url_env_var_is_honored() {
    // An invalid URL from the environment must surface as an error.
    let home = tempfile::tempdir().unwrap();
    postdeck(home.path())
        .env("POSTDECK_BASE_URL", "::not-a-url::")
        .arg("ping")
        .assert()
        .failure();
}
