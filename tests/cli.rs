use std::io::Write;

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use serde_json::json;
use tempfile::NamedTempFile;

fn key_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write key");
    file
}

fn blogdesk(server: &MockServer, key: &NamedTempFile) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogdesk"));
    cmd.env_remove("BLOGDESK_API_KEY")
        .env_remove("BLOGDESK_CONFIG_FILE")
        .env("BLOGDESK_SITE_URL", server.base_url())
        .env("BLOGDESK_API_KEY_FILE", key.path());
    cmd
}

#[test]
fn list_renders_grid() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/categories")
            .header("authorization", "Bearer cli-key")
            .query_param("page", "2")
            .query_param("limit", "10")
            .query_param("search", "te");
        then.status(200)
            .json_body(json!({"result": [{"id": 31, "name": "Tech"}], "total": 11}));
    });

    let key = key_file("cli-key\n");
    blogdesk(&server, &key)
        .args(["categories", "list", "--page", "1", "--page-size", "10", "--search", "te"])
        .assert()
        .success()
        .stdout(contains("31 | Tech | edit | delete"))
        .stdout(contains("page 2 of 2 (11 total, 10 per page)"));
    mock.assert();
}

#[test]
fn create_prints_record_and_notification() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/tags")
            .json_body(json!({"name": "async"}));
        then.status(201).json_body(json!({"id": 12, "name": "async"}));
    });
    server.mock(|when, then| {
        when.method("GET").path("/tags");
        then.status(200).json_body(json!({"result": [], "total": 0}));
    });

    let key = key_file("cli-key");
    blogdesk(&server, &key)
        .args(["tags", "create", "--set", "name=async"])
        .assert()
        .success()
        .stdout(contains("\"name\": \"async\""))
        .stderr(contains("[success] Tag created successfully"));
    mock.assert();
}

#[test]
fn update_loads_record_then_applies_overrides() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/comments/5");
        then.status(200).json_body(json!({
            "id": 5,
            "blog": {"id": 7, "title": "Ownership", "content": "...", "published": true},
            "content": "nice"
        }));
    });
    let update = server.mock(|when, then| {
        when.method("PUT")
            .path("/comments/5")
            .json_body(json!({"blogId": 7, "content": "very nice"}));
        then.status(200).json_body(json!({
            "id": 5,
            "blog": {"id": 7, "title": "Ownership", "content": "...", "published": true},
            "content": "very nice"
        }));
    });
    server.mock(|when, then| {
        when.method("GET").path("/comments");
        then.status(200).json_body(json!({"result": [], "total": 0}));
    });

    let key = key_file("cli-key");
    blogdesk(&server, &key)
        .args(["comments", "update", "5", "--set", "content=very nice"])
        .assert()
        .success()
        .stderr(contains("Comment updated successfully"));
    update.assert();
}

#[test]
fn invalid_form_fails_per_field() {
    let server = MockServer::start();
    let key = key_file("cli-key");
    blogdesk(&server, &key)
        .args(["blogs", "create", "--set", "title=Hello"])
        .assert()
        .failure()
        .stderr(contains("content: Content is required"));
}

#[test]
fn failed_delete_reports_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("DELETE").path("/blogTags/3");
        then.status(409).json_body(json!({"message": "Link is locked"}));
    });

    let key = key_file("cli-key");
    blogdesk(&server, &key)
        .args(["blog-tags", "delete", "3"])
        .assert()
        .failure()
        .stderr(contains("[error] Link is locked"));
}

#[test]
fn missing_site_fails_fast() {
    let key = key_file("cli-key");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogdesk"));
    cmd.env_remove("BLOGDESK_SITE_URL")
        .env_remove("BLOGDESK__API__BASE_URL")
        .env_remove("BLOGDESK_CONFIG_FILE")
        .env("BLOGDESK_API_KEY_FILE", key.path())
        .args(["drafts", "list"])
        .assert()
        .failure()
        .stderr(contains("site URL is required"));
}

#[test]
fn modules_needs_no_session() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogdesk"));
    cmd.env_remove("BLOGDESK_SITE_URL")
        .env_remove("BLOGDESK_API_KEY")
        .env_remove("BLOGDESK_API_KEY_FILE")
        .arg("modules")
        .assert()
        .success()
        .stdout(contains("Blog Categories"))
        .stdout(contains("blogdesk blog-categories list"));
}
