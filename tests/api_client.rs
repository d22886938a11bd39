use blogdesk::infra::http::{ApiClient, RequestError};
use blogdesk_api_types::{Category, CategoryPayload, ListPage};
use httpmock::MockServer;
use serde_json::json;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.base_url(), "secret-token").expect("client")
}

#[tokio::test]
async fn get_sends_bearer_token_and_query() -> Result<(), RequestError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/categories")
            .header("authorization", "Bearer secret-token")
            .query_param("page", "2")
            .query_param("search", "rust & go");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"result": [{"id": 3, "name": "Rust"}], "total": 1}));
    });

    let page: ListPage<Category> = client(&server)
        .get("categories")?
        .query("page", 2)
        .query("search", "rust & go")
        .send()
        .await?;

    mock.assert();
    assert_eq!(page.total, 1);
    assert_eq!(page.result[0].name, "Rust");
    Ok(())
}

#[tokio::test]
async fn post_sends_json_body() -> Result<(), RequestError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/categories")
            .json_body(json!({"name": "Tech"}));
        then.status(201)
            .header("content-type", "application/json")
            .json_body(json!({"id": 11, "name": "Tech"}));
    });

    let created: Category = client(&server)
        .post("categories")?
        .json(&CategoryPayload {
            name: "Tech".into(),
        })?
        .send()
        .await?;

    mock.assert();
    assert_eq!(created.id, 11);
    Ok(())
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("PUT").path("/tags/4");
        then.status(422)
            .header("content-type", "application/json")
            .json_body(json!({"message": "Tag name already exists"}));
    });

    let err = client(&server)
        .put("tags/4")
        .expect("request")
        .json(&json!({"name": "dup"}))
        .expect("body")
        .send::<serde_json::Value>()
        .await
        .expect_err("422 must fail");

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.server_message(), Some("Tag name already exists"));
}

#[tokio::test]
async fn plain_text_error_body_becomes_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/blogs/9");
        then.status(404).body("Blog not found");
    });

    let err = client(&server)
        .get("blogs/9")
        .expect("request")
        .send::<serde_json::Value>()
        .await
        .expect_err("404 must fail");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), Some("Blog not found"));
}

#[tokio::test]
async fn delete_accepts_empty_body() -> Result<(), RequestError> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/likes/5");
        then.status(204);
    });

    client(&server).delete("likes/5")?.send_unit().await?;
    mock.assert();
    Ok(())
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/tags/1");
        then.status(200).body("not json");
    });

    let err = client(&server)
        .get("tags/1")
        .expect("request")
        .send::<serde_json::Value>()
        .await
        .expect_err("decode must fail");

    assert!(matches!(err, RequestError::Decode(_)));
    assert_eq!(err.status(), None);
}
