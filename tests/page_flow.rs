use blogdesk::application::form::SubmitOutcome;
use blogdesk::application::list_view::{ListIntent, RowAction};
use blogdesk::application::page::DeleteOutcome;
use blogdesk::application::session::Session;
use blogdesk::config::Settings;
use blogdesk::domain::entities::{Blogs, Categories};
use httpmock::MockServer;
use serde_json::json;

fn session(server: &MockServer) -> Session {
    let mut settings = Settings::default();
    settings.api.base_url = Some(server.base_url());
    Session::login(settings, "token").expect("session")
}

fn toast_texts(session: &Session) -> Vec<String> {
    session
        .toasts()
        .drain()
        .into_iter()
        .map(|toast| toast.text)
        .collect()
}

#[tokio::test]
async fn deleting_blog_refetches_list() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET")
            .path("/blogs")
            .query_param("page", "1")
            .query_param("limit", "25");
        then.status(200).json_body(json!({
            "result": [{"id": 7, "title": "Ownership", "content": "...", "published": true}],
            "total": 1
        }));
    });
    let delete = server.mock(|when, then| {
        when.method("DELETE").path("/blogs/7");
        then.status(204);
    });

    let session = session(&server);
    let mut page = session.page::<Blogs>();
    page.mount().await;
    list.assert_calls(1);

    let intent = page
        .list()
        .row_action(7, RowAction::Delete)
        .expect("delete enabled");
    page.handle_intent(intent).await.expect("intent");
    assert_eq!(page.delete_target(), Some(7));

    let outcome = page.confirm_delete().await;
    assert!(matches!(outcome, DeleteOutcome::Deleted(7)));
    assert_eq!(page.delete_target(), None);
    delete.assert();
    list.assert_calls(2);
    assert_eq!(toast_texts(&session), vec!["Blog deleted successfully"]);
}

#[tokio::test]
async fn failed_delete_still_clears_target() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET").path("/blogs");
        then.status(200).json_body(json!({"result": [], "total": 0}));
    });
    server.mock(|when, then| {
        when.method("DELETE").path("/blogs/7");
        then.status(409)
            .json_body(json!({"errorMessage": "Blog has comments"}));
    });

    let session = session(&server);
    let mut page = session.page::<Blogs>();
    page.mount().await;
    page.request_delete(7);

    let outcome = page.confirm_delete().await;
    assert!(matches!(outcome, DeleteOutcome::Failed { id: 7, .. }));
    assert_eq!(page.delete_target(), None);
    list.assert_calls(1);
    assert_eq!(toast_texts(&session), vec!["Blog has comments"]);
}

#[tokio::test]
async fn created_category_shows_up_in_list() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/categories")
            .json_body(json!({"name": "Tech"}));
        then.status(201).json_body(json!({"id": 31, "name": "Tech"}));
    });
    let list = server.mock(|when, then| {
        when.method("GET")
            .path("/categories")
            .query_param("page", "1")
            .query_param("limit", "25");
        then.status(200)
            .json_body(json!({"result": [{"id": 31, "name": "Tech"}], "total": 1}));
    });

    let session = session(&server);
    let mut page = session.page::<Categories>();
    assert!(!page.modal_open());

    page.open_new().await.set_text("name", "Tech").expect("set");
    assert!(page.modal_open());

    let outcome = page.submit_form().await.expect("form open");
    let SubmitOutcome::Saved(category) = outcome else {
        panic!("expected saved category");
    };
    assert_eq!(category.id, 31);
    assert!(!page.modal_open());

    create.assert();
    list.assert();
    assert_eq!(page.list().rows()[0].name, "Tech");
    assert_eq!(toast_texts(&session), vec!["Category created successfully"]);
}

#[tokio::test]
async fn edit_intent_opens_loaded_form() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/categories");
        then.status(200)
            .json_body(json!({"result": [{"id": 4, "name": "Rust"}], "total": 1}));
    });
    let detail = server.mock(|when, then| {
        when.method("GET").path("/categories/4");
        then.status(200).json_body(json!({"id": 4, "name": "Rust"}));
    });

    let session = session(&server);
    let mut page = session.page::<Categories>();
    page.mount().await;
    page.handle_intent(ListIntent::Edit(4)).await.expect("edit");

    detail.assert();
    assert!(page.modal_open());
    assert_eq!(page.edit_id(), Some(4));
    let form = page.form().expect("form");
    assert_eq!(form.values().text("name"), Ok("Rust"));

    page.cancel_form();
    assert!(!page.modal_open());
    assert_eq!(page.edit_id(), None);
}

#[tokio::test]
async fn edit_of_missing_record_closes_modal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/categories/404");
        then.status(404).json_body(json!({"message": "Category not found"}));
    });

    let session = session(&server);
    let mut page = session.page::<Categories>();
    let err = page.open_edit(404).await.err().expect("missing record");
    assert_eq!(err.server_message(), Some("Category not found"));
    assert!(!page.modal_open());
}

#[tokio::test]
async fn debounced_search_resets_to_first_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET")
            .path("/categories")
            .query_param_missing("search");
        then.status(200).json_body(json!({"result": [], "total": 80}));
    });
    let searched = server.mock(|when, then| {
        when.method("GET")
            .path("/categories")
            .query_param("page", "1")
            .query_param("search", "tec");
        then.status(200)
            .json_body(json!({"result": [{"id": 31, "name": "Tech"}], "total": 1}));
    });

    let session = session(&server);
    let mut page = session.page::<Categories>();
    page.mount().await;
    page.list_mut().set_page(2).await;

    page.type_search("t");
    page.type_search("te");
    page.type_search("tec");
    assert!(page.settle_search().await);

    searched.assert_calls(1);
    assert_eq!(page.list().page(), 0);
    assert_eq!(page.list().search(), "tec");
    assert!(!page.settle_search().await);
}
