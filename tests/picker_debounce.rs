use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use blogdesk::application::error::AppError;
use blogdesk::application::picker::{NestedForm, RelationCatalog, RelationPicker, RelationSource};
use blogdesk::application::session::Session;
use blogdesk::config::Settings;
use blogdesk::domain::entities::Drafts;
use blogdesk::domain::form::DropdownOption;
use blogdesk::domain::resource::{Resource, ResourceKind};
use httpmock::MockServer;
use serde_json::json;
use tokio::time::{Instant, advance};

/// Blog source that records every keyword it is asked for.
#[derive(Default)]
struct RecordingSource {
    keywords: Mutex<Vec<String>>,
}

impl RecordingSource {
    fn keywords(&self) -> Vec<String> {
        self.keywords.lock().expect("keywords").clone()
    }
}

#[async_trait]
impl RelationSource for RecordingSource {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Blogs
    }

    async fn options(&self, keyword: &str) -> Result<Vec<DropdownOption>, AppError> {
        self.keywords.lock().expect("keywords").push(keyword.to_string());
        Ok(vec![DropdownOption::new(7, format!("{keyword} blog"))])
    }

    fn create_form(&self, _catalog: &RelationCatalog) -> Box<dyn NestedForm> {
        unreachable!("no nested form in debounce tests")
    }
}

fn picker(source: &Arc<RecordingSource>) -> RelationPicker {
    let catalog = RelationCatalog::new([Arc::clone(source) as Arc<dyn RelationSource>]);
    let blog = &Drafts::fields()[0];
    RelationPicker::new(blog, &catalog, Duration::from_millis(300)).expect("relation field")
}

#[tokio::test(start_paused = true)]
async fn keystroke_burst_issues_one_query() {
    let source = Arc::new(RecordingSource::default());
    let mut picker = picker(&source);
    let started = Instant::now();

    for text in ["o", "ow", "own", "owne", "owner"] {
        picker.type_text(text);
        advance(Duration::from_millis(120)).await;
    }
    assert!(picker.is_pending());
    assert_eq!(picker.queries_issued(), 0);

    assert!(picker.settle().await.expect("settle"));
    assert_eq!(started.elapsed(), Duration::from_millis(4 * 120 + 300));
    assert_eq!(source.keywords(), vec!["owner"]);
    assert_eq!(picker.options()[0].label, "owner blog");

    // Nothing pending: settling again issues nothing.
    assert!(!picker.settle().await.expect("idle settle"));
    assert_eq!(picker.queries_issued(), 1);
}

#[tokio::test(start_paused = true)]
async fn each_pause_forwards_latest_text() {
    let source = Arc::new(RecordingSource::default());
    let mut picker = picker(&source);

    picker.type_text("ru");
    picker.type_text("rus");
    picker.settle().await.expect("first pause");

    picker.type_text("rust");
    advance(Duration::from_millis(299)).await;
    assert!(picker.is_pending());
    picker.settle().await.expect("second pause");

    assert_eq!(source.keywords(), vec!["rus", "rust"]);
    assert_eq!(picker.text(), "rust");
}

#[tokio::test(start_paused = true)]
async fn picker_without_source_reports_error() {
    let catalog = RelationCatalog::default();
    let blog = &Drafts::fields()[0];
    let mut picker =
        RelationPicker::new(blog, &catalog, Duration::from_millis(300)).expect("relation field");

    picker.type_text("x");
    assert!(picker.settle().await.is_err());
}

#[tokio::test]
async fn dropdown_keyword_sent_only_when_present() {
    let server = MockServer::start();
    let all = server.mock(|when, then| {
        when.method("GET")
            .path("/blogs/dropdown")
            .query_param_missing("keyword");
        then.status(200)
            .json_body(json!([{"id": 1, "title": "Hello"}, {"id": 2, "title": "Ownership"}]));
    });
    let filtered = server.mock(|when, then| {
        when.method("GET")
            .path("/blogs/dropdown")
            .query_param("keyword", "own");
        then.status(200).json_body(json!([{"id": 2, "title": "Ownership"}]));
    });

    let mut settings = Settings::default();
    settings.api.base_url = Some(server.base_url());
    let session = Session::login(settings, "token").expect("session");
    let blog = &Drafts::fields()[0];
    let mut picker =
        RelationPicker::new(blog, session.catalog(), Duration::from_millis(300)).expect("picker");

    let options = picker.load_options("").await.expect("all").to_vec();
    assert_eq!(options.len(), 2);
    let options = picker.load_options("own").await.expect("filtered").to_vec();
    assert_eq!(options, vec![DropdownOption::new(2, "Ownership")]);

    all.assert();
    filtered.assert();
}
