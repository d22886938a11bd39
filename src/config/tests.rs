use std::io::Write;

use serial_test::serial;
use tempfile::NamedTempFile;

use super::*;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::parse_from(args.iter().copied())
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("https://file.example".to_string());
    raw.logging.level = Some("info".to_string());

    let cli = parse(&[
        "blogdesk",
        "--site",
        "https://cli.example",
        "--log-level",
        "debug",
        "modules",
    ]);

    raw.apply_cli_overrides(&cli);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(
        settings.api.base_url.as_deref(),
        Some("https://cli.example")
    );
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn ui_defaults_match_admin_console() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.ui.page_size.get(), 25);
    assert_eq!(settings.ui.debounce, Duration::from_millis(300));
    assert_eq!(settings.ui.toast_ttl, Duration::from_millis(1500));
    assert_eq!(settings.ui.max_toasts.get(), 3);
    assert_eq!(settings.cache.max_age_secs, 86_400);
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(settings.api.base_url.is_none());
}

#[test]
fn zero_page_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.ui.page_size = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero page size");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "ui.page_size",
            ..
        }
    ));
}

#[test]
fn invalid_log_level_names_key() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("loud".to_string());
    let err = Settings::from_raw(raw).expect_err("bad level");
    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn blank_base_url_is_treated_as_missing() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.api.base_url.is_none());
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    raw.apply_cli_overrides(&parse(&["blogdesk", "--log-json", "true", "modules"]));
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
#[serial]
fn config_file_then_env_then_cli() {
    let mut file = NamedTempFile::with_suffix(".toml").expect("tmp file");
    writeln!(
        file,
        "[api]\nbase_url = \"https://file.example\"\n\n[ui]\npage_size = 10\ndebounce_ms = 50"
    )
    .expect("write config");

    // SAFETY: serialised with the other env-touching tests.
    unsafe { std::env::set_var("BLOGDESK__UI__PAGE_SIZE", "40") };
    let path = file.path().to_string_lossy().into_owned();
    let cli = parse(&["blogdesk", "--config-file", path.as_str(), "modules"]);
    let result = load(&cli);
    unsafe { std::env::remove_var("BLOGDESK__UI__PAGE_SIZE") };

    let settings = result.expect("settings");
    assert_eq!(
        settings.api.base_url.as_deref(),
        Some("https://file.example")
    );
    assert_eq!(settings.ui.page_size.get(), 40);
    assert_eq!(settings.ui.debounce, Duration::from_millis(50));
}

#[test]
#[serial]
fn missing_explicit_config_file_fails() {
    let cli = parse(&[
        "blogdesk",
        "--config-file",
        "/nonexistent/blogdesk.toml",
        "modules",
    ]);
    let err = load(&cli).expect_err("missing file");
    assert!(matches!(err, LoadError::Build(_)));
}

#[test]
fn parse_resource_actions() {
    let cli = parse(&[
        "blogdesk",
        "blog-tags",
        "update",
        "3",
        "--set",
        "blog=7",
        "--set",
        "tag=4",
    ]);
    let (kind, args) = cli.command.resource().expect("resource command");
    assert_eq!(kind, crate::domain::resource::ResourceKind::BlogTags);
    match &args.action {
        ResourceAction::Update { id, set } => {
            assert_eq!(*id, 3);
            assert_eq!(
                set,
                &vec![
                    Assignment {
                        field: "blog".into(),
                        value: "7".into()
                    },
                    Assignment {
                        field: "tag".into(),
                        value: "4".into()
                    },
                ]
            );
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn parse_list_defaults() {
    let cli = parse(&["blogdesk", "categories", "list", "--search", "te"]);
    let (_, args) = cli.command.resource().expect("resource command");
    match &args.action {
        ResourceAction::List {
            page,
            page_size,
            search,
        } => {
            assert_eq!(*page, 0);
            assert!(page_size.is_none());
            assert_eq!(search.as_deref(), Some("te"));
        }
        other => panic!("unexpected action {other:?}"),
    }
}

#[test]
fn assignment_requires_equals_sign() {
    let err = CliArgs::try_parse_from(["blogdesk", "tags", "create", "--set", "name"])
        .expect_err("missing equals");
    assert!(err.to_string().contains("FIELD=VALUE"));
}
