//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

mod cli;

pub use cli::{Assignment, CliArgs, Command, ResourceAction, ResourceArgs};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blogdesk";
const ENV_PREFIX: &str = "BLOGDESK";
const DEFAULT_CACHE_LIST_LIMIT: usize = 100;
const DEFAULT_CACHE_DETAIL_LIMIT: usize = 100;
const DEFAULT_CACHE_DROPDOWN_LIMIT: usize = 50;
const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 24 * 60 * 60;
const DEFAULT_PAGE_SIZE: u32 = 25;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TOAST_TTL_MS: u64 = 1500;
const DEFAULT_MAX_TOASTS: u32 = 3;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Default)]
pub struct ApiSettings {
    /// Base URL of the admin API; required before a session can start.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub list_limit: usize,
    pub detail_limit: usize,
    pub dropdown_limit: usize,
    pub max_age_secs: u64,
}

#[derive(Debug, Clone)]
pub struct UiSettings {
    pub page_size: NonZeroU32,
    pub debounce: Duration,
    pub toast_ttl: Duration,
    pub max_toasts: NonZeroU32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            logging: LoggingSettings {
                level: LevelFilter::WARN,
                format: LogFormat::Compact,
            },
            cache: CacheSettings {
                list_limit: DEFAULT_CACHE_LIST_LIMIT,
                detail_limit: DEFAULT_CACHE_DETAIL_LIMIT,
                dropdown_limit: DEFAULT_CACHE_DROPDOWN_LIMIT,
                max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
            },
            ui: UiSettings {
                page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
                debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
                toast_ttl: Duration::from_millis(DEFAULT_TOAST_TTL_MS),
                max_toasts: NonZeroU32::new(DEFAULT_MAX_TOASTS).unwrap_or(NonZeroU32::MIN),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_cli_overrides(cli);

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    cache: RawCacheSettings,
    ui: RawUiSettings,
}

impl RawSettings {
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(site) = cli.site.as_ref() {
            self.api.base_url = Some(site.clone());
        }
        if let Some(level) = cli.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = cli.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            cache,
            ui,
        } = raw;

        Ok(Self {
            api: build_api_settings(api),
            logging: build_logging_settings(logging)?,
            cache: build_cache_settings(cache),
            ui: build_ui_settings(ui)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> ApiSettings {
    let base_url = api.base_url.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });
    ApiSettings { base_url }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_cache_settings(cache: RawCacheSettings) -> CacheSettings {
    CacheSettings {
        list_limit: cache.list_limit.unwrap_or(DEFAULT_CACHE_LIST_LIMIT),
        detail_limit: cache.detail_limit.unwrap_or(DEFAULT_CACHE_DETAIL_LIMIT),
        dropdown_limit: cache.dropdown_limit.unwrap_or(DEFAULT_CACHE_DROPDOWN_LIMIT),
        max_age_secs: cache.max_age_secs.unwrap_or(DEFAULT_CACHE_MAX_AGE_SECS),
    }
}

fn build_ui_settings(ui: RawUiSettings) -> Result<UiSettings, LoadError> {
    let page_size = non_zero_u32(
        u64::from(ui.page_size.unwrap_or(DEFAULT_PAGE_SIZE)),
        "ui.page_size",
    )?;
    let max_toasts = non_zero_u32(
        u64::from(ui.max_toasts.unwrap_or(DEFAULT_MAX_TOASTS)),
        "ui.max_toasts",
    )?;
    let toast_ttl_ms = ui.toast_ttl_ms.unwrap_or(DEFAULT_TOAST_TTL_MS);
    if toast_ttl_ms == 0 {
        return Err(LoadError::invalid(
            "ui.toast_ttl_ms",
            "must be greater than zero",
        ));
    }

    Ok(UiSettings {
        page_size,
        debounce: Duration::from_millis(ui.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
        toast_ttl: Duration::from_millis(toast_ttl_ms),
        max_toasts,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    list_limit: Option<usize>,
    detail_limit: Option<usize>,
    dropdown_limit: Option<usize>,
    max_age_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawUiSettings {
    page_size: Option<u32>,
    debounce_ms: Option<u64>,
    toast_ttl_ms: Option<u64>,
    max_toasts: Option<u32>,
}

fn non_zero_u32(value: u64, key: &'static str) -> Result<NonZeroU32, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    let value_u32: u32 = value
        .try_into()
        .map_err(|_| LoadError::invalid(key, "value exceeds supported range for u32"))?;
    NonZeroU32::new(value_u32).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

#[cfg(test)]
mod tests;
