//! Command-line front-end: resolves credentials, starts a [`Session`] and
//! drives the controllers for one command.

mod handlers;
mod io;

use thiserror::Error;

use crate::application::error::AppError;
use crate::application::session::Session;
use crate::config::{CliArgs, LoadError, Settings};
use crate::domain::entities::{
    BlogCategories, BlogTags, Blogs, Categories, Comments, Drafts, Likes, Tags,
};
use crate::domain::resource::ResourceKind;
use crate::domain::validation::ValidationErrors;
use crate::infra::error::InfraError;
use crate::presentation::print;

pub use io::read_key_file;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site, BLOGDESK_SITE_URL or api.base_url)")]
    MissingSite,
    #[error("API token is required (use --key-file or BLOGDESK_API_KEY)")]
    MissingKey,
    #[error("failed to read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load configuration")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("validation failed")]
    Invalid(ValidationErrors),
    #[error("{0}")]
    Failed(String),
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Token from `--key-file` when given, otherwise from the environment.
pub fn resolve_token(cli: &CliArgs) -> Result<String, CliError> {
    let token = match &cli.key_file {
        Some(path) => read_key_file(path)?,
        None => cli.api_key_env.clone().ok_or(CliError::MissingKey)?,
    };
    if token.trim().is_empty() {
        return Err(CliError::MissingKey);
    }
    Ok(token)
}

pub fn build_session(cli: &CliArgs, settings: Settings) -> Result<Session, CliError> {
    if settings.api.base_url.is_none() {
        return Err(CliError::MissingSite);
    }
    let token = resolve_token(cli)?;
    Ok(Session::login(settings, &token)?)
}

/// Subcommand name of a resource.
pub fn command_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Blogs => "blogs",
        ResourceKind::Categories => "categories",
        ResourceKind::Tags => "tags",
        ResourceKind::BlogCategories => "blog-categories",
        ResourceKind::BlogTags => "blog-tags",
        ResourceKind::Drafts => "drafts",
        ResourceKind::Comments => "comments",
        ResourceKind::Likes => "likes",
    }
}

/// Execute the parsed command. Notifications raised along the way are
/// written to stderr, whatever the outcome.
pub async fn run(cli: CliArgs, settings: Settings) -> Result<(), CliError> {
    let Some((kind, args)) = cli.command.resource() else {
        let lines = print::module_lines(&ResourceKind::ALL, |kind| {
            format!("blogdesk {} list", command_name(kind))
        });
        for line in lines {
            println!("{line}");
        }
        return Ok(());
    };

    let action = args.action.clone();
    let session = build_session(&cli, settings)?;
    let result = match kind {
        ResourceKind::Blogs => handlers::handle::<Blogs>(&session, action).await,
        ResourceKind::Categories => handlers::handle::<Categories>(&session, action).await,
        ResourceKind::Tags => handlers::handle::<Tags>(&session, action).await,
        ResourceKind::BlogCategories => {
            handlers::handle::<BlogCategories>(&session, action).await
        }
        ResourceKind::BlogTags => handlers::handle::<BlogTags>(&session, action).await,
        ResourceKind::Drafts => handlers::handle::<Drafts>(&session, action).await,
        ResourceKind::Comments => handlers::handle::<Comments>(&session, action).await,
        ResourceKind::Likes => handlers::handle::<Likes>(&session, action).await,
    };

    for toast in session.toasts().drain() {
        eprintln!("{}", print::toast_line(&toast));
    }
    session.logout();
    result
}
