use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::domain::resource::ResourceKind;

/// Command-line arguments for the blogdesk binary.
#[derive(Debug, Parser)]
#[command(name = "blogdesk", version, about = "Blog platform admin console")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "BLOGDESK_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    /// API base URL, e.g. <https://example.com/api>
    #[arg(long, env = "BLOGDESK_SITE_URL", value_name = "URL")]
    pub site: Option<String>,

    /// Path to file containing the API token (takes precedence over env)
    #[arg(
        long,
        env = "BLOGDESK_API_KEY_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub key_file: Option<PathBuf>,

    /// API token from env (no visible flag, to keep tokens out of shell history)
    #[arg(long = "api-key", hide = true, env = "BLOGDESK_API_KEY")]
    pub api_key_env: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List navigation entries
    Modules,
    /// Blog management
    Blogs(ResourceArgs),
    /// Category management
    Categories(ResourceArgs),
    /// Tag management
    Tags(ResourceArgs),
    /// Blog ↔ category links
    #[command(name = "blog-categories")]
    BlogCategories(ResourceArgs),
    /// Blog ↔ tag links
    #[command(name = "blog-tags")]
    BlogTags(ResourceArgs),
    /// Draft management
    Drafts(ResourceArgs),
    /// Comment management
    Comments(ResourceArgs),
    /// Like management
    Likes(ResourceArgs),
}

impl Command {
    /// Resource addressed by the command, `None` for `modules`.
    pub fn resource(&self) -> Option<(ResourceKind, &ResourceArgs)> {
        let resource = match self {
            Command::Modules => return None,
            Command::Blogs(args) => (ResourceKind::Blogs, args),
            Command::Categories(args) => (ResourceKind::Categories, args),
            Command::Tags(args) => (ResourceKind::Tags, args),
            Command::BlogCategories(args) => (ResourceKind::BlogCategories, args),
            Command::BlogTags(args) => (ResourceKind::BlogTags, args),
            Command::Drafts(args) => (ResourceKind::Drafts, args),
            Command::Comments(args) => (ResourceKind::Comments, args),
            Command::Likes(args) => (ResourceKind::Likes, args),
        };
        Some(resource)
    }
}

#[derive(Debug, Args, Clone)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub action: ResourceAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ResourceAction {
    /// Show one page of the grid
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Rows per page (defaults to `ui.page_size`)
        #[arg(long = "page-size")]
        page_size: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one record as JSON
    Get { id: i64 },
    /// Show picker options
    Dropdown {
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Create a record from field assignments
    Create {
        /// Field assignment, e.g. `--set title=Hello` or `--set blog=7`
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<Assignment>,
    },
    /// Load a record and apply field assignments
    Update {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        set: Vec<Assignment>,
    },
    /// Delete a record
    Delete { id: i64 },
}

/// A `field=value` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field: String,
    pub value: String,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok(Assignment {
        field: field.to_string(),
        value: value.to_string(),
    })
}
