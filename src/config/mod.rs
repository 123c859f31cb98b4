//! Configuration layer: command-line surface and validated runtime settings.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;


const DEFAULT_BASE_URL: &str = "https://api.notion.com";

/// Command-line arguments for the quaderno binary.
#[derive(Debug, Parser)]
#[command(
    name = "quaderno",
    version,
    about = "Export a Notion-style database to Markdown",
    long_about = None
)]
pub struct CliArgs {
    /// Directory receiving one rendered Markdown file per page (must exist).
    #[arg(long = "content-dir", env = "QUADERNO_CONTENT_DIR", value_name = "PATH")]
    pub content_dir: PathBuf,

    /// Directory receiving materialized image assets (must exist).
    #[arg(long = "static-dir", env = "QUADERNO_STATIC_DIR", value_name = "PATH")]
    pub static_dir: PathBuf,

    /// Public URL prefix under which the static assets are served.
    #[arg(long = "public-url", env = "QUADERNO_PUBLIC_URL", value_name = "URL")]
    pub public_url: String,

    /// Identifier of the database to export.
    #[arg(long = "database", env = "QUADERNO_DATABASE", value_name = "ID")]
    pub database: String,

    /// API base URL.
    #[arg(
        long = "base-url",
        env = "QUADERNO_BASE_URL",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Path to a file containing the API key (takes precedence over env).
    #[arg(long = "key-file", env = "QUADERNO_API_KEY_FILE", value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// API key from env (CLI flag intentionally disabled to avoid shell history leaks).
    #[arg(hide = true, env = "QUADERNO_API_KEY")]
    pub api_key_env: Option<String>,

    /// Emit a JSON frontmatter header for published pages.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub frontmatter: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("directory `{0}` does not exist")]
    MissingDirectory(String),
    #[error("api key is required (use --key-file or QUADERNO_API_KEY)")]
    MissingKey,
    #[error("failed to read key file: {0}")]
    KeyFile(std::io::Error),
}

/// Validated runtime settings consumed by the export pipeline.
#[derive(Debug, Clone)]
pub struct Settings {
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub public_url: String,
    pub database: String,
    pub base_url: String,
    pub api_key: String,
    pub frontmatter: bool,
}

impl Settings {
    /// Resolve and validate the command-line surface.
    pub fn from_cli(args: CliArgs) -> Result<Self, ConfigError> {
        let api_key = resolve_key(args.key_file.as_deref(), args.api_key_env)?;
        ensure_directory(&args.content_dir)?;
        ensure_directory(&args.static_dir)?;
        Ok(Self {
            content_dir: args.content_dir,
            static_dir: args.static_dir,
            public_url: args.public_url.trim_end_matches('/').to_string(),
            database: args.database,
            base_url: args.base_url,
            api_key,
            frontmatter: args.frontmatter,
        })
    }
}

fn resolve_key(key_file: Option<&Path>, env_key: Option<String>) -> Result<String, ConfigError> {
    if let Some(path) = key_file {
        let key = fs::read_to_string(path).map_err(ConfigError::KeyFile)?;
        return Ok(key.trim().to_string());
    }
    env_key.ok_or(ConfigError::MissingKey)
}

fn ensure_directory(path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::MissingDirectory(path.display().to_string()))
    }
}
