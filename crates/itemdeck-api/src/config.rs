//! Command-line and environment configuration.
//!
//! Every setting can come from a flag or from the environment variable named
//! next to it. Flags win over the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use itemdeck_core::{Error, Result};

/// itemdeck - items CRUD service
#[derive(Parser, Debug)]
#[command(name = "itemdeck")]
#[command(about = "CRUD HTTP service over a JSON-file item collection", long_about = None)]
pub struct Cli {
    /// Service settings.
    #[command(flatten)]
    pub config: Config,

    /// Subcommand; defaults to `serve`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Service settings.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Collection name used in the path prefix and the log file name
    #[arg(long, env = "API_NAME", default_value = "items")]
    pub api_name: String,

    /// HS256 signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Production server URL (metadata only)
    #[arg(long, env = "PRODUCTION_SERVER_URL")]
    pub production_server_url: Option<String>,

    /// Development server URL (metadata only)
    #[arg(long, env = "DEVELOPMENT_SERVER_URL")]
    pub development_server_url: Option<String>,

    /// Localhost server URL (metadata only)
    #[arg(long, env = "LOCALHOST_SERVER_URL")]
    pub localhost_server_url: Option<String>,

    /// Production deployment flag
    #[arg(
        long,
        env = "IS_PRODUCTION",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub is_production: bool,

    /// Listen address
    #[arg(long = "bind", env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind_addr: SocketAddr,

    /// JSON dataset path
    #[arg(long, env = "DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,

    /// Requests per minute allowed per route and client
    #[arg(long = "rate-limit", env = "RATE_LIMIT_PER_MINUTE", default_value_t = 5)]
    pub rate_limit_per_minute: u32,

    /// Answer an empty collection with 404 instead of `[]`
    #[arg(
        long,
        env = "EMPTY_LIST_NOT_FOUND",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub empty_list_not_found: bool,

    /// Require bearer tokens on protected routes
    #[arg(
        long,
        env = "AUTH_ENABLED",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = parse_flag
    )]
    pub auth_enabled: bool,

    /// Directory for the log file; stderr only when unset
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print the bcrypt hash of a password
    HashPassword {
        /// Plain-text password
        password: String,

        /// bcrypt cost factor
        #[arg(long)]
        cost: Option<u32>,
    },

    /// Issue a signed token embedding a JSON user object
    IssueToken {
        /// User object as JSON
        user: String,
    },

    /// Verify a token and print its user object
    VerifyToken {
        /// Encoded token
        token: String,
    },
}

/// Lenient boolean: `true`, `1`, `yes`, `on` (any case) are true.
fn parse_flag(raw: &str) -> std::result::Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

impl Config {
    /// Check settings that clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty API name, a zero rate limit,
    /// or auth enabled without a secret.
    pub fn validate(&self) -> Result<()> {
        if self.api_name.trim().is_empty() {
            return Err(Error::config("API_NAME must not be empty"));
        }
        if self.api_name.contains('/') {
            return Err(Error::config("API_NAME must be a single path segment"));
        }
        if self.rate_limit_per_minute == 0 {
            return Err(Error::config("RATE_LIMIT_PER_MINUTE must be at least 1"));
        }
        if self.auth_enabled && self.secret().is_none() {
            return Err(Error::config("AUTH_ENABLED requires JWT_SECRET"));
        }
        Ok(())
    }

    /// Route prefix, e.g. `/api/v1/items`.
    pub fn api_prefix(&self) -> String {
        format!("/api/v1/{}", self.api_name)
    }

    /// Log file name, e.g. `api_items.log`.
    pub fn log_file_name(&self) -> String {
        format!("api_{}.log", self.api_name)
    }

    /// The signing secret, if set and non-blank.
    pub fn secret(&self) -> Option<&str> {
        self.jwt_secret.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Configured server URLs with their labels, skipping unset ones.
    pub fn servers(&self) -> Vec<(String, &'static str)> {
        [
            (&self.localhost_server_url, "Localhost server"),
            (&self.development_server_url, "Development server"),
            (&self.production_server_url, "Production server"),
        ]
        .into_iter()
        .filter_map(|(url, label)| url.clone().map(|u| (u, label)))
        .collect()
    }
}
