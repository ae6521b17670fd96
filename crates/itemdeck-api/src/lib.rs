//! # itemdeck-api
//!
//! HTTP API server for itemdeck.
//!
//! This crate provides:
//! - CRUD routes over the item collection
//! - Per-route, per-client rate limiting
//! - Error mapping to `{detail}` response bodies
//! - Environment/flag configuration and logging setup

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod meta;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use config::{Cli, Command, Config};
pub use error::ApiError;
pub use rate_limit::{ClientKey, RateLimitConfig, RateLimiter};
pub use routes::build_router;
pub use state::{ApiSettings, AppState};
