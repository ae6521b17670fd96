//! Shared application state.

use std::sync::Arc;

use itemdeck_auth::{AccessPolicy, AuthConfig, JwtAuth};
use itemdeck_core::Result;
use itemdeck_storage::{ItemStore, JsonFileStore};
use serde::Serialize;

use crate::config::Config;
use crate::rate_limit::{RateLimitConfig, RateLimiter};

/// A documented server entry in the API metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// Base URL.
    pub url: String,
    /// Human-readable label.
    pub description: String,
}

/// Settings the handlers read on every request.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Collection name, e.g. `items`.
    pub api_name: String,
    /// Route prefix, e.g. `/api/v1/items`.
    pub prefix: String,
    /// Answer an empty collection with 404.
    pub empty_list_not_found: bool,
    /// API title shown in metadata.
    pub title: String,
    /// API description shown in metadata.
    pub description: String,
    /// API version shown in metadata.
    pub version: String,
    /// Documented servers.
    pub servers: Vec<ServerInfo>,
}

impl ApiSettings {
    /// Settings for a collection with no documented servers.
    pub fn new(api_name: impl Into<String>) -> Self {
        let api_name = api_name.into();
        Self {
            prefix: format!("/api/v1/{api_name}"),
            empty_list_not_found: false,
            title: format!("{api_name} API"),
            description: format!("{api_name} API description."),
            version: env!("CARGO_PKG_VERSION").to_string(),
            servers: Vec::new(),
            api_name,
        }
    }

    /// Builds settings from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut settings = Self::new(config.api_name.clone());
        settings.empty_list_not_found = config.empty_list_not_found;
        settings.servers = config
            .servers()
            .into_iter()
            .map(|(url, label)| ServerInfo {
                url,
                description: label.to_string(),
            })
            .collect();
        settings
    }
}

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Item persistence.
    pub store: Arc<dyn ItemStore>,
    /// Per-route request budget.
    pub limiter: Arc<RateLimiter>,
    /// Request-independent settings.
    pub settings: Arc<ApiSettings>,
    /// Auth guard configuration.
    pub auth: AuthConfig,
    /// Token signer/validator, present when a secret is configured.
    pub jwt: Option<Arc<JwtAuth>>,
}

impl AppState {
    /// State with auth disabled.
    pub fn new(
        store: Arc<dyn ItemStore>,
        limiter: RateLimiter,
        settings: ApiSettings,
    ) -> Self {
        Self {
            store,
            limiter: Arc::new(limiter),
            settings: Arc::new(settings),
            auth: AuthConfig::default(),
            jwt: None,
        }
    }

    /// Enable the auth guard with `policy`, validating tokens with `jwt`.
    pub fn with_auth(mut self, jwt: JwtAuth, policy: AccessPolicy) -> Self {
        self.auth = AuthConfig {
            enabled: true,
            policy,
        };
        self.jwt = Some(Arc::new(jwt));
        self
    }

    /// Builds state from validated configuration, backed by the JSON file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let store: Arc<dyn ItemStore> = Arc::new(JsonFileStore::new(&config.data_file));
        let limiter = RateLimiter::new(RateLimitConfig::per_minute(config.rate_limit_per_minute));
        let mut state = Self::new(store, limiter, ApiSettings::from_config(config));

        if let Some(secret) = config.secret() {
            let jwt = JwtAuth::new(secret);
            if config.auth_enabled {
                state = state.with_auth(jwt, AccessPolicy::default());
            } else {
                state.jwt = Some(Arc::new(jwt));
            }
        }

        Ok(state)
    }
}
