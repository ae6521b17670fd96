//! API metadata endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::error::ApiError;
use crate::rate_limit::ClientKey;
use crate::state::{AppState, ServerInfo};

/// Body of `GET {prefix}/`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    pub description: String,
    /// Documented servers.
    pub servers: Vec<ServerInfo>,
}

/// `GET {prefix}/`
pub async fn api_info(
    State(state): State<AppState>,
    client: ClientKey,
) -> Result<Json<ApiInfo>, ApiError> {
    state.limiter.check("api_info", &client)?;

    let settings = &state.settings;
    Ok(Json(ApiInfo {
        title: settings.title.clone(),
        version: settings.version.clone(),
        description: settings.description.clone(),
        servers: settings.servers.clone(),
    }))
}
