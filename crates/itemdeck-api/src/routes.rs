//! Router assembly.

use axum::Router;
use axum::routing::get;
use itemdeck_auth::AuthLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::meta;
use crate::state::AppState;

/// Build the full router for `state`.
///
/// Item routes live under `{prefix}/items/`, with the trailing slash. The
/// auth guard wraps the item routes only when it is enabled and a token
/// validator is configured.
pub fn build_router(state: AppState) -> Router {
    let prefix = state.settings.prefix.clone();

    let mut items = Router::new()
        .route(
            &format!("{prefix}/items/"),
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            &format!("{prefix}/items/{{item_id}}/"),
            get(handlers::get_item)
                .put(handlers::update_item)
                .patch(handlers::patch_item)
                .delete(handlers::delete_item),
        );

    if state.auth.enabled
        && let Some(jwt) = state.jwt.clone()
    {
        tracing::info!(policy = ?state.auth.policy, "auth guard enabled");
        items = items.layer(AuthLayer::new(jwt, state.auth.clone()));
    }

    Router::new()
        .route(&format!("{prefix}/"), get(meta::api_info))
        .merge(items)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
