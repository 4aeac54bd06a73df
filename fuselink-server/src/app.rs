use crate::error::ConfigError;
use crate::signaling::{AppState, health, missing_room, turn_credentials, ws_handler};
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Result<Router, ConfigError> {
    let cors = cors_layer(allowed_origins)?;

    Ok(Router::new()
        .route("/api/health", get(health))
        .route("/api/turn-cred", get(turn_credentials))
        .route("/ws/signaling/", get(missing_room))
        .route("/ws/signaling/{room_id}", get(ws_handler))
        .layer(cors)
        .with_state(state))
}

/// Listed origins get credentialed CORS; an empty list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, ConfigError> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if allowed_origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
