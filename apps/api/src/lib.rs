pub mod router;

use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

use shared_config::AppConfig;
use shared_database::AppState;

pub fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let value = HeaderValue::from_str(&config.cors_allow_origin)
            .with_context(|| format!("invalid CORS_ALLOW_ORIGIN: {}", config.cors_allow_origin))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Full application: every cell router plus tracing and CORS.
pub fn build_app(state: Arc<AppState>) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config)?;

    Ok(router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors))
}
