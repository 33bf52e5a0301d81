use crate::config::Config;
use crate::errors::handle_panic;
use crate::handlers;
use crate::state::AppState;
use axum::{handler::HandlerWithoutStateExt, http::HeaderValue, routing::get, Router};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let static_files =
        ServeDir::new(&state.config.static_dir).not_found_service(handlers::not_found.into_service());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/orders/count", get(handlers::order_count))
        .route("/health", get(handlers::health))
        .route("/config/check", get(handlers::config_check))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Production with a non-empty allow-list restricts origins; everything else is permissive.
fn cors_layer(config: &Config) -> CorsLayer {
    if !config.environment.is_production() || config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(origin = %origin, error = %err, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
