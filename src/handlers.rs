use crate::config::{ACCESS_TOKEN_EXAMPLE, ACCESS_TOKEN_VAR, STORE_URL_EXAMPLE, STORE_URL_VAR};
use crate::errors::AppError;
use crate::models::{
    ConfigCheckResponse, ConfigHelp, ConfigStatus, HealthResponse, OrderCountResponse,
};
use crate::period::Period;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{error, warn};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn order_count(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<OrderCountResponse>, AppError> {
    // Repeated keys are allowed; the first `period` wins.
    let requested = params
        .iter()
        .find(|(key, _)| key == "period")
        .map(|(_, value)| value.as_str());

    let period = match requested {
        None => Period::AllTime,
        Some(raw) => raw.parse::<Period>().map_err(|err| {
            warn!(error = %err, "rejected order count request");
            AppError::invalid_period()
        })?,
    };

    let Some(orders) = state.orders.as_ref() else {
        error!(missing = ?state.config.missing(), "store configuration incomplete, cannot fetch order count");
        return Err(AppError::fetch_failed());
    };

    let count = orders
        .fetch(period)
        .await
        .map_err(|_| AppError::fetch_failed())?;

    Ok(Json(OrderCountResponse {
        success: true,
        count,
        period,
        timestamp: Utc::now(),
    }))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let valid = state.config.is_valid();
    let status = if valid {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if valid { "healthy" } else { "unhealthy" },
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            config: if valid { "valid" } else { "invalid" },
        }),
    )
}

pub async fn config_check(State(state): State<AppState>) -> (StatusCode, Json<ConfigCheckResponse>) {
    let config = &state.config;
    let status = ConfigStatus {
        shopify_store_url: set_or_missing(config.store_url.is_some()),
        shopify_access_token: set_or_missing(config.access_token.is_some()),
        timestamp: Utc::now(),
    };

    if config.is_valid() {
        return (
            StatusCode::OK,
            Json(ConfigCheckResponse {
                success: true,
                message: "All required configuration is set",
                config: status,
                help: None,
            }),
        );
    }

    let help = ConfigHelp {
        required_variables: vec![STORE_URL_VAR, ACCESS_TOKEN_VAR],
        example: BTreeMap::from([
            (STORE_URL_VAR, STORE_URL_EXAMPLE),
            (ACCESS_TOKEN_VAR, ACCESS_TOKEN_EXAMPLE),
        ]),
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ConfigCheckResponse {
            success: false,
            message: "Missing required environment variables",
            config: status,
            help: Some(help),
        }),
    )
}

pub async fn not_found() -> AppError {
    AppError::not_found()
}

fn set_or_missing(present: bool) -> &'static str {
    if present { "set" } else { "missing" }
}
