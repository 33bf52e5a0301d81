use axum::{http::StatusCode as UpstreamStatus, routing::get, Json, Router};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use shopify_order_counter::{router, AppState, Config, OrderCountClient, Period};
use std::collections::HashMap;
use std::time::Duration;

const COUNT_PATH: &str = "/admin/api/2023-10/orders/count.json";

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Serves the app against `upstream`, with a short fetch timeout.
async fn app_with_upstream(upstream: Router) -> String {
    let upstream_url = serve(upstream).await;
    let config = config(&[
        ("SHOPIFY_STORE_URL", upstream_url.as_str()),
        ("SHOPIFY_ACCESS_TOKEN", "shpat_test"),
    ]);
    let store = config.store().unwrap();
    let orders = OrderCountClient::with_timeout(&store, Duration::from_millis(300)).unwrap();
    serve(router(AppState::new(config, Some(orders)))).await
}

async fn unconfigured_app() -> String {
    serve(router(AppState::new(config(&[]), None))).await
}

async fn get_json(url: String) -> (StatusCode, Value) {
    let response = Client::new().get(url).send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn counting_upstream(body: Value) -> Router {
    Router::new().route(COUNT_PATH, get(move || async move { Json(body) }))
}

#[tokio::test]
async fn order_count_returns_upstream_count() {
    let base = app_with_upstream(counting_upstream(serde_json::json!({ "count": 42 }))).await;

    let (status, body) = get_json(format!("{base}/api/orders/count?period=today")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 42);
    assert_eq!(body["period"], "today");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn order_count_defaults_to_all_time() {
    let base = app_with_upstream(counting_upstream(serde_json::json!({ "count": 3 }))).await;

    let (status, body) = get_json(format!("{base}/api/orders/count")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "all-time");
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn missing_count_field_is_zero() {
    let base = app_with_upstream(counting_upstream(serde_json::json!({ "orders": [] }))).await;

    let (status, body) = get_json(format!("{base}/api/orders/count?period=last-week")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn invalid_period_lists_allowed_values() {
    let base = app_with_upstream(counting_upstream(serde_json::json!({ "count": 1 }))).await;

    for query in ["period=bogus", "period="] {
        let (status, body) = get_json(format!("{base}/api/orders/count?{query}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid period parameter");
        let allowed: Vec<String> = serde_json::from_value(body["allowed_periods"].clone()).unwrap();
        assert_eq!(allowed, Period::allowed());
        assert_eq!(allowed.len(), 9);
    }
}

#[tokio::test]
async fn repeated_period_uses_first_value() {
    let base = app_with_upstream(counting_upstream(serde_json::json!({ "count": 5 }))).await;

    let (status, body) =
        get_json(format!("{base}/api/orders/count?period=today&period=bogus")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "today");
    assert_eq!(body["count"], 5);

    let (status, body) =
        get_json(format!("{base}/api/orders/count?period=bogus&period=today")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["allowed_periods"].as_array().map(Vec::len), Some(9));
}

#[tokio::test]
async fn null_upstream_count_is_zero() {
    let base = app_with_upstream(counting_upstream(serde_json::json!({ "count": null }))).await;

    let (status, body) = get_json(format!("{base}/api/orders/count?period=yesterday")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn upstream_error_becomes_opaque_500() {
    let upstream = Router::new().route(
        COUNT_PATH,
        get(|| async { (UpstreamStatus::SERVICE_UNAVAILABLE, "upstream diagnostic payload") }),
    );
    let base = app_with_upstream(upstream).await;

    let response = Client::new()
        .get(format!("{base}/api/orders/count?period=today"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text().await.unwrap();
    assert!(!text.contains("upstream diagnostic payload"));

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch order count from Shopify API");
    assert!(body.get("count").is_none());
}

#[tokio::test]
async fn upstream_timeout_becomes_500() {
    let upstream = Router::new().route(
        COUNT_PATH,
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!({ "count": 1 }))
        }),
    );
    let base = app_with_upstream(upstream).await;

    let (status, body) = get_json(format!("{base}/api/orders/count?period=this-year")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unconfigured_fetch_fails_with_500() {
    let base = unconfigured_app().await;

    let (status, body) = get_json(format!("{base}/api/orders/count?period=today")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch order count from Shopify API");
}

#[tokio::test]
async fn health_reflects_configuration() {
    let healthy = app_with_upstream(counting_upstream(serde_json::json!({ "count": 1 }))).await;
    let (status, body) = get_json(format!("{healthy}/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["config"], "valid");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let unhealthy = unconfigured_app().await;
    let (status, body) = get_json(format!("{unhealthy}/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["config"], "invalid");
}

#[tokio::test]
async fn health_is_unhealthy_when_only_token_is_missing() {
    let config = config(&[("SHOPIFY_STORE_URL", "shop.myshopify.com")]);
    let base = serve(router(AppState::new(config, None))).await;

    let (status, _) = get_json(format!("{base}/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn config_check_reports_each_variable() {
    let base = unconfigured_app().await;
    let (status, body) = get_json(format!("{base}/config/check")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["config"]["shopify_store_url"], "missing");
    assert_eq!(body["config"]["shopify_access_token"], "missing");
    assert_eq!(
        body["help"]["required_variables"],
        serde_json::json!(["SHOPIFY_STORE_URL", "SHOPIFY_ACCESS_TOKEN"])
    );
    assert_eq!(body["help"]["example"]["SHOPIFY_STORE_URL"], "your-store.myshopify.com");

    let base = app_with_upstream(counting_upstream(serde_json::json!({ "count": 1 }))).await;
    let (status, body) = get_json(format!("{base}/config/check")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["config"]["shopify_access_token"], "set");
    assert!(body.get("help").is_none());
    assert!(!body.to_string().contains("shpat_test"));
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let base = unconfigured_app().await;
    let (status, body) = get_json(format!("{base}/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn missing_static_file_is_json_404() {
    let base = unconfigured_app().await;
    let response = Client::new()
        .get(format!("{base}/static/nope.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn index_serves_counter_page() {
    let base = unconfigured_app().await;
    let response = Client::new().get(format!("{base}/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("/api/orders/count"));
    assert!(html.contains(r#"value="last-month""#));
}
