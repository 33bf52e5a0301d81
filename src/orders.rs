use crate::config::StoreCredentials;
use crate::period::{resolve, Period};
use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
const USER_AGENT: &str = "Shopify-Order-Counter/1.0";

#[derive(Debug, Error)]
pub enum FetchError {
    /// Timeout, DNS, refused or reset connection.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("upstream returned HTTP {0}")]
    Upstream(StatusCode),
    /// HTTP 200 whose body is not the expected JSON document.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(#[source] reqwest::Error),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network-error",
            FetchError::Upstream(_) => "upstream-error",
            FetchError::MalformedResponse(_) => "malformed-response",
        }
    }
}

/// Absent and `null` counts both read as zero.
#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    count: Option<u64>,
}

/// Client for the Admin API `orders/count` resource. Cheap to clone.
#[derive(Clone)]
pub struct OrderCountClient {
    http: Client,
    endpoint: String,
    access_token: SecretString,
}

impl OrderCountClient {
    pub fn new(store: &StoreCredentials) -> Result<Self, reqwest::Error> {
        Self::with_timeout(store, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(store: &StoreCredentials, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/admin/api/{}/orders/count.json",
                store.base_url, store.api_version
            ),
            access_token: store.access_token.clone(),
        })
    }

    pub async fn fetch(&self, period: Period) -> Result<u64, FetchError> {
        self.fetch_at(period, Utc::now()).await
    }

    /// One upstream call, no retries. Bounds are resolved against `now`.
    pub async fn fetch_at(&self, period: Period, now: DateTime<Utc>) -> Result<u64, FetchError> {
        let range = resolve(period, now);

        info!(period = %period, "fetching order count");
        let mut query = vec![("status", "any".to_string())];
        if let Some(range) = range {
            info!(start = %range.start_iso(), end = %range.end_iso(), "date range");
            query.push(("created_at_min", range.start_iso()));
            query.push(("created_at_max", range.end_iso()));
        }

        let result = self.request(&query).await;
        match &result {
            Ok(count) => info!(period = %period, count, "fetched order count"),
            Err(err) => error!(period = %period, kind = err.kind(), error = %err, "order count fetch failed"),
        }
        result
    }

    async fn request(&self, query: &[(&str, String)]) -> Result<u64, FetchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(query)
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| FetchError::Network(err.without_url()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Upstream(status));
        }

        match response.json::<CountResponse>().await {
            Ok(body) => Ok(body.count.unwrap_or(0)),
            Err(err) if err.is_decode() => Err(FetchError::MalformedResponse(err.without_url())),
            Err(err) => Err(FetchError::Network(err.without_url())),
        }
    }
}
