use crate::period::Period;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderCountResponse {
    pub success: bool,
    pub count: u64,
    pub period: Period,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_periods: Option<Vec<&'static str>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub config: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ConfigStatus {
    pub shopify_store_url: &'static str,
    pub shopify_access_token: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ConfigHelp {
    pub required_variables: Vec<&'static str>,
    pub example: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct ConfigCheckResponse {
    pub success: bool,
    pub message: &'static str,
    pub config: ConfigStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<ConfigHelp>,
}
