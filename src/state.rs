use crate::config::Config;
use crate::orders::OrderCountClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Absent when the store credentials are incomplete.
    pub orders: Option<OrderCountClient>,
}

impl AppState {
    pub fn new(config: Config, orders: Option<OrderCountClient>) -> Self {
        Self {
            config: Arc::new(config),
            orders,
        }
    }
}
