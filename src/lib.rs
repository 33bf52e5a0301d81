pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod orders;
pub mod period;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use orders::{FetchError, OrderCountClient};
pub use period::{resolve, DateRange, Period};
pub use state::AppState;
