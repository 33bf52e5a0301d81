use shopify_order_counter::config::{ACCESS_TOKEN_EXAMPLE, ACCESS_TOKEN_VAR, STORE_URL_EXAMPLE, STORE_URL_VAR};
use shopify_order_counter::{router, AppState, Config, OrderCountClient};
use std::{net::SocketAddr, process};
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let missing = config.missing();
    if !missing.is_empty() {
        error!("Missing required environment variables: {}", missing.join(", "));
        error!("Please set these environment variables and restart the application.");
        error!("Example: {STORE_URL_VAR}={STORE_URL_EXAMPLE}");
        error!("Example: {ACCESS_TOKEN_VAR}={ACCESS_TOKEN_EXAMPLE}");
        if config.environment.is_production() {
            error!("Cannot start application due to missing configuration.");
            process::exit(1);
        }
    }

    fs::create_dir_all(config.static_dir.join("assets")).await?;

    let orders = match config.store() {
        Some(store) => Some(OrderCountClient::new(&store)?),
        None => None,
    };

    info!("Starting Shopify Order Counter in {} mode...", config.environment.label());
    if config.environment.is_production() {
        info!("Configuration validated successfully");
    } else if let Some(store_url) = config.store_url.as_deref() {
        info!("Store URL: {store_url}");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(AppState::new(config, orders));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
