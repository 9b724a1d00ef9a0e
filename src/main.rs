//! Inventory Dashboard server
//!
//! Serves the operator dashboard API in front of the inventory backend.

use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inventory_dashboard::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::{BackendClient, Repository},
    services::Services,
    AppState,
};

/// Install the global subscriber; the returned guard flushes the log file on drop
fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("inventory_dashboard={},tower_http=debug", config.level).into()
    });

    let (json, pretty) = if config.format.eq_ignore_ascii_case("json") {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer()))
    };

    let (file, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "inventory-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(file)
        .init();

    guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting Inventory Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Forwarding to {} (reference offset {} min)",
        config.backend.base_url,
        config.dashboard.utc_offset_minutes
    );

    let client = BackendClient::new(&config.backend)?;
    let repository = Repository::new(client);
    let services = Services::new(repository, &config);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
