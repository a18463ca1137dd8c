//! pixstash API server
//!
//! Main entry point for the image upload service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pixstash_api::{AppState, create_router};
use pixstash_db::{connect, init_schema};
use pixstash_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // A missing API key is fatal
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    init_schema(&db)
        .await
        .context("Failed to initialize database")?;
    info!(path = %config.database.path, "Connected to database");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        environment = %config.environment,
        max_file_size = config.upload.max_file_size,
        "Starting image upload service with ImgBB storage"
    );

    let state = AppState::new(config, db).context("Failed to build ImgBB client")?;
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON output everywhere except development. `RUST_LOG` overrides the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_development() {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }
}

fn default_directives(config: &AppConfig) -> String {
    if config.is_development() {
        "debug,hyper=info,sqlx=warn".to_string()
    } else {
        format!("{},tower_http=info,sqlx=warn", config.log_level)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received terminate signal, shutting down"),
    }
}
