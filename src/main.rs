use dotenvy::dotenv;
use dryfruto_api::{
    api::{self, AppState},
    config::{AppConfig, database, seed::configured_dataset},
    core::seed,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!("Failed to load application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize database and schema
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Load the seed dataset, and apply it before serving if asked to
    let seed_data = configured_dataset(&app_config)
        .inspect_err(|e| error!("Failed to load seed data: {}", e))?;
    if app_config.seed_on_startup {
        let report = seed::seed(&db, &seed_data)
            .await
            .inspect_err(|e| error!("Failed to seed database: {}", e))?;
        info!(
            "Startup seeding done (already seeded: {})",
            report.already_seeded
        );
    }

    // 6. Serve until Ctrl-C
    let app = api::service(AppState::new(db.clone(), seed_data), &app_config)?;
    let listener = tokio::net::TcpListener::bind(app_config.bind_address())
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", app_config.bind_address(), e))?;
    info!("DryFruto API listening on {}", app_config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!("Shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received.");
}
